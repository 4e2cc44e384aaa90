//! Injected randomness.
//!
//! The economy draws random numbers in exactly two places: the critical
//! click roll and the chance rolls made by the tick (overclock crash, surprise
//! inspection). Both go through [`RandomSource`] so a run is replayable from
//! its seed and tests can script every branch.
//!
//! # Determinism
//!
//! [`RandomSource::chance`] does not draw when the probability is zero or
//! negative. A player without a GPU never advances the stream by clicking,
//! so adding clicks to a run does not shift later crash rolls.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// `true` with probability `p`. Draws nothing when `p <= 0`.
    fn chance(&mut self, p: f64) -> bool {
        if p.is_nan() || p <= 0.0 {
            return false;
        }
        self.next_f64() < p
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seeded `ChaCha8` stream.
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
    seed: u64,
}

impl ChaChaSource {
    /// Create a stream from a seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind to the start of the stream.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

impl RandomSource for ChaChaSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of samples, then a fallback forever.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    samples: VecDeque<f64>,
    fallback: f64,
    draws: usize,
}

impl ScriptedSource {
    /// A sample just below 1.0; loses every roll with `p < 1`.
    pub const MISS: f64 = 1.0 - f64::EPSILON;

    /// Replay `samples`, then miss every roll.
    #[must_use]
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            fallback: Self::MISS,
            draws: 0,
        }
    }

    /// Every roll misses.
    #[must_use]
    pub fn never() -> Self {
        Self::new(std::iter::empty::<f64>())
    }

    /// Every roll with `p > 0` hits.
    #[must_use]
    pub fn always() -> Self {
        Self::new(std::iter::empty::<f64>()).with_fallback(0.0)
    }

    /// Replace the value returned once the script runs out.
    #[must_use]
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of samples drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Scripted samples not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        self.samples.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = ChaChaSource::from_seed(42);
        let mut b = ChaChaSource::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn reset_rewinds() {
        let mut rng = ChaChaSource::from_seed(7);
        let first: Vec<u64> = (0..10).map(|_| rng.next_f64().to_bits()).collect();
        rng.reset();
        let again: Vec<u64> = (0..10).map(|_| rng.next_f64().to_bits()).collect();
        assert_eq!(first, again);
        assert_eq!(rng.seed(), 7);
    }

    #[test]
    fn samples_are_unit_interval() {
        let mut rng = ChaChaSource::from_seed(1);
        for _ in 0..1_000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn zero_chance_does_not_draw() {
        let mut rng = ScriptedSource::always();
        assert!(!rng.chance(0.0));
        assert!(!rng.chance(-0.2));
        assert!(!rng.chance(f64::NAN));
        assert_eq!(rng.draws(), 0);
        assert!(rng.chance(0.01));
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn script_then_fallback() {
        let mut rng = ScriptedSource::new([0.1, 0.9]);
        assert!(rng.chance(0.3));
        assert!(!rng.chance(0.3));
        assert_eq!(rng.remaining(), 0);
        assert!(!rng.chance(0.99));
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn borrowed_source_draws_from_owner() {
        fn draw<R: RandomSource>(mut rng: R) -> f64 {
            rng.next_f64()
        }

        let mut owner = ScriptedSource::new([0.5]);
        assert!((draw(&mut owner) - 0.5).abs() < f64::EPSILON);
        assert_eq!(owner.draws(), 1);
    }
}
