//! The economy engine.
//!
//! [`Economy`] owns every piece of per-player state plus the injected random
//! source and clock. It is the only mutation surface: actions live in
//! [`actions`](crate::actions), the tick in [`scheduler`](crate::scheduler),
//! save/load in [`snapshot`](crate::snapshot). Each of them ends with a
//! resolver pass, so the derived output read here is never stale.
//!
//! # Example
//!
//! ```
//! use nierodka_core::{Economy, EconomyConfig};
//! use nierodka_core::clock::ManualClock;
//! use nierodka_core::rng::ChaChaSource;
//!
//! let mut eco = Economy::new(
//!     EconomyConfig::default(),
//!     ChaChaSource::from_seed(42),
//!     ManualClock::new(0),
//! );
//! assert_eq!(eco.click_power(), 1);
//! eco.click().unwrap();
//! assert_eq!(eco.points(), 1);
//! ```

use tracing::info;

use crate::catalog::Rank;
use crate::clock::{Clock, SystemClock};
use crate::config::EconomyConfig;
use crate::cosmetics::Wardrobe;
use crate::error::EconomyResult;
use crate::events::{EconomyEvent, EventLog, Stamped};
use crate::inspection::Inspection;
use crate::inventory::Inventory;
use crate::production::{ProductionState, TickPhase};
use crate::progress::Lifetime;
use crate::resolver::{resolve, Resolved};
use crate::rng::{ChaChaSource, RandomSource};

/// One player's economy.
#[derive(Debug, Clone)]
pub struct Economy<R: RandomSource = ChaChaSource, C: Clock = SystemClock> {
    pub(crate) config: EconomyConfig,
    pub(crate) rng: R,
    pub(crate) clock: C,
    pub(crate) points: u64,
    pub(crate) inventory: Inventory,
    pub(crate) production: ProductionState,
    pub(crate) lifetime: Lifetime,
    pub(crate) wardrobe: Wardrobe,
    pub(crate) inspection: Inspection,
    pub(crate) derived: Resolved,
    pub(crate) events: EventLog,
    pub(crate) ticks: u64,
}

impl Economy<ChaChaSource, SystemClock> {
    /// Default configuration, seeded `ChaCha8` stream and the system clock.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(
            EconomyConfig::default(),
            ChaChaSource::from_seed(seed),
            SystemClock,
        )
    }
}

impl<R: RandomSource, C: Clock> Economy<R, C> {
    /// A new game.
    #[must_use]
    pub fn new(config: EconomyConfig, rng: R, clock: C) -> Self {
        let mut economy = Self {
            production: ProductionState::new(config.coffee_max),
            events: EventLog::with_capacity(config.event_log_capacity),
            config,
            rng,
            clock,
            points: 0,
            inventory: Inventory::new(),
            lifetime: Lifetime::default(),
            wardrobe: Wardrobe::default(),
            inspection: Inspection::default(),
            derived: Resolved::default(),
            ticks: 0,
        };
        economy.recompute();
        economy
    }

    /// Like [`Economy::new`], but validates the configuration first.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::Config`](crate::EconomyError::Config) if the
    /// configuration is unusable.
    pub fn try_new(config: EconomyConfig, rng: R, clock: C) -> EconomyResult<Self> {
        config.validate()?;
        Ok(Self::new(config, rng, clock))
    }

    // =========================================================================
    // Derived output
    // =========================================================================

    /// Currency held.
    #[must_use]
    pub fn points(&self) -> u64 {
        self.points
    }

    /// Points per click before crits.
    #[must_use]
    pub fn click_power(&self) -> u64 {
        self.derived.click_power
    }

    /// Points per tick.
    #[must_use]
    pub fn auto_points(&self) -> u64 {
        self.derived.auto_points
    }

    /// Full output of the last resolver pass.
    #[must_use]
    pub fn resolved(&self) -> Resolved {
        self.derived
    }

    // =========================================================================
    // Production state
    // =========================================================================

    /// Whether the machine is rebooting.
    #[must_use]
    pub fn is_crashed(&self) -> bool {
        self.production.crashed
    }

    /// Reboot seconds remaining.
    #[must_use]
    pub fn crash_secs(&self) -> u32 {
        self.production.crash_secs
    }

    /// Overclock seconds remaining.
    #[must_use]
    pub fn overclock_secs(&self) -> u32 {
        self.production.overclock_secs
    }

    /// Mug level.
    #[must_use]
    pub fn coffee_level(&self) -> f64 {
        self.production.coffee_level
    }

    /// Whether the coffee buff is active right now.
    #[must_use]
    pub fn coffee_buff_active(&self) -> bool {
        self.production.coffee_buff_active(self.clock.now_ms())
    }

    /// State of the tick state machine.
    #[must_use]
    pub fn phase(&self) -> TickPhase {
        self.production.phase()
    }

    /// Coffee, overclock and crash timers.
    #[must_use]
    pub fn production(&self) -> &ProductionState {
        &self.production
    }

    // =========================================================================
    // Ownership and progress
    // =========================================================================

    /// Upgrades, hardware, evolutions, research and prestige.
    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Number of prestige resets.
    #[must_use]
    pub fn prestige_level(&self) -> u32 {
        self.inventory.prestige_level()
    }

    /// Lifetime counters.
    #[must_use]
    pub fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    /// Highest passive income ever resolved.
    #[must_use]
    pub fn max_cps(&self) -> u64 {
        self.lifetime.max_cps
    }

    /// Rank for the current lifetime earnings.
    #[must_use]
    pub fn rank(&self) -> &'static Rank {
        self.lifetime.rank()
    }

    /// Owned and active cosmetics.
    #[must_use]
    pub fn wardrobe(&self) -> &Wardrobe {
        &self.wardrobe
    }

    /// Surprise inspection state.
    #[must_use]
    pub fn inspection(&self) -> &Inspection {
        &self.inspection
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Ticks processed, including crashed ones.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Tuning constants.
    #[must_use]
    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Injected clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Injected random source.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Events not yet drained.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Drain pending events, oldest first.
    pub fn take_events(&mut self) -> Vec<Stamped> {
        self.events.take_events()
    }

    /// Return every field to new-game state, including research, cosmetics
    /// and prestige. Configuration, random source and clock are kept.
    pub fn hard_reset(&mut self) {
        self.points = 0;
        self.inventory = Inventory::new();
        self.production = ProductionState::new(self.config.coffee_max);
        self.lifetime = Lifetime::default();
        self.wardrobe = Wardrobe::default();
        self.inspection = Inspection::default();
        self.events.clear();
        self.emit(EconomyEvent::HardReset);
        self.recompute();
        info!(target: "economy.action", tick = self.ticks, "hard reset");
    }

    // =========================================================================
    // Crate-private helpers
    // =========================================================================

    /// Re-derive output from the current state and track the income record.
    pub(crate) fn recompute(&mut self) {
        self.derived = resolve(
            &self.inventory,
            &self.production,
            self.clock.now_ms(),
            &self.config,
        );
        self.lifetime.max_cps = self.lifetime.max_cps.max(self.derived.auto_points);
    }

    /// Add earned points to the balance and to lifetime earnings.
    pub(crate) fn credit(&mut self, amount: u64) {
        self.points = self.points.saturating_add(amount);
        self.lifetime.earnings = self.lifetime.earnings.saturating_add(amount);
    }

    pub(crate) fn emit(&mut self, event: EconomyEvent) {
        self.events.push(self.ticks, event);
    }
}
