//! Run reports.

use serde::{Deserialize, Serialize};

use nierodka_core::Snapshot;

use crate::strategy::StrategyKind;

/// Economy output at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Tick the sample was taken after.
    pub tick: u64,
    /// Points held.
    pub points: u64,
    /// Lifetime earnings.
    pub earnings: u64,
    /// Passive income.
    pub auto_points: u64,
    /// Click power.
    pub click_power: u64,
}

/// Counters gathered while a run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    /// Actions that went through.
    pub applied: u64,
    /// Actions the economy refused.
    pub rejected: u64,
    /// Critical clicks.
    pub critical_clicks: u64,
    /// Overclocks that ended in a crash.
    pub crashes: u64,
    /// Inspections claimed.
    pub inspections_claimed: u64,
    /// Inspections missed.
    pub inspections_missed: u64,
    /// Prestige resets.
    pub prestiges: u64,
}

/// Outcome of one seeded run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Seed of the random stream.
    pub seed: u64,
    /// Strategy played.
    pub strategy: StrategyKind,
    /// Ticks simulated.
    pub ticks: u64,
    /// Event counters.
    pub tally: Tally,
    /// Rank title at the end.
    pub rank: String,
    /// Running play time, `HH:MM:SS`.
    pub play_time: String,
    /// Hash of the final state.
    pub state_hash: u64,
    /// Output sampled every `sample_every` ticks.
    pub timeline: Vec<Sample>,
    /// Final persisted state.
    pub snapshot: Snapshot,
}

/// Aggregate over a batch of runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of runs.
    pub runs: usize,
    /// Mean lifetime earnings at the end.
    pub mean_earnings: f64,
    /// Lowest final earnings.
    pub min_earnings: u64,
    /// Highest final earnings.
    pub max_earnings: u64,
    /// Crashes across all runs.
    pub total_crashes: u64,
    /// Highest prestige level reached.
    pub max_prestige: u32,
}

impl BatchSummary {
    /// Summarize `reports`; `None` for an empty batch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_reports(reports: &[RunReport]) -> Option<Self> {
        let earnings = reports.iter().map(|r| r.snapshot.total_earnings);
        let min_earnings = earnings.clone().min()?;
        let max_earnings = earnings.clone().max()?;
        let total: f64 = earnings.map(|e| e as f64).sum();
        Some(Self {
            runs: reports.len(),
            mean_earnings: total / reports.len() as f64,
            min_earnings,
            max_earnings,
            total_crashes: reports.iter().map(|r| r.tally.crashes).sum(),
            max_prestige: reports
                .iter()
                .map(|r| r.snapshot.prestige_level)
                .max()
                .unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(earnings: u64, crashes: u64) -> RunReport {
        RunReport {
            seed: 0,
            strategy: StrategyKind::Idle,
            ticks: 0,
            tally: Tally {
                crashes,
                ..Tally::default()
            },
            rank: String::new(),
            play_time: String::new(),
            state_hash: 0,
            timeline: Vec::new(),
            snapshot: Snapshot {
                total_earnings: earnings,
                ..Snapshot::default()
            },
        }
    }

    #[test]
    fn summary_of_nothing_is_none() {
        assert!(BatchSummary::from_reports(&[]).is_none());
    }

    #[test]
    fn summary_aggregates() {
        let summary =
            BatchSummary::from_reports(&[report(100, 1), report(300, 2), report(200, 0)]).unwrap();
        assert_eq!(summary.runs, 3);
        assert_eq!(summary.min_earnings, 100);
        assert_eq!(summary.max_earnings, 300);
        assert!((summary.mean_earnings - 200.0).abs() < f64::EPSILON);
        assert_eq!(summary.total_crashes, 3);
    }
}
