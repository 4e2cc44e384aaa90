//! Lifetime counters and progression helpers.

use crate::catalog::{self, Rank};

/// Lifetime statistics.
///
/// Prestige clears `clicks` and `earnings`; the rest only grows until a hard
/// reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Lifetime {
    /// Clicks since the last prestige.
    pub clicks: u64,
    /// Points earned since the last prestige.
    pub earnings: u64,
    /// Running seconds played.
    pub play_time_secs: u64,
    /// Overclocks activated.
    pub overclocks: u64,
    /// Coffees drunk.
    pub coffees: u64,
    /// Highest passive income ever resolved.
    pub max_cps: u64,
}

impl Lifetime {
    /// Rank for the current earnings.
    #[must_use]
    pub fn rank(&self) -> &'static Rank {
        catalog::rank_for(self.earnings)
    }
}

/// Format seconds as `HH:MM:SS`. Hours keep growing past 99.
///
/// ```
/// use nierodka_core::progress::format_play_time;
///
/// assert_eq!(format_play_time(3_725), "01:02:05");
/// ```
#[must_use]
pub fn format_play_time(seconds: u64) -> String {
    let hours = seconds / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
