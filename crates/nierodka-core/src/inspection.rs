//! Surprise inspection: a claimable bonus that appears at random.
//!
//! Every `interval_ticks` running ticks it rolls to appear if nothing is
//! showing; once shown it stays for `lifetime_ticks` and then leaves
//! unclaimed. A crash pauses the rolls but not the countdown of a visible
//! inspection. Not persisted.

use crate::config::InspectionConfig;
use crate::rng::RandomSource;

/// What one inspection step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionStep {
    /// Nothing changed.
    Idle,
    /// An inspection appeared.
    Shown,
    /// A visible inspection left unclaimed.
    Expired,
}

/// Countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inspection {
    since_roll: u32,
    visible_for: u32,
}

impl Inspection {
    /// Whether an inspection can be claimed.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible_for > 0
    }

    /// Ticks left to claim the visible inspection.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.visible_for
    }

    /// Advance one running tick.
    pub fn advance<R: RandomSource>(
        &mut self,
        rng: &mut R,
        config: &InspectionConfig,
    ) -> InspectionStep {
        let expired = self.count_down() == InspectionStep::Expired;

        self.since_roll += 1;
        if self.since_roll >= config.interval_ticks.max(1) {
            self.since_roll = 0;
            if !expired && !self.visible() && rng.chance(config.chance) {
                self.visible_for = config.lifetime_ticks.max(1);
                return InspectionStep::Shown;
            }
        }

        if expired {
            InspectionStep::Expired
        } else {
            InspectionStep::Idle
        }
    }

    /// Advance one crashed tick: a visible inspection still runs out, nothing
    /// new is rolled.
    pub fn count_down(&mut self) -> InspectionStep {
        if self.visible_for == 0 {
            return InspectionStep::Idle;
        }
        self.visible_for -= 1;
        if self.visible_for == 0 {
            InspectionStep::Expired
        } else {
            InspectionStep::Idle
        }
    }

    /// Hide the visible inspection; `false` if none was showing.
    pub(crate) fn claim(&mut self) -> bool {
        let was_visible = self.visible();
        self.visible_for = 0;
        was_visible
    }

    /// Payout for `auto_points` of passive income.
    #[must_use]
    pub fn bonus(auto_points: u64, config: &InspectionConfig) -> u64 {
        auto_points
            .saturating_mul(config.income_ticks)
            .max(config.min_bonus)
    }
}
