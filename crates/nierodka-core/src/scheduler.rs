//! The one-second tick.
//!
//! | Phase   | Condition          | Effect                                   |
//! |---------|--------------------|------------------------------------------|
//! | Crashed | `crash_secs > 1`   | count down, visible inspection ages      |
//! | Crashed | `crash_secs <= 1`  | recover, visible inspection ages         |
//! | Running | always             | play time, overclock, coffee, income,    |
//! |         |                    | inspection                               |
//!
//! While running, an overclock at 1 second expires this tick and rolls the
//! crash risk (`crash_base_risk` minus RAM reduction, floored at 0). Income
//! is the passive output resolved *before* the tick, so the tick a crash
//! begins still pays out. Random draws per tick, in order: crash roll (only
//! on expiry, only with positive risk), inspection roll (only on the roll
//! interval, only if running for the whole tick).

use tracing::{info, trace};

use crate::catalog::ResearchId;
use crate::clock::Clock;
use crate::engine::Economy;
use crate::events::EconomyEvent;
use crate::inspection::InspectionStep;
use crate::production::TickPhase;
use crate::rng::RandomSource;

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Phase after the tick.
    pub phase: TickPhase,
    /// Passive income credited.
    pub income: u64,
    /// The overclock ran out this tick.
    pub overclock_expired: bool,
    /// A crash began this tick.
    pub crashed: bool,
    /// The machine came back this tick.
    pub recovered: bool,
    /// Inspection step taken.
    pub inspection: InspectionStep,
}

impl TickReport {
    fn new() -> Self {
        Self {
            phase: TickPhase::Running,
            income: 0,
            overclock_expired: false,
            crashed: false,
            recovered: false,
            inspection: InspectionStep::Idle,
        }
    }
}

impl<R: RandomSource, C: Clock> Economy<R, C> {
    /// Advance one second.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let mut report = TickReport::new();

        let was_crashed = self.production.crashed;
        if was_crashed {
            self.tick_crashed(&mut report);
        } else {
            self.tick_running(&mut report);
        }
        self.tick_inspection(was_crashed || self.production.crashed, &mut report);

        self.recompute();
        report.phase = self.production.phase();
        trace!(
            target: "economy.tick",
            tick = self.ticks,
            phase = ?report.phase,
            income = report.income,
            points = self.points,
            "tick"
        );
        report
    }

    /// Advance `n` seconds; returns the total income credited.
    pub fn tick_n(&mut self, n: u64) -> u64 {
        (0..n).fold(0_u64, |total, _| total.saturating_add(self.tick().income))
    }

    fn tick_crashed(&mut self, report: &mut TickReport) {
        if self.production.crash_secs > 1 {
            self.production.crash_secs -= 1;
            return;
        }
        self.production.crash_secs = 0;
        self.production.crashed = false;
        report.recovered = true;
        self.emit(EconomyEvent::Recovered);
        info!(target: "economy.tick", tick = self.ticks, "recovered from crash");
    }

    fn tick_running(&mut self, report: &mut TickReport) {
        let income = self.derived.auto_points;
        self.lifetime.play_time_secs = self.lifetime.play_time_secs.saturating_add(1);

        match self.production.overclock_secs {
            0 => {}
            1 => self.expire_overclock(report),
            secs => self.production.overclock_secs = secs - 1,
        }

        if self.inventory.has_research(ResearchId::CaffeineResearch) {
            let level = self.production.coffee_level - self.config.coffee_decay_per_tick;
            self.production.coffee_level = level.max(0.0);
        }

        if income > 0 {
            self.credit(income);
            report.income = income;
        }
    }

    fn tick_inspection(&mut self, crashed: bool, report: &mut TickReport) {
        report.inspection = if crashed {
            self.inspection.count_down()
        } else {
            self.inspection.advance(&mut self.rng, &self.config.inspection)
        };
        match report.inspection {
            InspectionStep::Idle => {}
            InspectionStep::Shown => {
                self.emit(EconomyEvent::InspectionShown);
                info!(target: "economy.tick", tick = self.ticks, "inspection shown");
            }
            InspectionStep::Expired => self.emit(EconomyEvent::InspectionExpired),
        }
    }

    fn expire_overclock(&mut self, report: &mut TickReport) {
        self.production.overclock_secs = 0;
        report.overclock_expired = true;

        let reduction = self.inventory.hardware().modifiers().risk_reduction;
        let risk = (self.config.crash_base_risk - reduction).max(0.0);
        let crashed = self.rng.chance(risk);
        self.emit(EconomyEvent::OverclockExpired { crashed });

        if crashed {
            let secs = self.config.crash_duration_secs;
            self.production.crashed = true;
            self.production.crash_secs = secs;
            report.crashed = true;
            self.emit(EconomyEvent::Crashed { secs });
            info!(target: "economy.tick", tick = self.ticks, risk, secs, "overclock crashed");
        } else {
            info!(target: "economy.tick", tick = self.ticks, risk, "overclock expired");
        }
    }
}
