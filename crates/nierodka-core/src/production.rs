//! Transient production state: coffee, overclock and crash.
//!
//! These fields survive save/load but are not part of the inventory. The
//! tick scheduler owns their countdowns; actions only start them.

use serde::{Deserialize, Serialize};

/// State of the tick state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickPhase {
    /// Normal operation.
    Running,
    /// Rebooting after a failed overclock; production stalls.
    Crashed,
}

/// Coffee, overclock and crash timers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionState {
    /// Mug level in `[0, coffee_max]`.
    pub coffee_level: f64,
    /// Epoch milliseconds at which the coffee buff ends.
    pub coffee_buff_end_ms: u64,
    /// Overclock seconds remaining.
    pub overclock_secs: u32,
    /// Whether the machine is rebooting.
    pub crashed: bool,
    /// Reboot seconds remaining.
    pub crash_secs: u32,
}

impl ProductionState {
    /// New-game state with a full mug.
    #[must_use]
    pub fn new(coffee_max: f64) -> Self {
        Self {
            coffee_level: coffee_max,
            coffee_buff_end_ms: 0,
            overclock_secs: 0,
            crashed: false,
            crash_secs: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TickPhase {
        if self.crashed {
            TickPhase::Crashed
        } else {
            TickPhase::Running
        }
    }

    /// Whether the coffee buff is active at `now_ms`.
    #[must_use]
    pub fn coffee_buff_active(&self, now_ms: u64) -> bool {
        now_ms < self.coffee_buff_end_ms
    }

    /// Whether an overclock is running.
    #[must_use]
    pub fn overclocked(&self) -> bool {
        self.overclock_secs > 0
    }
}
