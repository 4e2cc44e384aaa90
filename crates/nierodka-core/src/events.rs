//! Notable things that happened, for the UI to drain.
//!
//! Every successful action and every state-machine transition pushes an
//! [`EconomyEvent`]. The log is bounded; when full, the oldest entry is
//! dropped and counted.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::catalog::{HardwareSlot, MusicId, ResearchId, ThemeId, UpgradeId};

/// One notable change, tagged with the tick it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamped {
    /// Tick counter at the time of the event.
    pub tick: u64,
    /// What happened.
    pub event: EconomyEvent,
}

/// Something the UI may want to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EconomyEvent {
    /// A click paid out.
    Clicked {
        /// Points awarded.
        amount: u64,
        /// Whether it was a critical click.
        critical: bool,
    },
    /// An upgrade level was bought.
    UpgradePurchased {
        /// Upgrade.
        id: UpgradeId,
        /// New level.
        level: u32,
        /// Price paid.
        cost: u64,
    },
    /// First level of an evolvable item; it now shows up in the lab.
    LabItemAvailable {
        /// Upgrade.
        id: UpgradeId,
    },
    /// A hardware tier was installed.
    HardwareInstalled {
        /// Slot.
        slot: HardwareSlot,
        /// New tier.
        tier: u32,
        /// Price paid.
        cost: u64,
    },
    /// An item reached a new evolution stage.
    ItemEvolved {
        /// Upgrade.
        id: UpgradeId,
        /// New stage.
        tier: u32,
        /// Price paid.
        cost: u64,
    },
    /// Research unlocked.
    ResearchUnlocked {
        /// Research.
        id: ResearchId,
        /// Price paid.
        cost: u64,
    },
    /// Coffee drunk.
    CoffeeDrunk {
        /// Epoch milliseconds at which the buff ends.
        buff_until_ms: u64,
    },
    /// Overclock switched on.
    OverclockStarted {
        /// Seconds it will run.
        secs: u32,
    },
    /// Overclock ran out.
    OverclockExpired {
        /// Whether the expiry roll crashed the machine.
        crashed: bool,
    },
    /// Machine crashed.
    Crashed {
        /// Reboot seconds.
        secs: u32,
    },
    /// Machine finished rebooting.
    Recovered,
    /// Prestige reset performed.
    Prestiged {
        /// New prestige level.
        level: u32,
    },
    /// A surprise inspection appeared.
    InspectionShown,
    /// The inspection bonus was collected.
    InspectionClaimed {
        /// Points awarded.
        bonus: u64,
    },
    /// The inspection left unclaimed.
    InspectionExpired,
    /// Theme bought.
    ThemePurchased {
        /// Theme.
        id: ThemeId,
    },
    /// Theme switched.
    ThemeSelected {
        /// Theme.
        id: ThemeId,
    },
    /// Track bought.
    MusicPurchased {
        /// Track.
        id: MusicId,
    },
    /// Track switched.
    MusicSelected {
        /// Track.
        id: MusicId,
    },
    /// Everything wiped.
    HardReset,
}

/// Bounded FIFO of stamped events.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<Stamped>,
    capacity: usize,
    dropped: u64,
}

impl EventLog {
    /// Empty log holding at most `capacity` events (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(1_024)),
            capacity,
            dropped: 0,
        }
    }

    /// Append, evicting the oldest entry when full.
    pub fn push(&mut self, tick: u64, event: EconomyEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(Stamped { tick, event });
    }

    /// Drain every event, oldest first.
    pub fn take_events(&mut self) -> Vec<Stamped> {
        self.events.drain(..).collect()
    }

    /// Events currently held, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Stamped> {
        self.events.iter()
    }

    /// Number of events held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events evicted since creation.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Discard everything.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
