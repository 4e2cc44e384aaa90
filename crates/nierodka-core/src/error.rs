//! Error types.
//!
//! Two families live here. [`EconomyError`] is a real failure at a boundary:
//! parsing an id, decoding a snapshot, talking to a save store.
//! [`Rejection`] is the refusal of a player action; it always means the
//! economy is exactly as it was before the call.

use std::fmt;

use thiserror::Error;

use crate::catalog::{HardwareSlot, ResearchId, UpgradeId};
use crate::cosmetics::Cosmetic;

/// Failure outside the action surface.
#[derive(Debug, Error)]
pub enum EconomyError {
    /// A string did not name any catalog entry.
    #[error("unknown {kind} id `{id}`")]
    UnknownId {
        /// Kind of identifier that was expected.
        kind: &'static str,
        /// The offending string.
        id: String,
    },

    /// Configuration failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// Snapshot JSON could not be decoded or encoded.
    #[error("snapshot codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A save store reported a failure of its own.
    #[error("persistence error: {0}")]
    Persistence(String),
}

/// Shorthand result type for fallible economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;

/// Precondition a locked action is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Upgrade tier above what the installed keyboard unlocks.
    ShopTier {
        /// Tier of the upgrade.
        required: u8,
        /// Highest tier currently unlocked.
        unlocked: u8,
    },
    /// Hardware tiers above 1 need the IT certificate.
    ItCertificate,
    /// Coffee needs caffeine research.
    CaffeineResearch,
    /// Overclocking needs the license.
    OverclockLicense,
    /// Evolving needs at least one level of the base upgrade.
    BaseUpgrade(UpgradeId),
    /// Research prerequisite missing.
    Prerequisite(ResearchId),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::ShopTier { required, unlocked } => {
                write!(f, "shop tier {required} (keyboard unlocks {unlocked})")
            }
            Gate::ItCertificate => f.write_str("research `it_certificate`"),
            Gate::CaffeineResearch => f.write_str("research `caffeine_research`"),
            Gate::OverclockLicense => f.write_str("research `overclock_license`"),
            Gate::BaseUpgrade(id) => write!(f, "owning `{id}`"),
            Gate::Prerequisite(id) => write!(f, "research `{id}`"),
        }
    }
}

/// Why an action was refused. Carries enough context for a UI message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Not enough points.
    #[error("costs {cost}, only {available} available")]
    InsufficientFunds {
        /// Price of the action.
        cost: u64,
        /// Points held.
        available: u64,
    },

    /// Hardware purchases go one tier at a time.
    #[error("{slot} is at tier {current}, cannot go to tier {requested}")]
    TierOutOfSequence {
        /// Slot being upgraded.
        slot: HardwareSlot,
        /// Installed tier.
        current: u32,
        /// Requested tier.
        requested: u32,
    },

    /// The catalog defines no such tier.
    #[error("{slot} has no tier {tier}")]
    UnknownTier {
        /// Slot being upgraded.
        slot: HardwareSlot,
        /// Requested tier.
        tier: u32,
    },

    /// A gate is closed.
    #[error("requires {0}")]
    Locked(Gate),

    /// The upgrade has no evolution stages.
    #[error("`{0}` cannot evolve")]
    NotEvolvable(UpgradeId),

    /// The upgrade is at its last stage.
    #[error("`{0}` is fully evolved")]
    FullyEvolved(UpgradeId),

    /// Research is one-shot.
    #[error("research `{0}` already unlocked")]
    AlreadyUnlocked(ResearchId),

    /// Cosmetic already bought.
    #[error("{0} already owned")]
    AlreadyOwned(Cosmetic),

    /// Cosmetic must be bought before it can be selected.
    #[error("{0} not owned")]
    NotOwned(Cosmetic),

    /// The mug is already full.
    #[error("coffee is already full")]
    CoffeeFull,

    /// An overclock is already running.
    #[error("overclock active for {remaining} more seconds")]
    OverclockActive {
        /// Seconds left on the running overclock.
        remaining: u32,
    },

    /// The machine is rebooting.
    #[error("crashed, {remaining} seconds to recovery")]
    Crashed {
        /// Seconds until recovery.
        remaining: u32,
    },

    /// Prestige needs a minimum balance.
    #[error("prestige needs {required} points, have {available}")]
    PrestigeThreshold {
        /// Threshold.
        required: u64,
        /// Points held.
        available: u64,
    },

    /// There is no inspection to claim.
    #[error("no inspection to claim")]
    NoInspection,
}
