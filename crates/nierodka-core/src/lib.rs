//! # Nierodka Core
//!
//! Production and economy engine for the Nierodka incremental clicker.
//!
//! The crate is a deterministic state machine: given a configuration, a
//! seeded random source and a clock, the same sequence of actions and ticks
//! always yields the same state. Rendering, audio and networking live
//! elsewhere and talk to it through [`Economy`].
//!
//! ## Architecture
//!
//! - **Catalog**: static upgrade, hardware, evolution, research and cosmetic
//!   tables ([`catalog`])
//! - **Inventory**: what one player owns ([`inventory`], [`cosmetics`])
//! - **Resolver**: pure function from inventory and production state to
//!   click power and passive income ([`resolver`])
//! - **Actions**: validated mutations returning [`Applied`] or a
//!   [`Rejection`] ([`actions`])
//! - **Scheduler**: the one-second tick with coffee, overclock, crash and
//!   inspection timers ([`scheduler`])
//! - **Persistence**: save format and stores ([`snapshot`], [`persistence`])
//!
//! ## Usage
//!
//! ```
//! use nierodka_core::{Economy, UpgradeId};
//!
//! let mut eco = Economy::with_seed(7);
//! for _ in 0..15 {
//!     eco.click().unwrap();
//! }
//! eco.buy_upgrade(UpgradeId::Chalk).unwrap();
//! assert_eq!(eco.click_power(), 2);
//!
//! eco.tick();
//! let json = eco.snapshot().to_json().unwrap();
//! assert!(json.contains("\"totalClicks\":15"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actions;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod cosmetics;
pub mod engine;
pub mod error;
pub mod events;
pub mod inspection;
pub mod inventory;
pub mod persistence;
pub mod production;
pub mod progress;
pub mod resolver;
pub mod rng;
pub mod scheduler;
pub mod snapshot;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use actions::{Action, Applied, Preview, Purchase};
pub use catalog::{HardwareSlot, MusicId, ResearchId, ThemeId, UpgradeId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EconomyConfig, InspectionConfig};
pub use cosmetics::{Cosmetic, Wardrobe};
pub use engine::Economy;
pub use error::{EconomyError, EconomyResult, Gate, Rejection};
pub use events::{EconomyEvent, EventLog, Stamped};
pub use inventory::{HardwareModifiers, Inventory, OwnedUpgrade};
pub use persistence::{Autosaver, JsonFileStore, MemoryStore, SaveStore, SyncStatus};
pub use production::{ProductionState, TickPhase};
pub use resolver::Resolved;
pub use rng::{ChaChaSource, RandomSource, ScriptedSource};
pub use scheduler::TickReport;
pub use snapshot::{prefer_snapshot, Snapshot};
