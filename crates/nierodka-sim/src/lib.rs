//! # Nierodka Sim
//!
//! Headless driver for the Nierodka economy: scripted player strategies,
//! seeded runs on synthetic time, and parallel batches for balance checks.
//!
//! ## Usage
//!
//! ```
//! use nierodka_sim::{run_batch, BatchSummary, RunConfig, StrategyKind};
//!
//! let config = RunConfig {
//!     ticks: 300,
//!     strategy: StrategyKind::GreedyRoi,
//!     ..RunConfig::default()
//! };
//! let reports = run_batch(&[1, 2, 3], &config).unwrap();
//! let summary = BatchSummary::from_reports(&reports).unwrap();
//! assert_eq!(summary.runs, 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod strategy;

pub use config::RunConfig;
pub use error::{SimError, SimResult};
pub use report::{BatchSummary, RunReport, Sample, Tally};
pub use runner::{run, run_batch, SimEconomy};
pub use strategy::{AnyStrategy, Clicker, GreedyRoi, Idle, Strategy, StrategyKind};
