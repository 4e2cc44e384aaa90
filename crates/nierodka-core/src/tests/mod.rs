//! Crate-level tests that exercise the engine end to end.
//!
//! - `determinism.rs`: same seed and inputs give the same state
//! - `integration.rs`: worked scenarios across actions, ticks and saves
//! - `properties.rs`: proptest invariants over random action sequences
//! - `helpers.rs`: economy factories and a scripted player

mod determinism;
mod helpers;
