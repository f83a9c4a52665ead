//! Crate-level tests for resolution and transactions.
//!
//! - `determinism.rs`: same seed and inputs give the same options, rolls,
//!   and snapshot hashes
//! - `integration.rs`: end-to-end sessions against a block world
//! - `helpers.rs`: fixture catalog, item table, worlds, and a harness

mod determinism;
mod helpers;

pub use helpers::*;
