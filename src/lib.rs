//! Find project assets that no entry point depends on.
//!
//! A [`session::Session`] ties a [`index::ProjectIndex`] to a durable
//! [`whitelist::Whitelist`] and keeps the folder-grouped unused set
//! ([`aggregator::UnusedIndex`]) consistent across scans, whitelist changes
//! and deletions.

pub mod aggregator;
pub mod asset;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod output;
pub mod reachability;
pub mod session;
pub mod state;
pub mod whitelist;

pub use error::{AssetGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_UNUSED_FOUND: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
