//! vault-tools library.
//!
//! Obsidian-to-Hugo synchronization and a staged-diff review helper.

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod git;
pub mod sync;

pub use config::VaultConfig;
pub use error::Error;
pub use sync::{SyncReport, Synchronizer};
