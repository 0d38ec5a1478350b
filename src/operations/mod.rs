//! High-level operations
//!
//! - InstallOperation: validate a batch of packages, install them in order
//!   and fire the deferred hooks

pub mod install;
