//! Command implementations for Guru CLI

pub mod completions;
pub mod install;
pub mod version;
