//! Host capabilities used by the installer
//!
//! Every side effect outside the package's own file copies goes through the
//! [`Host`] trait: the account database, the system package manager and the
//! documentation index. [`SystemHost`] is the real adapter that runs the
//! usual system tools against the live system or a target root.

pub mod system;

pub use system::SystemHost;

use crate::accounts::records::{GroupRecord, UserRecord};
use crate::error::Result;

/// Host operations the pipeline depends on
pub trait Host {
    /// Whether a group with this name is already known to the host
    fn group_exists(&self, name: &str) -> Result<bool>;

    /// Whether a user with this name is already known to the host
    fn user_exists(&self, name: &str) -> Result<bool>;

    /// Create an empty group with the record's gid.
    ///
    /// The record's password field is never applied. Members are attached
    /// separately once they exist.
    fn create_group(&mut self, group: &GroupRecord) -> Result<()>;

    /// Add an existing user to an existing group
    fn add_group_member(&mut self, group: &str, user: &str) -> Result<()>;

    /// Create a user with the record's ids, comment, home and shell.
    ///
    /// `system` marks a service account. The home directory is created.
    fn create_user(&mut self, user: &UserRecord, system: bool) -> Result<()>;

    /// Install system packages non-interactively
    fn install_system_packages(&mut self, names: &[String]) -> Result<()>;

    /// Rebuild the documentation search index
    fn rebuild_doc_index(&mut self) -> Result<()>;
}
