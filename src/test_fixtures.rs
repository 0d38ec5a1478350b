//! Test fixtures and utilities for reducing test setup duplication.
//!
//! - [`FakeHost`]: in-memory account database that records every host call
//! - [`RecordingReporter`]: collects status events as strings
//! - [`PackageBuilder`]: writes a package into a temp directory
//!
//! # Usage
//!
//! ```ignore
//! let package = PackageBuilder::new("svc").file("group", "svc:x:5001\n").build();
//! let mut host = FakeHost::new();
//! ```

#![allow(clippy::expect_used)]

use std::collections::{BTreeMap, BTreeSet};

use tempfile::TempDir;

use crate::accounts::records::{GroupRecord, UserRecord};
use crate::error::{GuruError, Result};
use crate::host::Host;
use crate::package::{MANIFEST, Package};
use crate::ui::Reporter;

/// Host double that keeps accounts in memory
#[derive(Debug, Default)]
pub struct FakeHost {
    /// Groups created through the host, by name
    pub groups: BTreeMap<String, GroupRecord>,
    /// Users created through the host, with their system flag
    pub users: BTreeMap<String, (UserRecord, bool)>,
    /// Members attached to each group, in order
    pub members: BTreeMap<String, Vec<String>>,
    /// Accounts that existed before the test
    pub existing_groups: BTreeSet<String>,
    pub existing_users: BTreeSet<String>,
    /// Every system package requested, in order
    pub installed_packages: Vec<String>,
    pub doc_index_rebuilds: usize,
    /// `"<command> <subject>"` for every mutating call
    pub calls: Vec<String>,
    /// Command name that should fail (`groupadd`, `useradd`, `usermod`, `apt-get`, `mandb`)
    pub fail_on: Option<&'static str>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_existing_group(&mut self, name: &str) {
        self.existing_groups.insert(name.to_string());
    }

    pub fn add_existing_user(&mut self, name: &str) {
        self.existing_users.insert(name.to_string());
    }

    fn call(&mut self, command: &'static str, subject: &str) -> Result<()> {
        if self.fail_on == Some(command) {
            return Err(GuruError::CommandFailed {
                command: command.to_string(),
                reason: "exit code 1".to_string(),
            });
        }
        self.calls.push(format!("{} {}", command, subject));
        Ok(())
    }
}

impl Host for FakeHost {
    fn group_exists(&self, name: &str) -> Result<bool> {
        Ok(self.groups.contains_key(name) || self.existing_groups.contains(name))
    }

    fn user_exists(&self, name: &str) -> Result<bool> {
        Ok(self.users.contains_key(name) || self.existing_users.contains(name))
    }

    fn create_group(&mut self, group: &GroupRecord) -> Result<()> {
        self.call("groupadd", &group.name)?;
        self.groups.insert(group.name.clone(), group.clone());
        Ok(())
    }

    fn add_group_member(&mut self, group: &str, user: &str) -> Result<()> {
        self.call("usermod", &format!("{} {}", group, user))?;
        self.members
            .entry(group.to_string())
            .or_default()
            .push(user.to_string());
        Ok(())
    }

    fn create_user(&mut self, user: &UserRecord, system: bool) -> Result<()> {
        self.call("useradd", &user.name)?;
        self.users.insert(user.name.clone(), (user.clone(), system));
        Ok(())
    }

    fn install_system_packages(&mut self, names: &[String]) -> Result<()> {
        self.call("apt-get", &names.join(" "))?;
        self.installed_packages.extend_from_slice(names);
        Ok(())
    }

    fn rebuild_doc_index(&mut self) -> Result<()> {
        self.call("mandb", "")?;
        self.doc_index_rebuilds += 1;
        Ok(())
    }
}

/// Reporter that keeps every event as `"<kind> <stage>: <message>"`
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl RecordingReporter {
    fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.events
            .iter()
            .filter(move |e| e.split(' ').next() == Some(kind))
    }

    pub fn skips(&self) -> impl Iterator<Item = &String> {
        self.of_kind("skipped")
    }

    pub fn has_skip(&self, needle: &str) -> bool {
        self.skips().any(|e| e.contains(needle))
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.of_kind("warning").any(|e| e.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn package(&mut self, name: &str, current: usize, total: usize) {
        self.events
            .push(format!("package {}: {}/{}", name, current, total));
    }

    fn status(&mut self, stage: &str, message: &str) {
        self.events.push(format!("status {}: {}", stage, message));
    }

    fn skipped(&mut self, stage: &str, message: &str) {
        self.events.push(format!("skipped {}: {}", stage, message));
    }

    fn warning(&mut self, stage: &str, message: &str) {
        self.events.push(format!("warning {}: {}", stage, message));
    }

    fn hook(&mut self, name: &str) {
        self.events.push(format!("hook {}", name));
    }
}

/// A package written to a temp directory
pub struct TestPackage {
    /// Keeps the directory alive
    #[allow(dead_code)]
    pub temp: TempDir,
    pub package: Package,
}

/// Builder for packages on disk
pub struct PackageBuilder {
    name: String,
    files: Vec<(String, String)>,
}

impl PackageBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            files: vec![(MANIFEST.to_string(), "1.0.0\n".to_string())],
        }
    }

    /// Add a file, relative to the package root
    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.files.push((path.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> TestPackage {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join(&self.name);
        std::fs::create_dir_all(&root).expect("Failed to create package root");

        for (path, content) in &self.files {
            let file = root.join(path);
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent directory");
            }
            std::fs::write(&file, content).expect("Failed to write package file");
        }

        let root = dunce::canonicalize(&root).expect("Failed to canonicalize package root");
        TestPackage {
            temp,
            package: Package {
                root,
                name: self.name,
            },
        }
    }
}
