//! Per-package installation
//!
//! This module handles:
//! - The fixed stage sequence, kept as data in [`STAGES`]
//! - Running the sequence for one package ([`install_package`])
//! - The options and context every stage receives
//!
//! Each stage applies one artifact kind. A stage whose artifact is missing
//! from the package is skipped; a failing stage aborts the run without
//! undoing earlier stages. Group members queued by the `group` stage are
//! attached after the sequence, once the package's users exist.

pub mod file_ops;
pub mod stages;

use std::path::PathBuf;

use crate::accounts::{AccountPolicy, PendingMembers};
use crate::error::Result;
use crate::hooks::HookAggregator;
use crate::host::Host;
use crate::package::Package;
use crate::ui::Reporter;

/// Where and how packages get installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Prefix for `bin/`, `lib/` and `share/`
    pub prefix: PathBuf,
    /// Root filesystem the `fs/` overlay is copied onto and accounts are created in
    pub root: PathBuf,
    /// Manual page tree (`man1` ... `man9` live here)
    pub man_dir: PathBuf,
    /// Thresholds for user creation
    pub accounts: AccountPolicy,
}

impl InstallOptions {
    pub const DEFAULT_PREFIX: &'static str = "/usr/local";

    /// Options for a prefix, with the manual tree under `<prefix>/share/man`
    pub fn with_prefix(prefix: impl Into<PathBuf>) -> Self {
        let prefix = prefix.into();
        Self {
            man_dir: prefix.join("share").join("man"),
            prefix,
            root: PathBuf::from("/"),
            accounts: AccountPolicy::default(),
        }
    }
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }
}

/// Everything a stage may touch during a run
pub struct InstallContext<'a> {
    pub options: &'a InstallOptions,
    pub host: &'a mut dyn Host,
    pub reporter: &'a mut dyn Reporter,
    pub hooks: HookAggregator,
    /// Memberships from the current package's `group` records
    pub members: PendingMembers,
}

impl<'a> InstallContext<'a> {
    pub fn new(
        options: &'a InstallOptions,
        host: &'a mut dyn Host,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            options,
            host,
            reporter,
            hooks: HookAggregator::new(),
            members: PendingMembers::new(),
        }
    }
}

/// Function applying one stage to a package
pub type StageFn = fn(&Package, &mut InstallContext<'_>) -> Result<()>;

/// One step of the per-package sequence
#[derive(Clone, Copy)]
pub struct Stage {
    /// Name used in status output and errors
    pub name: &'static str,
    /// Artifact path relative to the package root
    pub artifact: &'static str,
    pub apply: StageFn,
}

impl Stage {
    /// Whether the package ships this stage's artifact
    pub fn applies_to(&self, package: &Package) -> bool {
        package.has_artifact(self.artifact)
    }
}

/// The install sequence, in order.
///
/// Less invasive placements come first, the root overlay after them, and
/// groups before users so a user's primary group can already exist.
pub const STAGES: &[Stage] = &[
    Stage {
        name: "apt",
        artifact: "apt",
        apply: stages::system_dependencies,
    },
    Stage {
        name: "lib",
        artifact: "lib",
        apply: stages::libraries,
    },
    Stage {
        name: "bin",
        artifact: "bin",
        apply: stages::executables,
    },
    Stage {
        name: "share",
        artifact: "share",
        apply: stages::shared_resources,
    },
    Stage {
        name: "fs",
        artifact: "fs",
        apply: stages::root_overlay,
    },
    Stage {
        name: "group",
        artifact: "group",
        apply: stages::groups,
    },
    Stage {
        name: "passwd",
        artifact: "passwd",
        apply: stages::users,
    },
    Stage {
        name: "man",
        artifact: "man",
        apply: stages::documentation,
    },
];

/// How a stage ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Applied,
    Skipped,
}

/// Result of one stage for one package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub stage: &'static str,
    pub status: StageStatus,
}

/// Run every stage for one package, stopping at the first failure, then
/// attach the group members queued along the way.
///
/// Errors are wrapped with the package and stage that raised them.
pub fn install_package(
    package: &Package,
    ctx: &mut InstallContext<'_>,
) -> Result<Vec<StageReport>> {
    let mut reports = Vec::with_capacity(STAGES.len());

    for stage in STAGES {
        let status = if stage.applies_to(package) {
            (stage.apply)(package, ctx).map_err(|e| e.in_stage(&package.name, stage.name))?;
            StageStatus::Applied
        } else {
            ctx.reporter
                .skipped(stage.name, &format!("no '{}' in package", stage.artifact));
            StageStatus::Skipped
        };

        reports.push(StageReport {
            stage: stage.name,
            status,
        });
    }

    ctx.members
        .attach(ctx.host, ctx.reporter)
        .map_err(|e| e.in_stage(&package.name, "group"))?;

    Ok(reports)
}
