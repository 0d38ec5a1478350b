//! Install orchestration
//!
//! Coordinates a batch install:
//! 1. Default to the current directory when no package is given
//! 2. Validate every specifier before touching anything
//! 3. Run the stage sequence for each package, in the given order
//! 4. Fire the deferred hooks once for the whole batch
//!
//! Hooks also fire when a package fails part way, so work already copied by
//! earlier packages (manual pages) is still indexed.

use tracing::{debug, warn};

use crate::error::Result;
use crate::installer::{self, InstallContext, StageReport};
use crate::package::Package;

/// Specifier used when none is given
pub const CURRENT_DIR: &str = ".";

/// Outcome of a successful batch
#[derive(Debug, Default)]
pub struct InstallSummary {
    /// Stage reports per installed package, in install order
    pub packages: Vec<(String, Vec<StageReport>)>,
    /// Deferred hooks that ran after the batch
    pub hooks: Vec<&'static str>,
}

/// Batch install operation
pub struct InstallOperation<'a> {
    ctx: InstallContext<'a>,
}

impl<'a> InstallOperation<'a> {
    pub fn new(ctx: InstallContext<'a>) -> Self {
        Self { ctx }
    }

    /// Validate every specifier, stopping at the first invalid one
    pub fn validate(specifiers: &[String]) -> Result<Vec<Package>> {
        if specifiers.is_empty() {
            return Ok(vec![Package::from_specifier(CURRENT_DIR)?]);
        }

        specifiers
            .iter()
            .map(|spec| Package::from_specifier(spec))
            .collect()
    }

    /// Install a batch of packages.
    ///
    /// Fails fast: nothing is installed if any specifier is invalid, and the
    /// first failing stage aborts the remaining packages. Hooks requested
    /// before the failure still fire; the stage error is returned either way.
    pub fn execute(mut self, specifiers: &[String]) -> Result<InstallSummary> {
        let packages = Self::validate(specifiers)?;
        debug!("Validated {} package(s)", packages.len());

        let mut summary = InstallSummary::default();
        let installed = self.install_all(&packages, &mut summary);

        let fired = self.fire_hooks();
        if let Err(e) = installed {
            if let Err(hook_err) = fired {
                warn!("Deferred hooks failed after aborted install: {}", hook_err);
            }
            return Err(e);
        }

        summary.hooks = fired?;
        Ok(summary)
    }

    fn install_all(&mut self, packages: &[Package], summary: &mut InstallSummary) -> Result<()> {
        let total = packages.len();
        for (index, package) in packages.iter().enumerate() {
            self.ctx.reporter.package(&package.name, index + 1, total);
            let reports = installer::install_package(package, &mut self.ctx)?;
            summary.packages.push((package.name.clone(), reports));
        }
        Ok(())
    }

    fn fire_hooks(&mut self) -> Result<Vec<&'static str>> {
        let fired = self.ctx.hooks.fire_pending(self.ctx.host)?;
        for hook in &fired {
            self.ctx.reporter.hook(hook);
        }
        Ok(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuruError;
    use crate::installer::{InstallOptions, StageStatus};
    use crate::test_fixtures::{FakeHost, PackageBuilder, RecordingReporter};
    use tempfile::TempDir;

    fn spec(package: &crate::test_fixtures::TestPackage) -> String {
        package.package.root.display().to_string()
    }

    #[test]
    fn test_invalid_second_package_installs_nothing() {
        let first = PackageBuilder::new("first")
            .file("bin/first", "bin")
            .file("group", "first:x:5001\n")
            .build();
        let target = TempDir::new().unwrap();
        let options = InstallOptions::with_prefix(target.path());
        let mut host = FakeHost::new();
        let mut reporter = RecordingReporter::default();

        let specifiers = vec![spec(&first), "github:author/second".to_string()];
        let result = InstallOperation::new(InstallContext::new(
            &options,
            &mut host,
            &mut reporter,
        ))
        .execute(&specifiers);

        assert!(matches!(
            result,
            Err(GuruError::UnsupportedSourceKind { .. })
        ));
        assert!(host.calls.is_empty());
        assert!(reporter.events.is_empty());
        assert!(!target.path().join("bin").exists());
    }

    #[test]
    fn test_packages_install_in_order() {
        let a = PackageBuilder::new("a").file("bin/a", "a").build();
        let b = PackageBuilder::new("b").file("bin/b", "b").build();
        let target = TempDir::new().unwrap();
        let options = InstallOptions::with_prefix(target.path());
        let mut host = FakeHost::new();
        let mut reporter = RecordingReporter::default();

        let summary = InstallOperation::new(InstallContext::new(
            &options,
            &mut host,
            &mut reporter,
        ))
        .execute(&[spec(&b), spec(&a)])
        .unwrap();

        let names: Vec<&str> = summary.packages.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec![spec(&b), spec(&a)]);
        assert!(target.path().join("bin/a").is_file());
        assert!(target.path().join("bin/b").is_file());
        assert!(summary.hooks.is_empty());
    }

    #[test]
    fn test_hooks_fire_once_per_batch() {
        let a = PackageBuilder::new("a").file("man/a.1", "a").build();
        let b = PackageBuilder::new("b").file("man/b.5", "b").build();
        let target = TempDir::new().unwrap();
        let options = InstallOptions::with_prefix(target.path());
        let mut host = FakeHost::new();
        let mut reporter = RecordingReporter::default();

        let summary = InstallOperation::new(InstallContext::new(
            &options,
            &mut host,
            &mut reporter,
        ))
        .execute(&[spec(&a), spec(&b)])
        .unwrap();

        assert_eq!(summary.hooks, vec!["man-db"]);
        assert_eq!(host.doc_index_rebuilds, 1);
        assert!(reporter.events.iter().any(|e| e.starts_with("hook")));
    }

    #[test]
    fn test_reinstall_is_idempotent_for_accounts() {
        let package = PackageBuilder::new("svc")
            .file("group", "svc:x:5001:alice,bob\n")
            .file("passwd", "svc:x:500:5001:Service:/home/svc:/bin/false\n")
            .build();
        let target = TempDir::new().unwrap();
        let options = InstallOptions::with_prefix(target.path());
        let mut host = FakeHost::new();

        for _ in 0..2 {
            let mut reporter = RecordingReporter::default();
            InstallOperation::new(InstallContext::new(&options, &mut host, &mut reporter))
                .execute(&[spec(&package)])
                .unwrap();
        }

        assert_eq!(host.groups.len(), 1);
        assert_eq!(host.users.len(), 1);
        assert_eq!(
            host.calls,
            vec!["groupadd svc".to_string(), "useradd svc".to_string()]
        );
    }

    #[test]
    fn test_stage_failure_stops_batch() {
        let a = PackageBuilder::new("a").file("apt", "curl\n").build();
        let b = PackageBuilder::new("b").file("bin/b", "b").build();
        let target = TempDir::new().unwrap();
        let options = InstallOptions::with_prefix(target.path());
        let mut host = FakeHost::new();
        host.fail_on = Some("apt-get");
        let mut reporter = RecordingReporter::default();

        let err = InstallOperation::new(InstallContext::new(&options, &mut host, &mut reporter))
            .execute(&[spec(&a), spec(&b)])
            .unwrap_err();

        assert!(matches!(err, GuruError::StageFailed { stage: "apt", .. }));
        assert!(!target.path().join("bin/b").exists());
        assert_eq!(host.doc_index_rebuilds, 0);
    }

    #[test]
    fn test_pages_from_earlier_package_indexed_when_later_fails() {
        let a = PackageBuilder::new("a").file("man/a.1", "a").build();
        let b = PackageBuilder::new("b").file("apt", "curl\n").build();
        let target = TempDir::new().unwrap();
        let options = InstallOptions::with_prefix(target.path());
        let mut host = FakeHost::new();
        host.fail_on = Some("apt-get");
        let mut reporter = RecordingReporter::default();

        let err = InstallOperation::new(InstallContext::new(&options, &mut host, &mut reporter))
            .execute(&[spec(&a), spec(&b)])
            .unwrap_err();

        assert!(matches!(err, GuruError::StageFailed { stage: "apt", .. }));
        assert!(target.path().join("share/man/man1/a.1").is_file());
        assert_eq!(host.doc_index_rebuilds, 1);
        assert!(reporter.events.iter().any(|e| e == "hook man-db"));
    }

    #[test]
    fn test_every_stage_reported_per_package() {
        let package = PackageBuilder::new("p").file("share/p/x", "x").build();
        let target = TempDir::new().unwrap();
        let options = InstallOptions::with_prefix(target.path());
        let mut host = FakeHost::new();
        let mut reporter = RecordingReporter::default();

        let summary = InstallOperation::new(InstallContext::new(
            &options,
            &mut host,
            &mut reporter,
        ))
        .execute(&[spec(&package)])
        .unwrap();

        let (_, reports) = &summary.packages[0];
        assert_eq!(reports.len(), installer::STAGES.len());
        assert_eq!(
            reports
                .iter()
                .filter(|r| r.status == StageStatus::Applied)
                .count(),
            1
        );
    }
}
