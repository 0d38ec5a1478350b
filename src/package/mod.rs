//! Guru packages
//!
//! A package is a directory holding a `version` manifest and any of the
//! well-known artifacts:
//! - `apt`: system packages to install, one per line
//! - `lib/`, `bin/`, `share/`: trees copied under the install prefix
//! - `fs/`: tree copied onto the root filesystem
//! - `group`, `passwd`: account records to provision
//! - `man/`: manual pages (`*.1` to `*.9`)

pub mod source;

pub use source::PackageSource;

use std::path::{Path, PathBuf};

use crate::error::{GuruError, Result};

/// Manifest file that marks a directory as a package
pub const MANIFEST: &str = "version";

/// A validated package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Canonical package root
    pub root: PathBuf,
    /// Name shown in status output
    pub name: String,
}

impl Package {
    /// Validate a package specifier.
    ///
    /// Read-only: remote sources are rejected, the directory must exist and
    /// contain the manifest.
    pub fn from_specifier(spec: &str) -> Result<Self> {
        let path = match PackageSource::parse(spec)? {
            PackageSource::Dir { path } => path,
            other => {
                return Err(GuruError::UnsupportedSourceKind {
                    kind: other.kind().to_string(),
                });
            }
        };

        if !path.is_dir() {
            return Err(GuruError::InvalidPackageSpecifier {
                spec: spec.to_string(),
            });
        }

        let root = dunce::canonicalize(&path).map_err(|_| GuruError::InvalidPackageSpecifier {
            spec: spec.to_string(),
        })?;

        if !root.join(MANIFEST).is_file() {
            return Err(GuruError::InvalidPackage {
                path: root.display().to_string(),
            });
        }

        let name = display_name(spec, &root);
        Ok(Self { root, name })
    }

    /// Path of an artifact inside the package
    pub fn artifact(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Whether the package ships an artifact
    pub fn has_artifact(&self, relative: &str) -> bool {
        self.artifact(relative).exists()
    }

    #[allow(dead_code)] // Used by tests
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// The specifier as given, or the root's basename for the current directory
fn display_name(spec: &str, root: &Path) -> String {
    let spec = spec.trim();
    if spec != "." && spec != "./" {
        let trimmed = spec.trim_end_matches('/');
        let name = if trimmed.is_empty() { spec } else { trimmed };
        return name.to_string();
    }

    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
