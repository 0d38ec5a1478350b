//! Package specifier parsing
//!
//! Supported formats:
//! - Local directory paths: `.`, `./pkg`, `/srv/packages/pkg`
//!
//! Recognized but not installable:
//! - Remote URLs: `http://...`, `https://...`
//! - GitHub shorthand: `github:author/repo`

use std::path::PathBuf;

use crate::error::{GuruError, Result};

/// Represents a parsed package specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// Package served over HTTP(S)
    Remote { url: String },
    /// Package in a GitHub repository
    GitHub { repo: String },
    /// Package directory on the local filesystem
    Dir { path: PathBuf },
}

impl PackageSource {
    /// Classify a specifier without touching the filesystem
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(GuruError::InvalidPackageSpecifier {
                spec: input.to_string(),
            });
        }

        if input.starts_with("http:") || input.starts_with("https:") {
            return Ok(PackageSource::Remote {
                url: input.to_string(),
            });
        }

        if let Some(repo) = input.strip_prefix("github:") {
            return Ok(PackageSource::GitHub {
                repo: repo.to_string(),
            });
        }

        Ok(PackageSource::Dir {
            path: PathBuf::from(input),
        })
    }

    /// Short name of the source kind, as reported in errors
    pub fn kind(&self) -> &'static str {
        match self {
            PackageSource::Remote { .. } => "remote",
            PackageSource::GitHub { .. } => "github",
            PackageSource::Dir { .. } => "dir",
        }
    }

    #[allow(dead_code)] // Used by tests
    pub fn is_local(&self) -> bool {
        matches!(self, PackageSource::Dir { .. })
    }
}
