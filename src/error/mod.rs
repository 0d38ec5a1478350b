//! Error types and handling for Guru
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Errors fall into two groups:
//! - fatal errors, which abort the whole run (validation failures, failed
//!   host commands, failed copies)
//! - record-level errors raised while provisioning accounts, which are
//!   reported and skipped (see [`GuruError::is_fatal`])

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Guru operations
#[derive(Error, Diagnostic, Debug)]
pub enum GuruError {
    // Package validation errors
    #[error("Unsupported package source: {kind}")]
    #[diagnostic(
        code(guru::package::unsupported_source),
        help("Only local package directories can be installed; fetch the package first")
    )]
    UnsupportedSourceKind { kind: String },

    #[error("Invalid package specifier: {spec}")]
    #[diagnostic(
        code(guru::package::invalid_specifier),
        help("A package specifier must name an existing local directory")
    )]
    InvalidPackageSpecifier { spec: String },

    #[error("Invalid package: {path}")]
    #[diagnostic(
        code(guru::package::invalid),
        help("A package root must contain a 'version' file")
    )]
    InvalidPackage { path: String },

    // Account record errors (non-fatal)
    #[error("Invalid {kind} record '{line}': expected {expected} fields, found {fields}")]
    #[diagnostic(code(guru::accounts::invalid_record))]
    InvalidRecord {
        kind: &'static str,
        line: String,
        expected: &'static str,
        fields: usize,
    },

    #[error("Invalid {kind} record '{line}': {field} '{value}' is not a number")]
    #[diagnostic(code(guru::accounts::invalid_id))]
    InvalidRecordId {
        kind: &'static str,
        line: String,
        field: &'static str,
        value: String,
    },

    #[error("{kind} '{name}' already exists")]
    #[diagnostic(code(guru::accounts::exists))]
    AccountExists { kind: &'static str, name: String },

    #[error("User '{name}' has unsupported uid {uid} (maximum is {max})")]
    #[diagnostic(code(guru::accounts::unsupported_uid))]
    UnsupportedUserId { name: String, uid: u32, max: u32 },

    // Stage errors
    #[error("Stage '{stage}' failed for package '{package}'")]
    #[diagnostic(code(guru::installer::stage_failed))]
    StageFailed {
        package: String,
        stage: &'static str,
        #[source]
        source: Box<GuruError>,
    },

    #[error("Failed to look up {kind} '{name}': {reason}")]
    #[diagnostic(code(guru::host::lookup_failed))]
    AccountLookupFailed {
        kind: &'static str,
        name: String,
        reason: String,
    },

    #[error("Command '{command}' failed: {reason}")]
    #[diagnostic(code(guru::host::command_failed))]
    CommandFailed { command: String, reason: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(guru::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(guru::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(guru::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(guru::fs::io_error))]
    IoError { message: String },
}

impl GuruError {
    /// Whether this error aborts the run.
    ///
    /// Record-level provisioning errors are skipped by the account stages
    /// and never escape them.
    #[allow(dead_code)] // Used by tests
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            GuruError::InvalidRecord { .. }
                | GuruError::InvalidRecordId { .. }
                | GuruError::AccountExists { .. }
                | GuruError::UnsupportedUserId { .. }
        )
    }

    /// Wrap an error with the package and stage it was raised in
    pub fn in_stage(self, package: &str, stage: &'static str) -> Self {
        GuruError::StageFailed {
            package: package.to_string(),
            stage,
            source: Box::new(self),
        }
    }
}

impl From<std::io::Error> for GuruError {
    fn from(err: std::io::Error) -> Self {
        GuruError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, GuruError>;
