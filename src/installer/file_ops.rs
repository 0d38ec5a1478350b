//! Basic file operations for package installation
//!
//! This module handles low-level file operations:
//! - Directory creation (ensure_dir)
//! - Tree overlay (copy_tree)
//! - Single file copies (copy_file)

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{GuruError, Result};

fn file_read_error(path: &Path, e: impl ToString) -> GuruError {
    GuruError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn file_write_error(path: &Path, e: impl ToString) -> GuruError {
    GuruError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| file_write_error(path, e))
}

/// Copy one file, creating the target's parent directory
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(source, target)
        .map_err(|e| file_write_error(target, e))
        .map(|_| ())
}

#[cfg(unix)]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    let link = fs::read_link(source).map_err(|e| file_read_error(source, e))?;
    if fs::symlink_metadata(target).is_ok() {
        fs::remove_file(target).map_err(|e| file_write_error(target, e))?;
    }
    std::os::unix::fs::symlink(&link, target).map_err(|e| file_write_error(target, e))
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, target: &Path) -> Result<()> {
    copy_file(source, target)
}

/// Overlay `source`'s contents onto `dest`.
///
/// `dest` is created if needed, relative paths are preserved and existing
/// files at the same path are overwritten. Files already in `dest` that the
/// source does not have are left alone. Returns the number of entries copied
/// (files and symlinks).
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    ensure_dir(dest)?;

    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| file_read_error(source, e))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| file_read_error(entry.path(), e))?;
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            ensure_dir(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
            copied += 1;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    debug!(
        "Copied {} entries from {} to {}",
        copied,
        source.display(),
        dest.display()
    );
    Ok(copied)
}
