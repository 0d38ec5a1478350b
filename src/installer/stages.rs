//! Stage handlers
//!
//! One function per artifact kind. Each is only called when its artifact
//! exists in the package (see [`super::STAGES`]).

use std::fs;
use std::path::{Path, PathBuf};

use crate::accounts;
use crate::error::{GuruError, Result};
use crate::package::Package;

use super::InstallContext;
use super::file_ops::{copy_file, copy_tree, ensure_dir};

/// Manual sections installed by the documentation stage
pub const MAN_SECTIONS: std::ops::RangeInclusive<u8> = 1..=9;

fn read_artifact(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| GuruError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Package names listed in an `apt` file.
///
/// Blank lines and `#` comments, whole-line or trailing, are dropped.
pub fn parse_dependency_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}

/// Install the system packages listed in `apt`
pub fn system_dependencies(package: &Package, ctx: &mut InstallContext<'_>) -> Result<()> {
    let names = parse_dependency_list(&read_artifact(&package.artifact("apt"))?);
    if names.is_empty() {
        ctx.reporter.skipped("apt", "no system packages listed");
        return Ok(());
    }

    ctx.reporter
        .status("apt", &format!("installing {}", names.join(" ")));
    ctx.host.install_system_packages(&names)
}

fn overlay(
    package: &Package,
    ctx: &mut InstallContext<'_>,
    stage: &str,
    dest: PathBuf,
) -> Result<()> {
    let copied = copy_tree(&package.artifact(stage), &dest)?;
    ctx.reporter.status(
        stage,
        &format!("copied {} file(s) to {}", copied, dest.display()),
    );
    Ok(())
}

/// Copy `lib/` into `<prefix>/lib`
pub fn libraries(package: &Package, ctx: &mut InstallContext<'_>) -> Result<()> {
    let dest = ctx.options.prefix.join("lib");
    overlay(package, ctx, "lib", dest)
}

/// Copy `bin/` into `<prefix>/bin`
pub fn executables(package: &Package, ctx: &mut InstallContext<'_>) -> Result<()> {
    let dest = ctx.options.prefix.join("bin");
    overlay(package, ctx, "bin", dest)
}

/// Copy `share/` into `<prefix>/share`
pub fn shared_resources(package: &Package, ctx: &mut InstallContext<'_>) -> Result<()> {
    let dest = ctx.options.prefix.join("share");
    overlay(package, ctx, "share", dest)
}

/// Copy `fs/` onto the root filesystem
pub fn root_overlay(package: &Package, ctx: &mut InstallContext<'_>) -> Result<()> {
    let dest = ctx.options.root.clone();
    overlay(package, ctx, "fs", dest)
}

/// Provision the records in `group`
pub fn groups(package: &Package, ctx: &mut InstallContext<'_>) -> Result<()> {
    let content = read_artifact(&package.artifact("group"))?;
    let summary =
        accounts::provision_groups(&content, ctx.host, ctx.reporter, &mut ctx.members)?;
    tracing::debug!(
        "Groups for {}: {} created, {} skipped",
        package.name,
        summary.created,
        summary.skipped
    );
    Ok(())
}

/// Provision the records in `passwd`
pub fn users(package: &Package, ctx: &mut InstallContext<'_>) -> Result<()> {
    let content = read_artifact(&package.artifact("passwd"))?;
    let summary =
        accounts::provision_users(&content, &ctx.options.accounts, ctx.host, ctx.reporter)?;
    tracing::debug!(
        "Users for {}: {} created, {} skipped",
        package.name,
        summary.created,
        summary.skipped
    );
    Ok(())
}

/// Files in `man/` whose extension is the section number, sorted by name
fn section_pages(man: &Path, section: u8) -> Result<Vec<PathBuf>> {
    let suffix = section.to_string();
    let mut pages = Vec::new();

    for entry in fs::read_dir(man)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == suffix.as_str()) {
            pages.push(path);
        }
    }

    pages.sort();
    Ok(pages)
}

/// Copy `man/*.N` into `<man_dir>/manN` and request an index rebuild
pub fn documentation(package: &Package, ctx: &mut InstallContext<'_>) -> Result<()> {
    let man = package.artifact("man");
    let mut copied = 0;

    for section in MAN_SECTIONS {
        let pages = section_pages(&man, section)?;
        if pages.is_empty() {
            continue;
        }

        let dest = ctx.options.man_dir.join(format!("man{}", section));
        ensure_dir(&dest)?;
        for page in &pages {
            if let Some(file_name) = page.file_name() {
                copy_file(page, &dest.join(file_name))?;
                copied += 1;
            }
        }
    }

    if copied == 0 {
        ctx.reporter.skipped("man", "no manual pages found");
        return Ok(());
    }

    ctx.hooks.request_doc_index();
    ctx.reporter.status(
        "man",
        &format!(
            "installed {} manual page(s) to {}",
            copied,
            ctx.options.man_dir.display()
        ),
    );
    Ok(())
}
