//! Host adapter backed by the running system
//!
//! On the live root (`/`) existence checks go through the system's account
//! lookup, so NSS-provided accounts count as existing. For any other root
//! the target's `etc/group` and `etc/passwd` are read directly and the
//! account tools get `--root <target>`. Everything else shells out to
//! `groupadd`, `useradd`, `usermod`, `apt-get` and `mandb`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use nix::unistd::{Group, User};
use tracing::{debug, info};

use super::Host;
use crate::accounts::records::{self, DELIMITER, GroupRecord, UserRecord};
use crate::error::{GuruError, Result};

/// [`Host`] implementation that mutates the live system or a target root
#[derive(Debug, Clone)]
pub struct SystemHost {
    /// Root whose account databases are read and written
    root: PathBuf,
}

fn is_live(root: &Path) -> bool {
    root == Path::new("/")
}

impl SystemHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_live_root(&self) -> bool {
        is_live(&self.root)
    }

    fn target_has(&self, file: &str, name: &str) -> Result<bool> {
        database_contains(&self.root.join("etc").join(file), name)
    }

    /// The account tools expect `<root>/etc` to exist
    fn ensure_target_etc(&self) -> Result<()> {
        if self.is_live_root() {
            return Ok(());
        }
        let etc = self.root.join("etc");
        fs::create_dir_all(&etc).map_err(|e| GuruError::FileWriteFailed {
            path: etc.display().to_string(),
            reason: e.to_string(),
        })
    }
}

fn lookup_error(kind: &'static str, name: &str, err: nix::Error) -> GuruError {
    GuruError::AccountLookupFailed {
        kind,
        name: name.to_string(),
        reason: err.to_string(),
    }
}

/// Whether a colon-delimited database has an entry whose first field is `name`.
///
/// A missing database has no entries.
fn database_contains(path: &Path, name: &str) -> Result<bool> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(GuruError::FileReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
        }
    };

    Ok(records::record_lines(&content)
        .filter_map(|line| records::parse(line, DELIMITER).first().copied())
        .any(|entry| entry == name))
}

fn run(mut cmd: Command) -> Result<()> {
    let command = format!("{:?}", cmd);
    debug!("Running {}", command);

    let status = cmd.status().map_err(|e| GuruError::CommandFailed {
        command: command.clone(),
        reason: e.to_string(),
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(GuruError::CommandFailed {
            command,
            reason: match status.code() {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            },
        })
    }
}

/// An account tool, pointed at `root` unless it is the live system
fn account_command(program: &str, root: &Path) -> Command {
    let mut cmd = Command::new(program);
    if !is_live(root) {
        cmd.arg("--root").arg(root);
    }
    cmd
}

fn groupadd_command(group: &GroupRecord, root: &Path) -> Command {
    let mut cmd = account_command("groupadd", root);
    cmd.args(["--gid", &group.gid.to_string()]).arg(&group.name);
    cmd
}

fn useradd_command(user: &UserRecord, system: bool, root: &Path) -> Command {
    let mut cmd = account_command("useradd", root);
    cmd.args(["--uid", &user.uid.to_string()])
        .args(["--gid", &user.gid.to_string()])
        .args(["--comment", &user.comment])
        .args(["--home-dir", &user.home]);
    // Homes inside a target root are laid out by its fs/ overlay
    if is_live(root) {
        cmd.arg("--create-home");
    } else {
        cmd.arg("--no-create-home");
    }
    cmd.args(["--shell", &user.shell]);
    if system {
        cmd.arg("--system");
    }
    cmd.arg(&user.name);
    cmd
}

fn usermod_command(group: &str, user: &str, root: &Path) -> Command {
    let mut cmd = account_command("usermod", root);
    cmd.args(["--append", "--groups", group]).arg(user);
    cmd
}

fn apt_command(names: &[String]) -> Command {
    let mut cmd = Command::new("apt-get");
    cmd.env("DEBIAN_FRONTEND", "noninteractive")
        .args(["install", "-y", "--no-install-recommends"])
        .args(names);
    cmd
}

impl Host for SystemHost {
    fn group_exists(&self, name: &str) -> Result<bool> {
        if self.is_live_root() {
            Group::from_name(name)
                .map(|group| group.is_some())
                .map_err(|e| lookup_error("group", name, e))
        } else {
            self.target_has("group", name)
        }
    }

    fn user_exists(&self, name: &str) -> Result<bool> {
        if self.is_live_root() {
            User::from_name(name)
                .map(|user| user.is_some())
                .map_err(|e| lookup_error("user", name, e))
        } else {
            self.target_has("passwd", name)
        }
    }

    fn create_group(&mut self, group: &GroupRecord) -> Result<()> {
        self.ensure_target_etc()?;
        run(groupadd_command(group, &self.root))?;
        info!(
            "Created group '{}' (gid {}, root: {})",
            group.name,
            group.gid,
            self.root.display()
        );
        Ok(())
    }

    fn add_group_member(&mut self, group: &str, user: &str) -> Result<()> {
        run(usermod_command(group, user, &self.root))?;
        info!("Added '{}' to group '{}'", user, group);
        Ok(())
    }

    fn create_user(&mut self, user: &UserRecord, system: bool) -> Result<()> {
        self.ensure_target_etc()?;
        run(useradd_command(user, system, &self.root))?;
        info!(
            "Created {} user '{}' (uid {}, root: {})",
            if system { "system" } else { "normal" },
            user.name,
            user.uid,
            self.root.display()
        );
        Ok(())
    }

    fn install_system_packages(&mut self, names: &[String]) -> Result<()> {
        run(apt_command(names))?;
        info!("Installed system packages: {}", names.join(" "));
        Ok(())
    }

    fn rebuild_doc_index(&mut self) -> Result<()> {
        let mut cmd = Command::new("mandb");
        cmd.arg("--quiet");
        run(cmd)?;
        info!("Rebuilt manual page index");
        Ok(())
    }
}
