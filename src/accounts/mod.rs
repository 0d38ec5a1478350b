//! Group and user provisioning
//!
//! Each record line is handled on its own: malformed records, accounts that
//! already exist and out-of-range uids are reported and skipped, so running
//! the same package twice never fails or duplicates accounts. Password
//! fields other than `x` are ignored with a warning.
//!
//! Groups are created empty. Their member lists are queued in
//! [`PendingMembers`] and attached once the package's users exist; members
//! that still do not exist are reported and skipped.

pub mod records;

use tracing::debug;

use crate::error::{GuruError, Result};
use crate::host::Host;
use crate::ui::Reporter;
use records::{GroupRecord, UserRecord};

/// Numeric thresholds applied when creating users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountPolicy {
    /// Users with a uid below this are created as system accounts
    pub system_id_below: u32,
    /// Largest uid that will be created
    pub max_uid: u32,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            system_id_below: 1000,
            max_uid: 9999,
        }
    }
}

impl AccountPolicy {
    pub fn is_system_uid(&self, uid: u32) -> bool {
        uid < self.system_id_below
    }
}

/// What happened to one record
#[derive(Debug)]
pub enum Provision {
    /// The account was created
    Created,
    /// The record was skipped for a non-fatal reason
    Skipped(GuruError),
}

/// Counts for one provisioning stage
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionSummary {
    pub created: usize,
    pub skipped: usize,
}

impl ProvisionSummary {
    fn record(&mut self, provision: &Provision) {
        match provision {
            Provision::Created => self.created += 1,
            Provision::Skipped(_) => self.skipped += 1,
        }
    }
}

/// Group memberships waiting for their users to be provisioned
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingMembers {
    /// `(group, user)` pairs in record order
    entries: Vec<(String, String)>,
}

impl PendingMembers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every member of a newly created group
    pub fn queue(&mut self, group: &GroupRecord) {
        self.entries.extend(
            group
                .members
                .iter()
                .map(|member| (group.name.clone(), member.clone())),
        );
    }

    #[allow(dead_code)] // Used by tests
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Attach queued members that exist, warning about the rest.
    ///
    /// The queue is emptied. Returns the number of memberships added.
    pub fn attach(&mut self, host: &mut dyn Host, reporter: &mut dyn Reporter) -> Result<usize> {
        let mut added = 0;
        for (group, user) in std::mem::take(&mut self.entries) {
            if !host.user_exists(&user)? {
                reporter.warning(
                    "group",
                    &format!("skipping member '{}' of group '{}': no such user", user, group),
                );
                continue;
            }

            host.add_group_member(&group, &user)?;
            reporter.status("group", &format!("added {} to group {}", user, group));
            added += 1;
        }
        Ok(added)
    }
}

fn warn_ignored_password(reporter: &mut dyn Reporter, stage: &str, name: &str) {
    reporter.warning(
        stage,
        &format!("{}: password field is not 'x', ignoring it", name),
    );
}

/// Provision one group record line, queueing its members
pub fn provision_group(
    line: &str,
    host: &mut dyn Host,
    reporter: &mut dyn Reporter,
    pending: &mut PendingMembers,
) -> Result<Provision> {
    let group = match GroupRecord::parse(line) {
        Ok(group) => group,
        Err(e) => return Ok(Provision::Skipped(e)),
    };

    if host.group_exists(&group.name)? {
        return Ok(Provision::Skipped(GuruError::AccountExists {
            kind: "group",
            name: group.name,
        }));
    }

    if !group.has_placeholder_password() {
        warn_ignored_password(reporter, "group", &group.name);
    }

    debug!("Creating group {:?}", group.name);
    host.create_group(&group)?;
    reporter.status(
        "group",
        &format!("created group {} ({})", group.name, group.gid),
    );
    pending.queue(&group);
    Ok(Provision::Created)
}

/// Provision one user record line
pub fn provision_user(
    line: &str,
    policy: &AccountPolicy,
    host: &mut dyn Host,
    reporter: &mut dyn Reporter,
) -> Result<Provision> {
    let user = match UserRecord::parse(line) {
        Ok(user) => user,
        Err(e) => return Ok(Provision::Skipped(e)),
    };

    if host.user_exists(&user.name)? {
        return Ok(Provision::Skipped(GuruError::AccountExists {
            kind: "user",
            name: user.name,
        }));
    }

    if user.uid > policy.max_uid {
        return Ok(Provision::Skipped(GuruError::UnsupportedUserId {
            name: user.name,
            uid: user.uid,
            max: policy.max_uid,
        }));
    }

    if !user.has_placeholder_password() {
        warn_ignored_password(reporter, "passwd", &user.name);
    }

    let system = policy.is_system_uid(user.uid);
    debug!("Creating user {:?} (system: {})", user.name, system);
    host.create_user(&user, system)?;
    reporter.status(
        "passwd",
        &format!(
            "created {} user {} ({})",
            if system { "system" } else { "normal" },
            user.name,
            user.uid
        ),
    );
    Ok(Provision::Created)
}

/// Provision every record in a group file
pub fn provision_groups(
    content: &str,
    host: &mut dyn Host,
    reporter: &mut dyn Reporter,
    pending: &mut PendingMembers,
) -> Result<ProvisionSummary> {
    let mut summary = ProvisionSummary::default();
    for line in records::record_lines(content) {
        let provision = provision_group(line, host, reporter, pending)?;
        report_skip("group", &provision, reporter);
        summary.record(&provision);
    }
    Ok(summary)
}

/// Provision every record in a passwd file
pub fn provision_users(
    content: &str,
    policy: &AccountPolicy,
    host: &mut dyn Host,
    reporter: &mut dyn Reporter,
) -> Result<ProvisionSummary> {
    let mut summary = ProvisionSummary::default();
    for line in records::record_lines(content) {
        let provision = provision_user(line, policy, host, reporter)?;
        report_skip("passwd", &provision, reporter);
        summary.record(&provision);
    }
    Ok(summary)
}

fn report_skip(stage: &str, provision: &Provision, reporter: &mut dyn Reporter) {
    if let Provision::Skipped(reason) = provision {
        match reason {
            GuruError::AccountExists { .. } => reporter.skipped(stage, &reason.to_string()),
            _ => reporter.warning(stage, &format!("skipping record: {}", reason)),
        }
    }
}
