//! Colon-delimited account records
//!
//! Parses lines shaped like `/etc/group` and `/etc/passwd` entries:
//! - group: `name:password:gid[:member,member,...]`
//! - user: `name:password:uid:gid:comment:home:shell`

use crate::error::{GuruError, Result};

/// Field delimiter used by group and passwd records
pub const DELIMITER: char = ':';

/// Password field value meaning "no password managed here"
pub const PASSWORD_PLACEHOLDER: &str = "x";

/// Split a record line into its fields.
///
/// Empty fields are kept, so `"svc:x:5001:"` yields four fields with an
/// empty member list. The caller decides what a valid field count is.
pub fn parse(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).collect()
}

/// Lines of a record file worth parsing: blank lines and `#` comments are dropped
pub fn record_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
}

/// A parsed group record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub name: String,
    pub password: String,
    pub gid: u32,
    pub members: Vec<String>,
}

/// A parsed user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub password: String,
    pub uid: u32,
    pub gid: u32,
    pub comment: String,
    pub home: String,
    pub shell: String,
}

fn invalid(kind: &'static str, line: &str, expected: &'static str, fields: usize) -> GuruError {
    GuruError::InvalidRecord {
        kind,
        line: line.to_string(),
        expected,
        fields,
    }
}

fn parse_id(kind: &'static str, line: &str, field: &'static str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| GuruError::InvalidRecordId {
        kind,
        line: line.to_string(),
        field,
        value: value.to_string(),
    })
}

impl GroupRecord {
    /// Parse a group line; valid records have 3 or 4 fields
    pub fn parse(line: &str) -> Result<Self> {
        const EXPECTED: &str = "3 or 4";

        let fields = parse(line, DELIMITER);
        if !(3..=4).contains(&fields.len()) || fields[0].is_empty() {
            return Err(invalid("group", line, EXPECTED, fields.len()));
        }

        let members = fields
            .get(3)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            name: fields[0].to_string(),
            password: fields[1].to_string(),
            gid: parse_id("group", line, "gid", fields[2])?,
            members,
        })
    }

    pub fn has_placeholder_password(&self) -> bool {
        self.password == PASSWORD_PLACEHOLDER
    }
}

impl UserRecord {
    /// Parse a passwd line; valid records have exactly 7 fields
    pub fn parse(line: &str) -> Result<Self> {
        const EXPECTED: &str = "7";

        let fields = parse(line, DELIMITER);
        if fields.len() != 7 || fields[0].is_empty() {
            return Err(invalid("user", line, EXPECTED, fields.len()));
        }

        Ok(Self {
            name: fields[0].to_string(),
            password: fields[1].to_string(),
            uid: parse_id("user", line, "uid", fields[2])?,
            gid: parse_id("user", line, "gid", fields[3])?,
            comment: fields[4].to_string(),
            home: fields[5].to_string(),
            shell: fields[6].to_string(),
        })
    }

    pub fn has_placeholder_password(&self) -> bool {
        self.password == PASSWORD_PLACEHOLDER
    }
}
