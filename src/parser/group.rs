//! Group table pass: builds the group-id index and the reverse membership
//! index consumed by the passwd pass.

use crate::error::AccountError;
use crate::model::{GroupRecord, GroupTable};
use crate::parser::{malformed, scan_records};
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

/// Parse a group table. `path` is only used to label faults.
pub fn parse<R: BufRead>(path: &Path, reader: R) -> Result<GroupTable, AccountError> {
    let mut table = GroupTable::default();
    let mut names: HashSet<String> = HashSet::new();

    scan_records(path, reader, |line, fields| {
        let record = GroupRecord::from_fields(fields)
            .ok_or_else(|| malformed(path, line, GroupRecord::FIELDS, fields.len()))?;

        if table.ids.contains_key(record.gid) {
            return Err(AccountError::DuplicateGroupId {
                path: path.to_path_buf(),
                line,
                gid: record.gid.to_string(),
            });
        }
        if !names.insert(record.name.to_string()) {
            return Err(AccountError::DuplicateGroupName {
                path: path.to_path_buf(),
                line,
                name: record.name.to_string(),
            });
        }
        table
            .ids
            .insert(record.gid.to_string(), record.name.to_string());

        let mut count = 0;
        for member in record.member_names() {
            let groups = table.members.entry(member.to_string()).or_default();
            // "a,a" lists the user once
            if groups.last().map(String::as_str) != Some(record.name) {
                groups.push(record.name.to_string());
                count += 1;
            }
        }
        debug!(group = record.name, gid = record.gid, members = count, "group parsed");
        Ok(())
    })?;

    info!(
        path = %path.display(),
        groups = table.ids.len(),
        members = table.members.len(),
        "group table loaded"
    );
    Ok(table)
}
