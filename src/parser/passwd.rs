//! Passwd table pass: validates each account against the group table and
//! merges in its supplementary groups.

use crate::error::AccountError;
use crate::model::{AccountRecord, GroupTable, UserInfo, UserTable};
use crate::parser::{malformed, scan_records};
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse a passwd table against a finished group table.
pub fn parse<R: BufRead>(
    path: &Path,
    reader: R,
    groups: &GroupTable,
) -> Result<UserTable, AccountError> {
    let mut users = UserTable::new();
    let mut uids: HashSet<String> = HashSet::new();

    scan_records(path, reader, |line, fields| {
        let record = AccountRecord::from_fields(fields)
            .ok_or_else(|| malformed(path, line, AccountRecord::FIELDS, fields.len()))?;

        if !groups.contains_gid(record.gid) {
            return Err(AccountError::UnknownGroupReference {
                path: path.to_path_buf(),
                line,
                user: record.name.to_string(),
                gid: record.gid.to_string(),
            });
        }
        if users.contains_key(record.name) {
            return Err(AccountError::DuplicateUserName {
                path: path.to_path_buf(),
                line,
                name: record.name.to_string(),
            });
        }
        // Compared against uids only; a uid equal to another user's name is fine.
        if !uids.insert(record.uid.to_string()) {
            return Err(AccountError::DuplicateUserId {
                path: path.to_path_buf(),
                line,
                uid: record.uid.to_string(),
            });
        }

        let info = UserInfo {
            id: record.uid.to_string(),
            full_name: record.full_name().to_string(),
            groups: groups.groups_of(record.name).to_vec(),
        };
        debug!(user = record.name, uid = record.uid, groups = info.groups.len(), "user merged");
        users.insert(record.name.to_string(), info);
        Ok(())
    })?;

    for member in groups.members.keys() {
        if !users.contains_key(member.as_str()) {
            warn!(user = %member, "group member has no account in {}", path.display());
        }
    }

    info!(path = %path.display(), users = users.len(), "passwd table merged");
    Ok(users)
}
