//! Record types for both account tables and the merged output.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// One line of the user-account table, borrowed from the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRecord<'a> {
    pub name: &'a str,
    pub uid: &'a str,
    pub gid: &'a str,
    /// Raw GECOS field (comma-separated)
    pub gecos: &'a str,
    #[allow(dead_code)]
    pub home: &'a str,
    #[allow(dead_code)]
    pub shell: &'a str,
}

impl<'a> AccountRecord<'a> {
    pub const FIELDS: usize = 7;

    /// Build from an already split line. `None` when the arity is wrong.
    pub fn from_fields(fields: &[&'a str]) -> Option<Self> {
        match *fields {
            [name, _password, uid, gid, gecos, home, shell] => Some(Self {
                name,
                uid,
                gid,
                gecos,
                home,
                shell,
            }),
            _ => None,
        }
    }

    /// First GECOS segment, conventionally the full name.
    pub fn full_name(&self) -> &'a str {
        self.gecos.split(',').next().unwrap_or_default()
    }
}

/// One line of the group table, borrowed from the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRecord<'a> {
    pub name: &'a str,
    pub gid: &'a str,
    /// Raw member list (comma-separated, may be empty)
    pub members: &'a str,
}

impl<'a> GroupRecord<'a> {
    pub const FIELDS: usize = 4;

    pub fn from_fields(fields: &[&'a str]) -> Option<Self> {
        match *fields {
            [name, _password, gid, members] => Some(Self { name, gid, members }),
            _ => None,
        }
    }

    /// Member names after splitting; blank segments are not members.
    pub fn member_names(&self) -> impl Iterator<Item = &'a str> {
        self.members
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// group-id → group name
pub type GroupIdIndex = HashMap<String, String>;

/// user name → group names listing that user, in group-table order
pub type MembershipIndex = HashMap<String, Vec<String>>;

/// Result of the group pass. Read-only once built.
#[derive(Debug, Default)]
pub struct GroupTable {
    pub ids: GroupIdIndex,
    pub members: MembershipIndex,
}

impl GroupTable {
    pub fn contains_gid(&self, gid: &str) -> bool {
        self.ids.contains_key(gid)
    }

    /// Supplementary groups of `user`; empty when no group lists it.
    pub fn groups_of(&self, user: &str) -> &[String] {
        self.members.get(user).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Merged output entry for a single account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub full_name: String,
    pub groups: Vec<String>,
}

/// user name → UserInfo, in user-table order
pub type UserTable = IndexMap<String, UserInfo>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_needs_seven_fields() {
        let fields: Vec<&str> = "alice:x:1000:27:Alice:/home/alice".split(':').collect();
        assert!(AccountRecord::from_fields(&fields).is_none());

        let fields: Vec<&str> = "alice:x:1000:27:Alice:/home/alice:/bin/sh"
            .split(':')
            .collect();
        let rec = AccountRecord::from_fields(&fields).unwrap();
        assert_eq!(rec.name, "alice");
        assert_eq!(rec.uid, "1000");
        assert_eq!(rec.gid, "27");
    }

    #[test]
    fn full_name_is_first_gecos_segment() {
        let fields = ["a", "x", "1", "1", "Alice Smith,Room 4,555", "/", "/bin/sh"];
        assert_eq!(AccountRecord::from_fields(&fields).unwrap().full_name(), "Alice Smith");

        let fields = ["a", "x", "1", "1", "Mailing List Manager", "/", "/bin/sh"];
        assert_eq!(
            AccountRecord::from_fields(&fields).unwrap().full_name(),
            "Mailing List Manager"
        );

        let fields = ["a", "x", "1", "1", ",,,", "/", "/bin/sh"];
        assert_eq!(AccountRecord::from_fields(&fields).unwrap().full_name(), "");
    }

    #[test]
    fn member_names_skip_blank_segments() {
        let rec = GroupRecord::from_fields(&["sudo", "x", "27", "alice,bob"]).unwrap();
        assert_eq!(rec.member_names().collect::<Vec<_>>(), ["alice", "bob"]);

        let rec = GroupRecord::from_fields(&["adm", "x", "4", ""]).unwrap();
        assert_eq!(rec.member_names().count(), 0);

        let rec = GroupRecord::from_fields(&["adm", "x", "4", ","]).unwrap();
        assert_eq!(rec.member_names().count(), 0);
    }

    #[test]
    fn single_character_member_is_a_name() {
        let rec = GroupRecord::from_fields(&["g", "x", "5", "a"]).unwrap();
        assert_eq!(rec.member_names().collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn groups_of_unknown_user_is_empty() {
        let table = GroupTable::default();
        assert!(table.groups_of("nobody").is_empty());
    }
}
