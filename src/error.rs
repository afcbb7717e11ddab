//! Fault taxonomy shared by both table parsers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a source failed its pre-parse checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("can't find file")]
    Missing,
    #[error("not a regular file")]
    NotAFile,
    #[error("permission denied")]
    Unreadable,
}

/// Every fault that can end a run. All of them are terminal.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{}: {reason}", .path.display())]
    Precondition { path: PathBuf, reason: Precondition },
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: malformed record: expected {expected} fields, found {found}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{}:{line}: group id '{gid}' is declared more than once", .path.display())]
    DuplicateGroupId { path: PathBuf, line: usize, gid: String },
    #[error("{}:{line}: group name '{name}' is declared more than once", .path.display())]
    DuplicateGroupName { path: PathBuf, line: usize, name: String },
    #[error("{}:{line}: user name '{name}' is declared more than once", .path.display())]
    DuplicateUserName { path: PathBuf, line: usize, name: String },
    #[error("{}:{line}: user id '{uid}' is assigned to more than one user", .path.display())]
    DuplicateUserId { path: PathBuf, line: usize, uid: String },
    #[error("{}:{line}: user '{user}' references unknown group id '{gid}'", .path.display())]
    UnknownGroupReference {
        path: PathBuf,
        line: usize,
        user: String,
        gid: String,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Discriminant of [`AccountError`] for callers that branch on the fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PreconditionFailure,
    Io,
    MalformedRecord,
    DuplicateGroupId,
    DuplicateGroupName,
    DuplicateUserName,
    DuplicateUserId,
    UnknownGroupReference,
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Precondition { .. } => ErrorKind::PreconditionFailure,
            AccountError::Read { .. } | AccountError::Write { .. } => ErrorKind::Io,
            AccountError::MalformedRecord { .. } => ErrorKind::MalformedRecord,
            AccountError::DuplicateGroupId { .. } => ErrorKind::DuplicateGroupId,
            AccountError::DuplicateGroupName { .. } => ErrorKind::DuplicateGroupName,
            AccountError::DuplicateUserName { .. } => ErrorKind::DuplicateUserName,
            AccountError::DuplicateUserId { .. } => ErrorKind::DuplicateUserId,
            AccountError::UnknownGroupReference { .. } => ErrorKind::UnknownGroupReference,
        }
    }

    /// Source or destination the fault refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            AccountError::Precondition { path, .. }
            | AccountError::Read { path, .. }
            | AccountError::MalformedRecord { path, .. }
            | AccountError::DuplicateGroupId { path, .. }
            | AccountError::DuplicateGroupName { path, .. }
            | AccountError::DuplicateUserName { path, .. }
            | AccountError::DuplicateUserId { path, .. }
            | AccountError::UnknownGroupReference { path, .. }
            | AccountError::Write { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_path_and_line() {
        let err = AccountError::MalformedRecord {
            path: PathBuf::from("/etc/passwd"),
            line: 3,
            expected: 7,
            found: 6,
        };
        assert_eq!(
            err.to_string(),
            "/etc/passwd:3: malformed record: expected 7 fields, found 6"
        );
        assert_eq!(err.kind(), ErrorKind::MalformedRecord);
    }

    #[test]
    fn precondition_message() {
        let err = AccountError::Precondition {
            path: PathBuf::from("missing/group"),
            reason: Precondition::Missing,
        };
        assert_eq!(err.to_string(), "missing/group: can't find file");
        assert_eq!(err.kind(), ErrorKind::PreconditionFailure);
        assert_eq!(err.path(), std::path::Path::new("missing/group"));
    }
}
