//! Run configuration and the source preconditions checked before parsing.

use crate::error::{AccountError, Precondition};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_PASSWD_PATH: &str = "/etc/passwd";
pub const DEFAULT_GROUP_PATH: &str = "/etc/group";
pub const DEFAULT_OUTPUT_PATH: &str = "UsersData.json";

/// Paths for a single run, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub passwd_path: PathBuf,
    pub group_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            passwd_path: PathBuf::from(DEFAULT_PASSWD_PATH),
            group_path: PathBuf::from(DEFAULT_GROUP_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl RunConfig {
    /// Both sources must exist and be readable before either is parsed.
    pub fn check_sources(&self) -> Result<(), AccountError> {
        check_readable(&self.passwd_path)?;
        check_readable(&self.group_path)
    }
}

/// Confirm `path` is an existing regular file that can be opened for reading.
pub fn check_readable(path: &Path) -> Result<(), AccountError> {
    let fail = |reason| AccountError::Precondition {
        path: path.to_path_buf(),
        reason,
    };
    if !path.exists() {
        return Err(fail(Precondition::Missing));
    }
    if !path.is_file() {
        return Err(fail(Precondition::NotAFile));
    }
    match File::open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(fail(Precondition::Unreadable)),
        Err(source) => Err(AccountError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
