//! JSON rendering of the merged table and atomic write of the result.

use crate::error::AccountError;
use crate::model::UserTable;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const INDENT: &[u8] = b"    ";

/// Pretty-print the table with four-space indentation and a trailing newline.
/// Key order is the table's insertion order.
pub fn render_json(users: &UserTable) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    users.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `contents` to `path` through a sibling temp file, so `path` is either
/// left untouched or fully replaced.
pub fn write_output(path: &Path, contents: &str) -> Result<(), AccountError> {
    let to_err = |source: io::Error| AccountError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(to_err)?;
    tmp.write_all(contents.as_bytes()).map_err(to_err)?;
    tmp.as_file().sync_all().map_err(to_err)?;
    tmp.persist(path).map_err(|e| to_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserInfo;
    use tempfile::TempDir;

    fn sample() -> UserTable {
        let mut users = UserTable::new();
        users.insert(
            "zed".into(),
            UserInfo {
                id: "1001".into(),
                full_name: "Zed".into(),
                groups: vec![],
            },
        );
        users.insert(
            "alice".into(),
            UserInfo {
                id: "1000".into(),
                full_name: "Alice Smith".into(),
                groups: vec!["sudo".into(), "adm".into()],
            },
        );
        users
    }

    #[test]
    fn renders_four_space_indent_in_insertion_order() {
        let out = render_json(&sample()).unwrap();
        let expected = r#"{
    "zed": {
        "id": "1001",
        "full_name": "Zed",
        "groups": []
    },
    "alice": {
        "id": "1000",
        "full_name": "Alice Smith",
        "groups": [
            "sudo",
            "adm"
        ]
    }
}
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_table_is_empty_object() {
        assert_eq!(render_json(&UserTable::new()).unwrap(), "{}\n");
    }

    #[test]
    fn write_output_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("UsersData.json");
        std::fs::write(&path, "stale").unwrap();

        write_output(&path, "{}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn write_output_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/out.json");
        let err = write_output(&path, "{}\n").unwrap_err();
        assert!(matches!(err, AccountError::Write { .. }));
    }
}
