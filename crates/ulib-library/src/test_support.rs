//! Test helpers shared across ulib-library unit tests.
//!
//! Kept behind `cfg(test)` to avoid leaking into the public API surface.

use std::{
    fs,
    path::{Path, PathBuf},
};

use plist::{Dictionary, Value};
use tempfile::TempDir;

use crate::build::{GROUP_INFO_FILENAME, SHEET_TEXT_FILENAME};

/// Temporary on-disk library for tests.
pub struct LibraryFixture {
    /// Root of the temporary directory.
    root: TempDir,
}

impl LibraryFixture {
    /// Creates an empty temporary directory.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Returns the path to the root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a group directory with an `Info.ulgroup` carrying `title`.
    pub fn group(&self, rel_path: &str, title: &str) -> PathBuf {
        let dir = self.root.path().join(rel_path);
        fs::create_dir_all(&dir).unwrap();
        let mut info = Dictionary::new();
        info.insert("displayName".into(), Value::String(title.into()));
        Value::Dictionary(info)
            .to_file_xml(dir.join(GROUP_INFO_FILENAME))
            .unwrap();
        dir
    }

    /// Creates a sheet directory whose `Text.txt` holds `text`.
    pub fn sheet(&self, rel_path: &str, text: &str) -> PathBuf {
        let dir = self.root.path().join(rel_path);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SHEET_TEXT_FILENAME), text).unwrap();
        dir
    }

    /// Writes an arbitrary file relative to the root.
    pub fn file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Creates a library directory with an empty `Main` groups root and an
    /// empty `Inbox` unfiled root. Returns the library directory.
    pub fn library(&self, rel_path: &str) -> PathBuf {
        self.group(&format!("{rel_path}/Groups-ulgroup"), "Main");
        self.group(&format!("{rel_path}/Unfiled-ulgroup"), "Inbox");
        self.root.path().join(rel_path)
    }
}
