//! Integration tests for ulib-config.
//!
//! Exercises the full loading pipeline: discovery -> parse -> resolve -> merge.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use ulib_config::{Config, ConfigError, ConfigWarning, SourceKind, local_template};

/// Temporary directory structure for tests.
struct TestEnv {
    /// Temporary root.
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn root_config_isolates_from_global() {
    let env = TestEnv::new();
    let config_path = env.create_file(
        "project/.ulib.toml",
        r#"
root = true

[library]
icloud = "./Cloud"
local = "./Local"
"#,
    );
    let cwd = env.create_dir("project/notes/deep");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.files, vec![config_path]);
    assert_eq!(config.library.icloud, env.path().join("project/./Cloud"));
    assert_eq!(config.library.local, env.path().join("project/./Local"));
    assert!(config.library.include_local);
    assert_eq!(config.search.command, "mdfind");
}

#[test]
fn nested_configs_merge_closest_first() {
    let env = TestEnv::new();
    env.create_file(
        ".ulib.toml",
        r#"
root = true

[library]
icloud = "/shared/Library"
include_local = true

[search]
command = "outer"
"#,
    );
    env.create_file(
        "inner/.ulib.toml",
        r#"
[library]
include_local = false

[search]
command = "inner"
"#,
    );
    let cwd = env.create_dir("inner/x");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.files.len(), 2);
    assert_eq!(config.config_root, Some(env.path().join("inner")));
    assert_eq!(config.library.icloud, PathBuf::from("/shared/Library"));
    assert!(!config.library.include_local);
    assert_eq!(config.search.command, "inner");

    let sources = config.sources();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].kind, SourceKind::ICloud);
}

#[test]
fn parent_relative_library_resolves_to_real_path() {
    let env = TestEnv::new();
    let cloud = env.create_dir("cloud");
    let config_path = env.create_file(
        "work/.ulib.toml",
        "root = true\n\n[library]\nicloud = \"../cloud\"\nlocal = \"../absent\"\n",
    );

    let config = Config::load_from_files(&[config_path]).unwrap();
    assert_eq!(config.library.icloud, cloud.canonicalize().unwrap());
    assert_eq!(config.library.local, env.path().join("work/../absent"));
}

#[test]
fn parse_error_names_file() {
    let env = TestEnv::new();
    let bad = env.create_file(".ulib.toml", "root = true\n[library\n");

    let err = Config::load_from_files(&[bad.clone()]).unwrap_err();
    match err {
        ConfigError::ParseToml { path, .. } => assert_eq!(path, bad),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_file_is_read_error() {
    let env = TestEnv::new();
    let err = Config::load_from_files(&[env.path().join("nope.toml")]).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn validate_reports_missing_libraries() {
    let env = TestEnv::new();
    let config_path = env.create_file(
        ".ulib.toml",
        r#"
root = true

[library]
icloud = "./absent-cloud"
local = "./absent-local"

[search]
command = "ulib-test-missing-command"
"#,
    );

    let config = Config::load_from_files(&[config_path]).unwrap();
    let warnings = config.validate();
    assert_eq!(warnings.len(), 3);
    assert!(matches!(
        &warnings[0],
        ConfigWarning::LibraryMissing { source, .. } if source == "iCloud"
    ));
    assert!(matches!(
        &warnings[1],
        ConfigWarning::LibraryMissing { source, .. } if source == "On My Mac"
    ));
    assert!(matches!(
        &warnings[2],
        ConfigWarning::SearchCommandNotFound { .. }
    ));
}

#[test]
fn written_template_loads_as_defaults() {
    let env = TestEnv::new();
    let config_path = env.create_file(".ulib.toml", &local_template());

    let config = Config::load_from_files(&[config_path]).unwrap();
    assert!(config.library.include_local);
    assert_eq!(config.search.command, "mdfind");
}

#[test]
fn effective_settings_render_as_toml() {
    let env = TestEnv::new();
    let config_path = env.create_file(
        ".ulib.toml",
        "[library]\nicloud = \"/c\"\nlocal = \"/l\"\ninclude_local = false\n",
    );

    let config = Config::load_from_files(&[config_path]).unwrap();
    let rendered = config.settings_to_toml().unwrap();
    assert!(rendered.contains("icloud = \"/c\""));
    assert!(rendered.contains("include_local = false"));
}
