//! End-to-end tests: on-disk library -> assembled trees -> walk -> search filter.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use plist::{Dictionary, Value};
use ulib_library::{
    ItemKind, LibraryError, SearchError, SilentReporter, SourceSpec, assemble_library,
    filter_groups, filter_sheets,
};

/// Temporary Ulysses library layout.
struct TestLibrary {
    /// Temporary root.
    root: tempfile::TempDir,
}

impl TestLibrary {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a group directory titled `title`.
    fn group(&self, rel_path: &str, title: &str) -> PathBuf {
        let dir = self.root.path().join(rel_path);
        fs::create_dir_all(&dir).unwrap();
        let mut info = Dictionary::new();
        info.insert("displayName".into(), Value::String(title.into()));
        Value::Dictionary(info)
            .to_file_xml(dir.join("Info.ulgroup"))
            .unwrap();
        dir
    }

    /// Creates a sheet directory with `text` in its `Text.txt`.
    fn sheet(&self, rel_path: &str, text: &str) -> PathBuf {
        let dir = self.root.path().join(rel_path);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Text.txt"), text).unwrap();
        dir
    }
}

/// Builds a two-source library resembling a real Ulysses setup.
fn sample() -> TestLibrary {
    let lib = TestLibrary::new();
    lib.group("cloud/Groups-ulgroup", "Main");
    lib.group("cloud/Unfiled-ulgroup", "Inbox");
    lib.sheet("cloud/Unfiled-ulgroup/a1.ulysses", "Quick thought\nmore");
    lib.group("cloud/Groups-ulgroup/p-ulgroup", "Projects");
    lib.sheet("cloud/Groups-ulgroup/p-ulgroup/s1.ulysses", "Draft One\n\nBody text");
    lib.group("cloud/Groups-ulgroup/p-ulgroup/n-ulgroup", "Novel");
    lib.sheet("cloud/Groups-ulgroup/p-ulgroup/n-ulgroup/c1.ulysses", "Chapter 1");
    lib.sheet("cloud/Groups-ulgroup/p-ulgroup/n-ulgroup/c2.ulysses", "Chapter 2");

    lib.group("local/Groups-ulgroup", "Main");
    lib.group("local/Unfiled-ulgroup", "Inbox");
    lib.group("local/Groups-ulgroup/j-ulgroup", "Journal");
    lib
}

fn sources(lib: &TestLibrary) -> Vec<SourceSpec> {
    vec![
        SourceSpec::new("iCloud", lib.path().join("cloud")),
        SourceSpec::new("On My Mac", lib.path().join("local")),
    ]
}

#[test]
fn assembles_both_sources() {
    let lib = sample();
    let library = assemble_library(&sources(&lib), &mut SilentReporter).unwrap();

    assert_eq!(library.labels(), vec!["iCloud", "On My Mac"]);

    let cloud = library.get("iCloud").unwrap();
    assert_eq!(cloud.root_group().title(), "iCloud");
    assert_eq!(cloud.group_count(), 4);
    assert_eq!(cloud.sheet_count(), 4);

    let local = library.get("On My Mac").unwrap();
    assert_eq!(local.root_group().title(), "On My Mac");
    assert_eq!(local.group_count(), 3);
    assert_eq!(local.sheet_count(), 0);
}

#[test]
fn walk_counts_match_disk_and_ancestry_matches_depth() {
    let lib = sample();
    let library = assemble_library(&sources(&lib), &mut SilentReporter).unwrap();
    let tree = library.get("iCloud").unwrap();
    let walk = tree.walk();

    assert_eq!(walk.groups.len(), tree.group_count());
    assert_eq!(walk.sheets.len(), tree.sheet_count());

    for &sheet in &walk.sheets {
        let ancestors = tree.ancestors(sheet);
        assert_eq!(ancestors.len(), tree.depth(sheet));
        let parent = tree.sheet(sheet).parent();
        assert_eq!(ancestors.last(), Some(&parent));
    }

    let chapter = walk
        .sheets
        .iter()
        .copied()
        .find(|&id| tree.sheet(id).title() == "Chapter 2")
        .unwrap();
    assert_eq!(tree.breadcrumb(chapter), vec!["iCloud", "Projects", "Novel"]);
}

#[test]
fn projects_group_holds_draft_one() {
    let lib = sample();
    let library = assemble_library(&sources(&lib), &mut SilentReporter).unwrap();
    let tree = library.get("iCloud").unwrap();

    let projects = tree.root_group().child_by_title("Projects").unwrap();
    let group = tree.group(projects);
    assert_eq!(group.sheets().len(), 1);
    assert_eq!(tree.sheet(group.sheets()[0]).title(), "Draft One");
    assert_eq!(tree.descendant_sheet_count(projects), 3);
}

#[test]
fn lookup_by_location_across_sources() {
    let lib = sample();
    let library = assemble_library(&sources(&lib), &mut SilentReporter).unwrap();

    let journal = lib.path().join("local/Groups-ulgroup/j-ulgroup");
    let (label, id) = library.find_group_by_location(&journal).unwrap();
    assert_eq!(label, "On My Mac");
    assert_eq!(library.get(label).unwrap().group(id).title(), "Journal");

    let err = library
        .find_group_by_location(&lib.path().join("cloud/Nope-ulgroup"))
        .unwrap_err();
    assert!(matches!(err, LibraryError::GroupNotFound { .. }));
}

#[test]
fn search_narrows_walk_results() {
    let lib = sample();
    let library = assemble_library(&sources(&lib), &mut SilentReporter).unwrap();
    let tree = library.get("iCloud").unwrap();
    let walk = tree.walk();

    // Pretend Spotlight knows about the Novel group and the chapters.
    let novel_info = lib
        .path()
        .join("cloud/Groups-ulgroup/p-ulgroup/n-ulgroup/Info.ulgroup");
    let chapter_dir = lib
        .path()
        .join("cloud/Groups-ulgroup/p-ulgroup/n-ulgroup/c1.ulysses");
    let provider = move |kind: ItemKind, _: &str| -> Result<HashSet<PathBuf>, SearchError> {
        Ok(match kind {
            ItemKind::Group => HashSet::from([novel_info.clone()]),
            ItemKind::Sheet => HashSet::from([chapter_dir.clone()]),
        })
    };

    let groups = filter_groups(tree, &walk.groups, "nov", &provider).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(tree.group(groups[0]).title(), "Novel");

    let sheets = filter_sheets(tree, &walk.sheets, "chap", &provider).unwrap();
    assert_eq!(sheets.len(), 1);
    assert_eq!(tree.sheet(sheets[0]).title(), "Chapter 1");
}
