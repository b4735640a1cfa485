//! Assembling the library from its sources.
//!
//! A library directory holds two group trees: `Groups-ulgroup`, whose root is
//! titled `Main` on disk, and `Unfiled-ulgroup`, the Inbox. Assembly builds the
//! first, renames its root after the source, and splices the second in as the
//! root's first child.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{info, warn};

use crate::{
    LibraryError,
    build::{TreeBuilder, build_tree},
    node::GroupId,
    tree::Tree,
};

/// Directory name of a library's groups root.
pub const GROUPS_ROOT_DIR: &str = "Groups-ulgroup";

/// Directory name of a library's unfiled root.
pub const UNFILED_ROOT_DIR: &str = "Unfiled-ulgroup";

/// Title every groups root carries on disk.
pub const ROOT_SENTINEL_TITLE: &str = "Main";

/// Key under which the unfiled tree is registered on each root.
pub const INBOX_TITLE: &str = "Inbox";

/// One library source to assemble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    /// Human-facing name, also used as the root's title.
    pub label: String,
    /// Directory holding `Groups-ulgroup` and `Unfiled-ulgroup`.
    pub library_dir: PathBuf,
}

impl SourceSpec {
    /// Creates a source spec.
    pub fn new(label: impl Into<String>, library_dir: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            library_dir: library_dir.into(),
        }
    }

    /// The groups root directory.
    pub fn groups_root(&self) -> PathBuf {
        self.library_dir.join(GROUPS_ROOT_DIR)
    }

    /// The unfiled (Inbox) root directory.
    pub fn unfiled_root(&self) -> PathBuf {
        self.library_dir.join(UNFILED_ROOT_DIR)
    }
}

/// Receives events while a library is assembled.
pub trait LibraryReporter {
    /// Called after a source has been built and added.
    fn on_source_added(&mut self, label: &str, groups_root: &Path, tree: &Tree);

    /// Called when a source's groups root does not exist and the source is skipped.
    fn on_source_missing(&mut self, label: &str, groups_root: &Path);
}

/// A reporter that discards every event.
pub struct SilentReporter;

impl LibraryReporter for SilentReporter {
    fn on_source_added(&mut self, _label: &str, _groups_root: &Path, _tree: &Tree) {}
    fn on_source_missing(&mut self, _label: &str, _groups_root: &Path) {}
}

/// A reporter that forwards events to the `log` facade.
pub struct LogReporter;

impl LibraryReporter for LogReporter {
    fn on_source_added(&mut self, label: &str, groups_root: &Path, tree: &Tree) {
        info!(
            "added '{label}' items from '{}' ({} groups, {} sheets)",
            groups_root.display(),
            tree.group_count(),
            tree.sheet_count()
        );
    }

    fn on_source_missing(&mut self, label: &str, groups_root: &Path) {
        warn!("no '{label}' items found at '{}'", groups_root.display());
    }
}

/// The assembled library: source label to tree, in source order.
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// Trees keyed by source label.
    sources: IndexMap<String, Tree>,
}

impl Library {
    /// Returns the tree for a source label.
    pub fn get(&self, label: &str) -> Option<&Tree> {
        self.sources.get(label)
    }

    /// Iterates over `(label, tree)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tree)> {
        self.sources
            .iter()
            .map(|(label, tree)| (label.as_str(), tree))
    }

    /// Source labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    /// Number of sources present.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if no source was found.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Finds the group backed by `location` in any source.
    ///
    /// Returns the source label with the group's id.
    pub fn find_group_by_location(&self, location: &Path) -> Result<(&str, GroupId), LibraryError> {
        for (label, tree) in self.iter() {
            match tree.find_group_by_location(tree.root(), location) {
                Ok(id) => return Ok((label, id)),
                Err(LibraryError::GroupNotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Err(LibraryError::GroupNotFound {
            path: location.to_path_buf(),
        })
    }
}

/// Builds every source that exists on disk, in the given order.
///
/// Sources whose groups root is missing are reported and skipped. Any other
/// problem aborts the whole assembly.
pub fn assemble_library<R: LibraryReporter + ?Sized>(
    sources: &[SourceSpec],
    reporter: &mut R,
) -> Result<Library, LibraryError> {
    let mut library = Library::default();
    let mut seen: Vec<&Path> = Vec::new();

    for source in sources {
        if seen.contains(&source.library_dir.as_path()) {
            return Err(LibraryError::DuplicateSource {
                path: source.library_dir.clone(),
            });
        }
        seen.push(&source.library_dir);

        let groups_root = source.groups_root();
        if !groups_root.exists() {
            reporter.on_source_missing(&source.label, &groups_root);
            continue;
        }

        let tree = assemble_source(source, &groups_root)?;
        reporter.on_source_added(&source.label, &groups_root, &tree);
        library.sources.insert(source.label.clone(), tree);
    }

    Ok(library)
}

/// Builds one source's tree and splices in its Inbox.
fn assemble_source(source: &SourceSpec, groups_root: &Path) -> Result<Tree, LibraryError> {
    let mut tree = build_tree(groups_root)?;
    let root = tree.root();

    let found = tree.group(root).title();
    if found != ROOT_SENTINEL_TITLE {
        return Err(LibraryError::RootTitleMismatch {
            path: groups_root.to_path_buf(),
            expected: ROOT_SENTINEL_TITLE.to_string(),
            found: found.to_string(),
        });
    }
    tree.group_mut(root).title = source.label.clone();

    let mut builder = TreeBuilder::new(tree);
    let inbox = builder.build_group(&source.unfiled_root(), Some(root))?;
    let mut tree = builder.finish();

    let group = tree.group_mut(root);
    group.children.insert(0, inbox);
    let shadowed = group.children_by_title.insert(INBOX_TITLE.to_string(), inbox);
    if let Some(shadowed) = shadowed {
        warn!(
            "ambiguous group title '{INBOX_TITLE}': {} replaces {} in title lookup",
            tree.group(inbox).location().display(),
            tree.group(shadowed).location().display()
        );
    }

    Ok(tree)
}
