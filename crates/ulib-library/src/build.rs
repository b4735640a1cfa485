//! Directory-to-tree construction.
//!
//! A library is a nest of group directories (suffix `-ulgroup`), each holding an
//! `Info.ulgroup` property list and any number of sheet directories (suffix
//! `.ulysses`) and child group directories. Sheets hold their text in `Text.txt`.

use std::{
    ffi::OsStr,
    fs::{self, File},
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use plist::Value;

use crate::{
    LibraryError,
    node::{Group, GroupId, Sheet},
    tree::Tree,
};

/// Directory name suffix identifying a group.
pub const GROUP_SUFFIX: &str = "-ulgroup";

/// Directory name suffix identifying a sheet.
pub const SHEET_SUFFIX: &str = ".ulysses";

/// Property list every group directory must contain.
pub const GROUP_INFO_FILENAME: &str = "Info.ulgroup";

/// Text file every sheet directory must contain.
pub const SHEET_TEXT_FILENAME: &str = "Text.txt";

/// Property list key holding a group's title.
const DISPLAY_NAME_KEY: &str = "displayName";

/// Builds the tree rooted at the group directory `dir`.
///
/// The whole subtree is read eagerly. Any malformed directory aborts the build
/// and no partial tree is returned.
pub fn build_tree(dir: &Path) -> Result<Tree, LibraryError> {
    let mut builder = TreeBuilder::new(Tree::empty());
    builder.build_group(dir, None)?;
    Ok(builder.finish())
}

/// Recursive group constructor writing into a tree arena.
pub(crate) struct TreeBuilder {
    /// The arena being filled.
    tree: Tree,
    /// Canonical paths of the groups currently being built, outermost first.
    lineage: Vec<PathBuf>,
}

impl TreeBuilder {
    /// Starts building into `tree`, which may already hold other groups.
    pub(crate) fn new(tree: Tree) -> Self {
        Self {
            tree,
            lineage: Vec::new(),
        }
    }

    /// Returns the filled arena.
    pub(crate) fn finish(self) -> Tree {
        self.tree
    }

    /// Builds the group at `dir` and everything below it.
    ///
    /// The group is added to the arena before its sheets and children, so its id
    /// is always lower than any descendant's. The caller links the returned id
    /// into `parent`'s child list.
    pub(crate) fn build_group(
        &mut self,
        dir: &Path,
        parent: Option<GroupId>,
    ) -> Result<GroupId, LibraryError> {
        let is_group_dir = dir
            .file_name()
            .and_then(OsStr::to_str)
            .is_some_and(|name| name.ends_with(GROUP_SUFFIX));
        if !is_group_dir {
            return Err(LibraryError::NotAGroupDirectory {
                path: dir.to_path_buf(),
            });
        }

        let entries = list_entries(dir)?;
        if !entries.iter().any(|name| name == GROUP_INFO_FILENAME) {
            return Err(LibraryError::MissingGroupInfo {
                path: dir.to_path_buf(),
            });
        }

        let canonical = dir
            .canonicalize()
            .map_err(|source| LibraryError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
        if self.lineage.contains(&canonical) {
            return Err(LibraryError::SelfReference {
                path: dir.to_path_buf(),
            });
        }

        let (sheet_dirs, group_dirs): (Vec<&String>, Vec<&String>) = entries
            .iter()
            .filter(|name| name.ends_with(SHEET_SUFFIX) || name.ends_with(GROUP_SUFFIX))
            .partition(|name| name.ends_with(SHEET_SUFFIX));

        let info_path = dir.join(GROUP_INFO_FILENAME);
        let title = read_display_name(&info_path)?;
        let id = self.tree.push_group(Group::new(
            dir.to_path_buf(),
            info_path,
            title,
            parent,
        ));

        for name in sheet_dirs {
            let location = dir.join(name);
            let title = read_sheet_title(&location)?;
            self.tree.push_sheet(Sheet {
                location,
                title,
                parent: id,
            });
        }

        self.lineage.push(canonical);
        for name in group_dirs {
            let child = self.build_group(&dir.join(name), Some(id))?;
            if child == id {
                return Err(LibraryError::SelfReference {
                    path: dir.join(name),
                });
            }
            self.link_child(id, child);
        }
        self.lineage.pop();

        debug!(
            "built group '{}' from {}",
            self.tree.group(id).title(),
            dir.display()
        );
        Ok(id)
    }

    /// Appends `child` to `parent`'s children and indexes it by title.
    ///
    /// A sibling with the same title is replaced in the title index and reported as
    /// ambiguous; both stay in the ordered child list.
    fn link_child(&mut self, parent: GroupId, child: GroupId) {
        let title = self.tree.group(child).title().to_string();
        let shadowed = self.tree.group_mut(parent).push_child(title, child);
        if let Some(shadowed) = shadowed {
            let child = self.tree.group(child);
            warn!(
                "ambiguous group title '{}': {} replaces {} in title lookup",
                child.title(),
                child.location().display(),
                self.tree.group(shadowed).location().display()
            );
        }
    }
}

/// Lists the entry names of a directory in the order the OS returns them.
///
/// Names that are not valid UTF-8 cannot carry either suffix and are skipped.
fn list_entries(dir: &Path) -> Result<Vec<String>, LibraryError> {
    let read_dir_error = |source| LibraryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

/// Reads the `displayName` string from a group's property list.
fn read_display_name(info_path: &Path) -> Result<String, LibraryError> {
    let value = Value::from_file(info_path).map_err(|source| LibraryError::ReadGroupInfo {
        path: info_path.to_path_buf(),
        source,
    })?;

    value
        .as_dictionary()
        .and_then(|dict| dict.get(DISPLAY_NAME_KEY))
        .and_then(Value::as_string)
        .map(str::to_string)
        .ok_or_else(|| LibraryError::MissingDisplayName {
            path: info_path.to_path_buf(),
        })
}

/// Reads a sheet's title: the first line of its text, trimmed.
fn read_sheet_title(sheet_dir: &Path) -> Result<String, LibraryError> {
    let path = sheet_dir.join(SHEET_TEXT_FILENAME);
    let read_error = |source| LibraryError::ReadSheetText {
        path: path.clone(),
        source,
    };

    let file = File::open(&path).map_err(read_error)?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(read_error)?;
    Ok(line.trim().to_string())
}
