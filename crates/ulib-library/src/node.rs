//! Group and sheet nodes.
//!
//! Nodes live in a [`Tree`](crate::Tree) arena and refer to each other by index.
//! A node's parent link is a plain [`GroupId`], so walking up to the root never
//! involves an owning pointer.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;

/// Index of a group within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

/// Index of a sheet within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(pub(crate) usize);

/// Identifies either kind of node within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemId {
    /// A group node.
    Group(GroupId),
    /// A sheet node.
    Sheet(SheetId),
}

impl From<GroupId> for ItemId {
    fn from(id: GroupId) -> Self {
        Self::Group(id)
    }
}

impl From<SheetId> for ItemId {
    fn from(id: SheetId) -> Self {
        Self::Sheet(id)
    }
}

/// Distinguishes containers from leaf documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A container of sheets and other groups.
    Group,
    /// A leaf document.
    Sheet,
}

impl ItemKind {
    /// Lowercase name used in output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Sheet => "sheet",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A container node backed by a `-ulgroup` directory.
#[derive(Debug, Clone)]
pub struct Group {
    /// The backing directory.
    pub(crate) location: PathBuf,
    /// The `Info.ulgroup` file inside the backing directory.
    pub(crate) info_path: PathBuf,
    /// Display name from the group's property list.
    pub(crate) title: String,
    /// Enclosing group, `None` for a root.
    pub(crate) parent: Option<GroupId>,
    /// Child groups in insertion order.
    pub(crate) children: Vec<GroupId>,
    /// Child groups keyed by title, in first-insertion order.
    pub(crate) children_by_title: IndexMap<String, GroupId>,
    /// Sheets directly inside this group, in discovery order.
    pub(crate) sheets: Vec<SheetId>,
}

impl Group {
    /// Creates a childless group.
    pub(crate) fn new(
        location: PathBuf,
        info_path: PathBuf,
        title: String,
        parent: Option<GroupId>,
    ) -> Self {
        Self {
            location,
            info_path,
            title,
            parent,
            children: Vec::new(),
            children_by_title: IndexMap::new(),
            sheets: Vec::new(),
        }
    }

    /// The backing directory.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The enclosing group, or `None` for a root.
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// The file an "open" action should target: the group's `Info.ulgroup`.
    pub fn openable_target(&self) -> &Path {
        &self.info_path
    }

    /// Child groups in order. On an assembled root the Inbox comes first.
    pub fn children(&self) -> &[GroupId] {
        &self.children
    }

    /// Looks up a direct child group by title.
    pub fn child_by_title(&self, title: &str) -> Option<GroupId> {
        self.children_by_title.get(title).copied()
    }

    /// Appends a child group and indexes it by title.
    ///
    /// Returns the sibling previously indexed under the same title, which stays in
    /// `children` but is no longer reachable through [`Group::child_by_title`].
    pub(crate) fn push_child(&mut self, title: String, child: GroupId) -> Option<GroupId> {
        self.children.push(child);
        self.children_by_title.insert(title, child)
    }

    /// Sheets directly inside this group.
    pub fn sheets(&self) -> &[SheetId] {
        &self.sheets
    }

    /// Returns true if the group has neither child groups nor sheets.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.sheets.is_empty()
    }
}

/// A leaf document backed by a `.ulysses` directory.
#[derive(Debug, Clone)]
pub struct Sheet {
    /// The backing directory.
    pub(crate) location: PathBuf,
    /// First line of the sheet's text.
    pub(crate) title: String,
    /// The group holding this sheet.
    pub(crate) parent: GroupId,
}

impl Sheet {
    /// The backing directory.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The group holding this sheet.
    pub fn parent(&self) -> GroupId {
        self.parent
    }

    /// The path an "open" action should target: the sheet directory itself.
    pub fn openable_target(&self) -> &Path {
        &self.location
    }
}

/// A borrowed view of either kind of node.
#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    /// A group node.
    Group(&'a Group),
    /// A sheet node.
    Sheet(&'a Sheet),
}

impl<'a> Item<'a> {
    /// Which kind of node this is.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Group(_) => ItemKind::Group,
            Self::Sheet(_) => ItemKind::Sheet,
        }
    }

    /// The backing directory.
    pub fn location(&self) -> &'a Path {
        match self {
            Self::Group(group) => group.location(),
            Self::Sheet(sheet) => sheet.location(),
        }
    }

    /// The display title.
    pub fn title(&self) -> &'a str {
        match self {
            Self::Group(group) => group.title(),
            Self::Sheet(sheet) => sheet.title(),
        }
    }

    /// The enclosing group, or `None` for a root.
    pub fn parent(&self) -> Option<GroupId> {
        match self {
            Self::Group(group) => group.parent(),
            Self::Sheet(sheet) => Some(sheet.parent()),
        }
    }

    /// The path an "open" action should target.
    pub fn openable_target(&self) -> &'a Path {
        match self {
            Self::Group(group) => group.openable_target(),
            Self::Sheet(sheet) => sheet.openable_target(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(parent: Option<GroupId>) -> Group {
        Group::new(
            PathBuf::from("/lib/Notes-ulgroup"),
            PathBuf::from("/lib/Notes-ulgroup/Info.ulgroup"),
            "Notes".into(),
            parent,
        )
    }

    #[test]
    fn group_openable_target_is_info_file() {
        let g = group(None);
        assert_eq!(
            g.openable_target(),
            Path::new("/lib/Notes-ulgroup/Info.ulgroup")
        );
        assert!(g.is_empty());
    }

    #[test]
    fn sheet_openable_target_is_location() {
        let sheet = Sheet {
            location: PathBuf::from("/lib/Notes-ulgroup/a.ulysses"),
            title: "Draft".into(),
            parent: GroupId(0),
        };
        assert_eq!(sheet.openable_target(), sheet.location());
    }

    #[test]
    fn item_exposes_shared_capabilities() {
        let g = group(Some(GroupId(3)));
        let sheet = Sheet {
            location: PathBuf::from("/lib/Notes-ulgroup/a.ulysses"),
            title: "Draft".into(),
            parent: GroupId(1),
        };

        let item = Item::Group(&g);
        assert_eq!(item.kind(), ItemKind::Group);
        assert_eq!(item.title(), "Notes");
        assert_eq!(item.parent(), Some(GroupId(3)));

        let item = Item::Sheet(&sheet);
        assert_eq!(item.kind(), ItemKind::Sheet);
        assert_eq!(item.title(), "Draft");
        assert_eq!(item.parent(), Some(GroupId(1)));
        assert_eq!(
            item.openable_target(),
            Path::new("/lib/Notes-ulgroup/a.ulysses")
        );
    }

    #[test]
    fn item_kind_display() {
        assert_eq!(ItemKind::Group.to_string(), "group");
        assert_eq!(ItemKind::Sheet.to_string(), "sheet");
    }
}
