//! Tree arena and traversal.
//!
//! A [`Tree`] owns every group and sheet of one library source. Nodes are addressed
//! by [`GroupId`] and [`SheetId`]; parent links are ids as well, so ancestor paths
//! are reconstructed by following ids upward without re-walking the tree.

use std::path::Path;

use crate::{
    LibraryError,
    node::{Group, GroupId, Item, ItemId, Sheet, SheetId},
};

/// A fully materialized group tree.
///
/// The root is always the first group in the arena: the builder constructs each
/// group before any of its descendants.
#[derive(Debug, Clone)]
pub struct Tree {
    /// All groups, indexed by `GroupId`.
    groups: Vec<Group>,
    /// All sheets, indexed by `SheetId`.
    sheets: Vec<Sheet>,
}

/// Flattened contents of a subtree in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walk {
    /// Every group, each before its descendants.
    pub groups: Vec<GroupId>,
    /// Every sheet; a group's own sheets precede those of its descendants.
    pub sheets: Vec<SheetId>,
}

impl Tree {
    /// Creates an empty arena. Only the builder produces trees.
    pub(crate) fn empty() -> Self {
        Self {
            groups: Vec::new(),
            sheets: Vec::new(),
        }
    }

    /// Adds a group, linking it to nothing yet.
    pub(crate) fn push_group(&mut self, group: Group) -> GroupId {
        self.groups.push(group);
        GroupId(self.groups.len() - 1)
    }

    /// Adds a sheet and appends it to its parent's sheet list.
    pub(crate) fn push_sheet(&mut self, sheet: Sheet) -> SheetId {
        let parent = sheet.parent;
        self.sheets.push(sheet);
        let id = SheetId(self.sheets.len() - 1);
        self.groups[parent.0].sheets.push(id);
        id
    }

    /// Mutable access for the builder and assembler.
    pub(crate) fn group_mut(&mut self, id: GroupId) -> &mut Group {
        &mut self.groups[id.0]
    }

    /// The root group's id.
    pub fn root(&self) -> GroupId {
        GroupId(0)
    }

    /// The root group.
    pub fn root_group(&self) -> &Group {
        self.group(self.root())
    }

    /// Returns a group by id.
    ///
    /// # Panics
    ///
    /// Panics if the id belongs to a different tree and is out of range.
    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    /// Returns a sheet by id.
    ///
    /// # Panics
    ///
    /// Panics if the id belongs to a different tree and is out of range.
    pub fn sheet(&self, id: SheetId) -> &Sheet {
        &self.sheets[id.0]
    }

    /// Returns either kind of node by id.
    pub fn item(&self, id: ItemId) -> Item<'_> {
        match id {
            ItemId::Group(id) => Item::Group(self.group(id)),
            ItemId::Sheet(id) => Item::Sheet(self.sheet(id)),
        }
    }

    /// Total number of groups, root included.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Flattens the whole tree. See [`Tree::walk_from`].
    pub fn walk(&self) -> Walk {
        self.walk_from(self.root())
    }

    /// Flattens the subtree rooted at `from` in pre-order.
    ///
    /// Each group is emitted before its children, and its own sheets are emitted
    /// before the sheets of any descendant. Every node appears exactly once.
    pub fn walk_from(&self, from: GroupId) -> Walk {
        let mut walk = Walk::default();
        self.walk_into(from, &mut walk);
        walk
    }

    /// Recursive step of [`Tree::walk_from`].
    fn walk_into(&self, id: GroupId, walk: &mut Walk) {
        let group = self.group(id);
        walk.groups.push(id);
        walk.sheets.extend_from_slice(&group.sheets);
        for &child in &group.children {
            self.walk_into(child, walk);
        }
    }

    /// Returns the ancestors of a node, root first and immediate parent last.
    ///
    /// A root has no ancestors.
    pub fn ancestors(&self, id: impl Into<ItemId>) -> Vec<GroupId> {
        let mut ancestors = Vec::new();
        let mut current = self.item(id.into()).parent();
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.group(parent).parent;
        }
        ancestors.reverse();
        ancestors
    }

    /// Titles of a node's ancestors, root first, for breadcrumb display.
    pub fn breadcrumb(&self, id: impl Into<ItemId>) -> Vec<&str> {
        self.ancestors(id)
            .into_iter()
            .map(|ancestor| self.group(ancestor).title())
            .collect()
    }

    /// Distance from the root: 0 for the root, 1 for its children, and so on.
    pub fn depth(&self, id: impl Into<ItemId>) -> usize {
        let mut depth = 0;
        let mut current = self.item(id.into()).parent();
        while let Some(parent) = current {
            depth += 1;
            current = self.group(parent).parent;
        }
        depth
    }

    /// Finds the group under `from` backed by `location`.
    ///
    /// This is a linear scan over the subtree.
    pub fn find_group_by_location(
        &self,
        from: GroupId,
        location: &Path,
    ) -> Result<GroupId, LibraryError> {
        self.walk_from(from)
            .groups
            .into_iter()
            .find(|&id| self.group(id).location() == location)
            .ok_or_else(|| LibraryError::GroupNotFound {
                path: location.to_path_buf(),
            })
    }

    /// Number of sheets anywhere below `id`, including its own.
    pub fn descendant_sheet_count(&self, id: GroupId) -> usize {
        let group = self.group(id);
        group.sheets.len()
            + group
                .children
                .iter()
                .map(|&child| self.descendant_sheet_count(child))
                .sum::<usize>()
    }
}
