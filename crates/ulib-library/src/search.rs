//! Narrowing flattened nodes with an external file search.
//!
//! The search itself is injected through [`SearchProvider`]. [`Mdfind`] is the
//! production provider; it asks Spotlight for items of one Ulysses kind whose
//! content or metadata starts with the query. The provider returns openable paths
//! and the filter keeps the nodes whose openable target is among them.

use std::{collections::HashSet, path::PathBuf, process::Command};

use log::debug;

use crate::{
    SearchError,
    node::{GroupId, ItemId, ItemKind, SheetId},
    tree::Tree,
};

/// Default external search command.
pub const DEFAULT_SEARCH_COMMAND: &str = "mdfind";

/// A source of openable paths matching a query.
pub trait SearchProvider {
    /// Returns the openable paths of items of `kind` matching `query`.
    fn search(&self, kind: ItemKind, query: &str) -> Result<HashSet<PathBuf>, SearchError>;
}

impl<F> SearchProvider for F
where
    F: Fn(ItemKind, &str) -> Result<HashSet<PathBuf>, SearchError>,
{
    fn search(&self, kind: ItemKind, query: &str) -> Result<HashSet<PathBuf>, SearchError> {
        self(kind, query)
    }
}

/// Spotlight search through the `mdfind` command.
#[derive(Debug, Clone)]
pub struct Mdfind {
    /// Program to run; `mdfind` unless configured otherwise.
    command: String,
}

impl Default for Mdfind {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_COMMAND)
    }
}

impl Mdfind {
    /// Creates a provider running `command` in place of `mdfind`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// The program this provider runs.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Builds the raw Spotlight query for `kind` and a user query.
    ///
    /// Both comparisons are prefix matches that ignore case, diacritics and word
    /// boundaries.
    pub fn raw_query(kind: ItemKind, query: &str) -> String {
        let kind_name = match kind {
            ItemKind::Group => "Ulysses Group",
            ItemKind::Sheet => "Ulysses Sheet",
        };
        format!(
            r#"((** = "{}*"cdw) && (kMDItemKind = "{kind_name}*"cdwt))"#,
            escape_query(query)
        )
    }
}

impl SearchProvider for Mdfind {
    fn search(&self, kind: ItemKind, query: &str) -> Result<HashSet<PathBuf>, SearchError> {
        let raw = Self::raw_query(kind, query);
        debug!("running {} {raw}", self.command);

        let output = Command::new(&self.command)
            .arg(&raw)
            .output()
            .map_err(|source| SearchError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SearchError::Failed {
                command: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_paths(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Escapes characters that would end the quoted Spotlight string early.
fn escape_query(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if ch == '"' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Splits newline-separated search output into a path set, dropping blank lines.
fn parse_paths(output: &str) -> HashSet<PathBuf> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Keeps the items whose openable target is in `matches`, preserving order.
///
/// Paths are compared exactly; no normalization is applied.
pub fn filter_by_openable(
    tree: &Tree,
    items: &[ItemId],
    matches: &HashSet<PathBuf>,
) -> Vec<ItemId> {
    items
        .iter()
        .copied()
        .filter(|&id| matches.contains(tree.item(id).openable_target()))
        .collect()
}

/// Narrows `groups` to those the provider reports for `query`.
///
/// A provider failure fails the whole filter; the unfiltered list is never
/// returned in its place.
pub fn filter_groups<P: SearchProvider + ?Sized>(
    tree: &Tree,
    groups: &[GroupId],
    query: &str,
    provider: &P,
) -> Result<Vec<GroupId>, SearchError> {
    let matches = provider.search(ItemKind::Group, query)?;
    Ok(groups
        .iter()
        .copied()
        .filter(|&id| matches.contains(tree.group(id).openable_target()))
        .collect())
}

/// Narrows `sheets` to those the provider reports for `query`.
///
/// A provider failure fails the whole filter.
pub fn filter_sheets<P: SearchProvider + ?Sized>(
    tree: &Tree,
    sheets: &[SheetId],
    query: &str,
    provider: &P,
) -> Result<Vec<SheetId>, SearchError> {
    let matches = provider.search(ItemKind::Sheet, query)?;
    Ok(sheets
        .iter()
        .copied()
        .filter(|&id| matches.contains(tree.sheet(id).openable_target()))
        .collect())
}
