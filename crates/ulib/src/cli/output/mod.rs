//! Terminal styling and JSON serialization for CLI output.

use std::process::ExitCode;

use serde::Serialize;
use ulib_library::{ItemId, Tree};

use crate::cli::args::OutputFormat;

/// ANSI color codes for terminal output.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Separator between breadcrumb segments.
const BREADCRUMB_SEPARATOR: &str = " / ";

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Formats ancestor titles as a dimmed path.
pub fn breadcrumb(titles: &[&str]) -> String {
    dim(&join_breadcrumb(titles))
}

/// Joins ancestor titles without styling.
fn join_breadcrumb(titles: &[&str]) -> String {
    titles.join(BREADCRUMB_SEPARATOR)
}

/// One item located in a named source, ready for display.
#[derive(Clone, Copy)]
pub struct ItemRef<'a> {
    /// Label of the source holding the item.
    pub source: &'a str,
    /// Tree holding the item.
    pub tree: &'a Tree,
    /// The item.
    pub id: ItemId,
}

/// JSON form of an item.
#[derive(Serialize)]
pub struct JsonItem {
    /// `group` or `sheet`.
    pub kind: &'static str,
    /// Source label.
    pub source: String,
    /// Display title.
    pub title: String,
    /// Backing directory.
    pub location: String,
    /// File to hand to an opener.
    pub openable: String,
    /// Ancestor titles, root first.
    pub breadcrumb: Vec<String>,
}

impl From<ItemRef<'_>> for JsonItem {
    fn from(item: ItemRef<'_>) -> Self {
        let node = item.tree.item(item.id);
        Self {
            kind: node.kind().as_str(),
            source: item.source.to_string(),
            title: node.title().to_string(),
            location: node.location().display().to_string(),
            openable: node.openable_target().display().to_string(),
            breadcrumb: item
                .tree
                .breadcrumb(item.id)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// A single Alfred script filter result.
#[derive(Serialize)]
struct AlfredItem {
    /// Stable identifier so Alfred can learn from selections.
    uid: String,
    /// Main line.
    title: String,
    /// Second line: the item's breadcrumb.
    subtitle: String,
    /// Value passed to the workflow's next action.
    arg: String,
    /// Lets Alfred treat `arg` as a file.
    #[serde(rename = "type")]
    item_type: &'static str,
}

impl From<ItemRef<'_>> for AlfredItem {
    fn from(item: ItemRef<'_>) -> Self {
        let node = item.tree.item(item.id);
        Self {
            uid: node.location().display().to_string(),
            title: node.title().to_string(),
            subtitle: join_breadcrumb(&item.tree.breadcrumb(item.id)),
            arg: node.openable_target().display().to_string(),
            item_type: "file",
        }
    }
}

/// An Alfred script filter document.
#[derive(Serialize)]
struct AlfredOutput {
    /// Results in display order.
    items: Vec<AlfredItem>,
}

/// JSON output for `ulib search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The query as searched.
    query: &'a str,
    /// Matches, groups first.
    results: Vec<JsonItem>,
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints one item per line as `title  breadcrumb`, with the location when `long`.
pub fn print_item_lines(items: &[ItemRef<'_>], long: bool) {
    for item in items {
        let node = item.tree.item(item.id);
        println!(
            "{}  {}",
            header(node.title()),
            breadcrumb(&item.tree.breadcrumb(item.id))
        );
        if long {
            println!("   {}", dim(&node.location().display().to_string()));
        }
    }
}

/// Prints search matches in the selected format.
pub fn output_search_results(
    query: &str,
    items: &[ItemRef<'_>],
    format: OutputFormat,
) -> ExitCode {
    match format {
        OutputFormat::Json => print_json(&JsonSearchOutput {
            query,
            results: items.iter().copied().map(JsonItem::from).collect(),
        }),
        OutputFormat::Alfred => print_json(&AlfredOutput {
            items: items.iter().copied().map(AlfredItem::from).collect(),
        }),
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", dim("No results found."));
            } else {
                print_item_lines(items, false);
            }
            ExitCode::SUCCESS
        }
    }
}
