//! Implementation of `ulib get`.

use std::process::ExitCode;

use serde::Serialize;
use ulib_library::{GroupId, ItemId, Tree};

use crate::cli::{
    args::GetCommand,
    context::CommandContext,
    output::{ItemRef, JsonItem, breadcrumb, dim, header, print_json, subheader},
};

/// JSON form of a looked-up group.
#[derive(Serialize)]
struct JsonGroupDetail {
    /// The group itself.
    group: JsonItem,
    /// Direct child groups, in order.
    groups: Vec<JsonItem>,
    /// Sheets directly in the group, in order.
    sheets: Vec<JsonItem>,
    /// Sheets anywhere below the group.
    total_sheets: usize,
}

/// Looks up a group by its directory and prints its contents.
pub fn run(ctx: &mut CommandContext, cmd: &GetCommand) -> ExitCode {
    let location = ctx.resolve_path(&cmd.dir);
    let library = match ctx.library() {
        Ok(library) => library,
        Err(code) => return code,
    };

    let (source, id) = match library.find_group_by_location(&location) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let Some(tree) = library.get(source) else {
        eprintln!("error: source '{source}' disappeared");
        return ExitCode::FAILURE;
    };

    if cmd.json {
        return print_json(&detail(source, tree, id));
    }

    print_group(tree, id);
    ExitCode::SUCCESS
}

/// Collects the JSON detail for a group.
fn detail(source: &str, tree: &Tree, id: GroupId) -> JsonGroupDetail {
    let item = |id: ItemId| JsonItem::from(ItemRef { source, tree, id });
    let group = tree.group(id);
    JsonGroupDetail {
        group: item(id.into()),
        groups: group.children().iter().map(|&c| item(c.into())).collect(),
        sheets: group.sheets().iter().map(|&s| item(s.into())).collect(),
        total_sheets: tree.descendant_sheet_count(id),
    }
}

/// Prints a group with its children and sheets.
fn print_group(tree: &Tree, id: GroupId) {
    let group = tree.group(id);
    println!("{}", header(group.title()));
    let crumbs = tree.breadcrumb(id);
    if !crumbs.is_empty() {
        println!("   {}", breadcrumb(&crumbs));
    }
    println!("   {}", dim(&group.location().display().to_string()));
    println!();

    println!("{}", subheader("Groups:"));
    if group.children().is_empty() {
        println!("   {}", dim("(none)"));
    }
    for &child in group.children() {
        let child = tree.group(child);
        println!(
            "   {} {}",
            child.title(),
            dim(&format!("({} sheets)", child.sheets().len()))
        );
    }
    println!();

    println!("{}", subheader("Sheets:"));
    if group.sheets().is_empty() {
        println!("   {}", dim("(none)"));
    }
    for &sheet in group.sheets() {
        println!("   {}", tree.sheet(sheet).title());
    }
    println!();

    println!(
        "{}",
        dim(&format!(
            "{} sheets in total",
            tree.descendant_sheet_count(id)
        ))
    );
}
