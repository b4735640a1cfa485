//! Implementation of `ulib ls`.

use std::process::ExitCode;

use ulib_library::ItemId;

use crate::cli::{
    args::{LsCommand, LsWhat},
    context::CommandContext,
    output::{ItemRef, dim, header, print_item_lines, warning},
};

/// Lists sources, groups, or sheets.
pub fn run(ctx: &mut CommandContext, cmd: &LsCommand) -> ExitCode {
    match cmd.what {
        LsWhat::Sources => ls_sources(ctx, cmd.long),
        LsWhat::Groups | LsWhat::Sheets => ls_items(ctx, cmd.what, cmd.long),
    }
}

/// Lists configured sources and whether each was found.
fn ls_sources(ctx: &mut CommandContext, long: bool) -> ExitCode {
    let specs = ctx.source_specs();
    let library = match ctx.library() {
        Ok(library) => library,
        Err(code) => return code,
    };

    for spec in &specs {
        match library.get(&spec.label) {
            Some(tree) => println!(
                "{} {}",
                header(&spec.label),
                dim(&format!(
                    "({} groups, {} sheets)",
                    tree.group_count(),
                    tree.sheet_count()
                ))
            ),
            None => println!("{} {}", header(&spec.label), warning("[missing]")),
        }
        if long {
            println!("   {}", dim(&spec.library_dir.display().to_string()));
        }
    }

    ExitCode::SUCCESS
}

/// Lists every group or every sheet across all sources, in walk order.
fn ls_items(ctx: &mut CommandContext, what: LsWhat, long: bool) -> ExitCode {
    let library = match ctx.library() {
        Ok(library) => library,
        Err(code) => return code,
    };

    let mut items = Vec::new();
    for (source, tree) in library.iter() {
        let walk = tree.walk();
        let ids: Vec<ItemId> = match what {
            LsWhat::Groups => walk.groups.into_iter().map(ItemId::from).collect(),
            _ => walk.sheets.into_iter().map(ItemId::from).collect(),
        };
        items.extend(ids.into_iter().map(|id| ItemRef { source, tree, id }));
    }

    if items.is_empty() {
        let noun = if matches!(what, LsWhat::Groups) {
            "groups"
        } else {
            "sheets"
        };
        println!("{}", dim(&format!("No {noun} found.")));
        return ExitCode::SUCCESS;
    }

    print_item_lines(&items, long);
    ExitCode::SUCCESS
}
