//! Implementation of `ulib search`.

use std::process::ExitCode;

use log::debug;
use ulib_library::{ItemId, ItemKind, SearchProvider, filter_by_openable};

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{ItemRef, output_search_results},
};

/// Runs the external search once per kind and prints matching items, groups first.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let query = cmd.query_string();
    let provider = ctx.search_provider();
    let library = match ctx.library() {
        Ok(library) => library,
        Err(code) => return code,
    };

    let mut kinds = Vec::new();
    if cmd.wants_groups() {
        kinds.push(ItemKind::Group);
    }
    if cmd.wants_sheets() {
        kinds.push(ItemKind::Sheet);
    }

    let mut items = Vec::new();
    for kind in kinds {
        let matches = match provider.search(kind, &query) {
            Ok(matches) => matches,
            Err(e) => {
                eprintln!("error: search failed: {e}");
                return ExitCode::FAILURE;
            }
        };
        debug!("{} {kind} paths matched '{query}'", matches.len());

        for (source, tree) in library.iter() {
            let walk = tree.walk();
            let candidates: Vec<ItemId> = match kind {
                ItemKind::Group => walk.groups.into_iter().map(ItemId::from).collect(),
                ItemKind::Sheet => walk.sheets.into_iter().map(ItemId::from).collect(),
            };
            items.extend(
                filter_by_openable(tree, &candidates, &matches)
                    .into_iter()
                    .map(|id| ItemRef { source, tree, id }),
            );
        }
    }

    output_search_results(&query, &items, cmd.format())
}
