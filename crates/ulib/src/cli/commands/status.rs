//! Implementation of `ulib status`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use ulib_config::{ConfigWarning, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, sources with their counts, and validation warnings.
pub fn run(ctx: &mut CommandContext) -> ExitCode {
    println!("{}", subheader("Config files:"));
    if ctx.config.files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
    }
    for path in &ctx.config.files {
        let scope = if is_global_config(path) {
            "global"
        } else {
            "local"
        };
        println!("   {} {}", path.display(), dim(&format!("({scope})")));
    }
    println!();

    let specs = ctx.source_specs();
    let warnings = ctx.config.validate();
    let library = match ctx.library() {
        Ok(library) => library,
        Err(code) => return code,
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Source", "Status", "Groups", "Sheets", "Library"]);
    for spec in &specs {
        let location = spec.library_dir.display().to_string();
        match library.get(&spec.label) {
            Some(tree) => table.add_row(vec![
                Cell::new(&spec.label),
                Cell::new("ok"),
                Cell::new(tree.group_count()),
                Cell::new(tree.sheet_count()),
                Cell::new(location),
            ]),
            None => table.add_row(vec![
                Cell::new(&spec.label),
                Cell::new("missing"),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new(location),
            ]),
        };
    }
    println!("{}", subheader("Sources:"));
    println!("{table}");
    println!();

    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints = Vec::new();
    for w in warnings {
        let hint = match w {
            ConfigWarning::LibraryMissing { .. } | ConfigWarning::LibraryNotDirectory { .. } => {
                "Hint: set [library] paths in .ulib.toml, or include_local = false"
            }
            ConfigWarning::SearchCommandNotFound { .. } => {
                "Hint: set [search] command to a program that answers Spotlight queries"
            }
        };
        if !hints.contains(&hint) {
            hints.push(hint);
        }
    }
    for hint in hints {
        println!("{}", dim(hint));
    }
}
