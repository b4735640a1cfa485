//! Clap argument definitions for the `ulib` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "ulib")]
#[command(about = "Browse and search Ulysses libraries")]
pub struct Cli {
    /// Log verbosity (-v for info, -vv for debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `ulib ls`.
#[derive(Args, Debug, Clone)]
pub struct LsCommand {
    /// Show locations
    #[arg(short = 'l', long, global = true)]
    pub long: bool,

    /// What to list.
    #[command(subcommand)]
    pub what: LsWhat,
}

/// What to list with `ulib ls`.
#[derive(Clone, Copy, Subcommand, Debug)]
pub enum LsWhat {
    /// List library sources
    Sources,
    /// List every group
    Groups,
    /// List every sheet
    Sheets,
}

/// Arguments for `ulib search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search terms, joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Only return groups
    #[arg(long, conflicts_with = "sheets")]
    pub groups: bool,

    /// Only return sheets
    #[arg(long)]
    pub sheets: bool,

    /// Output in JSON format
    #[arg(long, conflicts_with = "alfred")]
    pub json: bool,

    /// Output an Alfred script filter document
    #[arg(long)]
    pub alfred: bool,
}

impl SearchCommand {
    /// The query as a single string.
    pub fn query_string(&self) -> String {
        self.query.join(" ")
    }

    /// Whether groups are searched.
    pub fn wants_groups(&self) -> bool {
        !self.sheets
    }

    /// Whether sheets are searched.
    pub fn wants_sheets(&self) -> bool {
        !self.groups
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.alfred {
            OutputFormat::Alfred
        } else {
            OutputFormat::Text
        }
    }
}

/// Arguments for `ulib get`.
#[derive(Args, Debug, Clone)]
pub struct GetCommand {
    /// Group directory to look up
    pub dir: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `ulib init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.ulib.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Output formats for item listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled terminal text.
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Alfred script filter JSON.
    Alfred,
}

/// Supported `ulib` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List sources, groups, or sheets
    Ls(LsCommand),

    /// Find groups and sheets with Spotlight
    #[command(after_help = "\
Terms are matched as prefixes, ignoring case and diacritics.

EXAMPLES:
  ulib search draft
  ulib search --sheets chapter one
  ulib search --alfred nov")]
    Search(SearchCommand),

    /// Show a group by its directory
    Get(GetCommand),

    /// Show configuration, sources, and warnings
    Status,

    /// Initialize ulib configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}
