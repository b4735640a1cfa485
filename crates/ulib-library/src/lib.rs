//! Group and sheet trees for Ulysses libraries.
//!
//! This crate reads a library's on-disk layout into in-memory trees and answers
//! lookups against them. It handles:
//! - Recursive construction of group trees from `-ulgroup` directories
//! - Pre-order flattening, ancestor paths and lookup by location
//! - Narrowing flattened nodes with an external (Spotlight) search
//! - Assembling the iCloud and On My Mac sources into one ordered library
//!
//! # Example
//!
//! ```no_run
//! use ulib_library::{LogReporter, SourceSpec, assemble_library};
//!
//! let sources = [SourceSpec::new("iCloud", "/path/to/Library")];
//! let library = assemble_library(&sources, &mut LogReporter).unwrap();
//! for (label, tree) in library.iter() {
//!     println!("{label}: {} sheets", tree.sheet_count());
//! }
//! ```

#![warn(missing_docs)]

mod assemble;
mod build;
mod error;
mod node;
mod search;
#[cfg(test)]
mod test_support;
mod tree;

pub use assemble::{
    GROUPS_ROOT_DIR, INBOX_TITLE, Library, LibraryReporter, LogReporter, ROOT_SENTINEL_TITLE,
    SilentReporter, SourceSpec, UNFILED_ROOT_DIR, assemble_library,
};
pub use build::{GROUP_INFO_FILENAME, GROUP_SUFFIX, SHEET_SUFFIX, SHEET_TEXT_FILENAME, build_tree};
pub use error::{LibraryError, SearchError};
pub use node::{Group, GroupId, Item, ItemId, ItemKind, Sheet, SheetId};
pub use search::{
    DEFAULT_SEARCH_COMMAND, Mdfind, SearchProvider, filter_by_openable, filter_groups,
    filter_sheets,
};
pub use tree::{Tree, Walk};
