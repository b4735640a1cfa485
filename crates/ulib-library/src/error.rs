//! Error types for library construction, lookup, and search.

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Errors that can occur while building or querying a library tree.
///
/// Every variant except [`LibraryError::GroupNotFound`] means the on-disk library
/// is malformed or in an unsupported format. Builds abort on the first one.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A directory passed to the builder does not carry the group suffix.
    #[error("not a group directory: {path}")]
    NotAGroupDirectory {
        /// The offending directory.
        path: PathBuf,
    },

    /// A group directory has no `Info.ulgroup` file.
    #[error("group directory has no Info.ulgroup: {path}")]
    MissingGroupInfo {
        /// The group directory.
        path: PathBuf,
    },

    /// Failed to list a group directory.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        /// The directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse a group's property list.
    #[error("failed to read group info {path}: {source}")]
    ReadGroupInfo {
        /// Path to the `Info.ulgroup` file.
        path: PathBuf,
        /// Underlying plist error.
        source: plist::Error,
    },

    /// A group's property list has no string `displayName`.
    #[error("group info has no displayName: {path}")]
    MissingDisplayName {
        /// Path to the `Info.ulgroup` file.
        path: PathBuf,
    },

    /// Failed to read a sheet's text file.
    #[error("failed to read sheet text {path}: {source}")]
    ReadSheetText {
        /// Path to the `Text.txt` file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A library root carries an unexpected title.
    #[error("library root {path} is titled '{found}', expected '{expected}'")]
    RootTitleMismatch {
        /// The groups root directory.
        path: PathBuf,
        /// The title the root must carry on disk.
        expected: String,
        /// The title actually found.
        found: String,
    },

    /// A group would contain itself or one of its ancestors.
    #[error("group contains itself or an ancestor: {path}")]
    SelfReference {
        /// The directory that closes the cycle.
        path: PathBuf,
    },

    /// Two sources are backed by the same library directory.
    #[error("library directory used by more than one source: {path}")]
    DuplicateSource {
        /// The shared library directory.
        path: PathBuf,
    },

    /// No group is backed by the requested location.
    #[error("group with location '{path}' not found")]
    GroupNotFound {
        /// The location that was looked up.
        path: PathBuf,
    },
}

/// Errors from the external search command.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search command could not be started.
    #[error("failed to run search command '{command}': {source}")]
    Spawn {
        /// The command that was invoked.
        command: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The search command exited unsuccessfully.
    #[error("search command '{command}' failed ({status}): {stderr}")]
    Failed {
        /// The command that was invoked.
        command: String,
        /// The exit status.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}
