//! Configuration validation.
//!
//! Reports non-fatal problems with a loaded configuration.

use std::fmt;

use crate::{Config, Source};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A library directory does not exist.
    LibraryMissing {
        /// Source label.
        source: String,
        /// Path that doesn't exist.
        path: String,
    },
    /// A library path exists but is not a directory.
    LibraryNotDirectory {
        /// Source label.
        source: String,
        /// Path that is not a directory.
        path: String,
    },
    /// The search command is not on `PATH`.
    SearchCommandNotFound {
        /// Configured command.
        command: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LibraryMissing { source, path } => {
                write!(f, "{source} library does not exist: {path}")
            }
            Self::LibraryNotDirectory { source, path } => {
                write!(f, "{source} library is not a directory: {path}")
            }
            Self::SearchCommandNotFound { command } => {
                write!(f, "search command not found: {command}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings: Vec<ConfigWarning> =
        config.sources().iter().filter_map(validate_source).collect();

    if which::which(&config.search.command).is_err() {
        warnings.push(ConfigWarning::SearchCommandNotFound {
            command: config.search.command.clone(),
        });
    }

    warnings
}

/// Checks that a source's library directory is present.
fn validate_source(source: &Source) -> Option<ConfigWarning> {
    let path = &source.library_dir;
    if !path.exists() {
        return Some(ConfigWarning::LibraryMissing {
            source: source.label().to_string(),
            path: path.display().to_string(),
        });
    }
    if !path.is_dir() {
        return Some(ConfigWarning::LibraryNotDirectory {
            source: source.label().to_string(),
            path: path.display().to_string(),
        });
    }
    None
}
