//! Configuration system for ulib.
//!
//! ulib uses TOML configuration files named `.ulib.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.ulib.toml` files
//! found, then loading `~/.ulib.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawLibrarySettings, RawSearchSettings, parse_config_file, parse_config_str,
};
pub use resolve::resolve_library_path;
use serde::Serialize;
pub use templates::{global_template, local_template};
pub use ulib_library::DEFAULT_SEARCH_COMMAND;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default iCloud library directory.
pub const DEFAULT_ICLOUD_LIBRARY: &str =
    "~/Library/Mobile Documents/X5AZV975AG~com~soulmen~ulysses3/Documents/Library";

/// Default On My Mac library directory.
pub const DEFAULT_LOCAL_LIBRARY: &str =
    "~/Library/Containers/com.soulmen.ulysses3/Data/Documents/Library";

/// Top-level merged configuration for ulib.
#[derive(Debug, Clone)]
pub struct Config {
    /// Library locations.
    pub library: LibrarySettings,
    /// External search settings.
    pub search: SearchSettings,
    /// Config files that contributed, highest precedence first.
    pub files: Vec<PathBuf>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.ulib.toml` files.
    ///
    /// Closer files win over files further up the tree, and all of them win over
    /// `~/.ulib.toml`. With no files at all the defaults are returned.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// The library sources to index, in order: iCloud, then On My Mac if enabled.
    pub fn sources(&self) -> Vec<Source> {
        let mut sources = vec![Source {
            kind: SourceKind::ICloud,
            library_dir: self.library.icloud.clone(),
        }];
        if self.library.include_local {
            sources.push(Source {
                kind: SourceKind::Local,
                library_dir: self.library.local.clone(),
            });
        }
        sources
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Library directories that don't exist or aren't directories
    /// - A search command that can't be found on `PATH`
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            library: &self.library,
            search: &self.search,
        };
        toml::to_string_pretty(&serializable)
            .map_err(|source| ConfigError::SerializeToml { source })
    }
}

/// Resolved `[library]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibrarySettings {
    /// iCloud library directory.
    pub icloud: PathBuf,
    /// On My Mac library directory.
    pub local: PathBuf,
    /// Whether the On My Mac library is indexed.
    pub include_local: bool,
}

/// Resolved `[search]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSettings {
    /// Program run for external search.
    pub command: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_SEARCH_COMMAND.to_string(),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Library locations.
    library: &'a LibrarySettings,
    /// Search settings.
    search: &'a SearchSettings,
}

/// Which of the two Ulysses storage locations a source is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The iCloud container.
    ICloud,
    /// The app's local container.
    Local,
}

impl SourceKind {
    /// Human-facing label, also used as the source tree's root title.
    pub fn label(self) -> &'static str {
        match self {
            Self::ICloud => "iCloud",
            Self::Local => "On My Mac",
        }
    }
}

/// A configured library source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Storage location kind.
    pub kind: SourceKind,
    /// Directory holding the library's group roots.
    pub library_dir: PathBuf,
}

impl Source {
    /// Shorthand for `self.kind.label()`.
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(include_local: bool) -> Config {
        Config {
            library: LibrarySettings {
                icloud: PathBuf::from("/cloud/Library"),
                local: PathBuf::from("/local/Library"),
                include_local,
            },
            search: SearchSettings::default(),
            files: vec![],
            config_root: None,
        }
    }

    #[test]
    fn search_defaults() {
        assert_eq!(SearchSettings::default().command, "mdfind");
        assert_eq!(
            SearchSettings::default().command,
            ulib_library::Mdfind::default().command()
        );
    }

    #[test]
    fn source_labels() {
        assert_eq!(SourceKind::ICloud.label(), "iCloud");
        assert_eq!(SourceKind::Local.label(), "On My Mac");
    }

    #[test]
    fn sources_in_order() {
        let sources = sample_config(true).sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].kind, SourceKind::ICloud);
        assert_eq!(sources[0].library_dir, PathBuf::from("/cloud/Library"));
        assert_eq!(sources[1].label(), "On My Mac");
        assert_eq!(sources[1].library_dir, PathBuf::from("/local/Library"));
    }

    #[test]
    fn local_source_can_be_disabled() {
        let sources = sample_config(false).sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].kind, SourceKind::ICloud);
    }

    #[test]
    fn settings_to_toml_round_trips() {
        let toml = sample_config(true).settings_to_toml().unwrap();

        assert!(toml.contains("[library]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("include_local = true"));
        assert!(toml.contains("command = \"mdfind\""));

        let parsed = parse_config_str(&toml, Path::new("rendered")).unwrap();
        let library = parsed.library.unwrap();
        assert_eq!(library.icloud.as_deref(), Some("/cloud/Library"));
        assert_eq!(library.local.as_deref(), Some("/local/Library"));
    }
}
