//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and resolving library paths against the file that set them.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, DEFAULT_ICLOUD_LIBRARY, DEFAULT_LOCAL_LIBRARY, LibrarySettings,
    SearchSettings,
    parse::{RawConfig, RawLibrarySettings},
    resolve::{canonicalize_if_exists, expand_tilde, resolve_library_path},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory relative paths in this file are resolved against.
    fn config_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// the working directory), global config last. For every setting the first file that
/// defines it wins; unset settings take their defaults.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let library = merge_library_settings(configs)?;
    let search = merge_search_settings(configs);

    Ok(Config {
        library,
        search,
        files: configs.iter().map(|c| c.path.clone()).collect(),
        config_root: configs.first().map(|c| c.config_dir().to_path_buf()),
    })
}

/// Merges `[library]`, resolving each path against its defining file.
fn merge_library_settings(configs: &[ParsedConfig]) -> Result<LibrarySettings, ConfigError> {
    let icloud = first_path(configs, |raw| raw.icloud.as_deref())?;
    let local = first_path(configs, |raw| raw.local.as_deref())?;
    let include_local = configs
        .iter()
        .find_map(|parsed| parsed.config.library.as_ref()?.include_local)
        .unwrap_or(true);

    Ok(LibrarySettings {
        icloud: match icloud {
            Some(path) => path,
            None => canonicalize_if_exists(expand_tilde(DEFAULT_ICLOUD_LIBRARY)?),
        },
        local: match local {
            Some(path) => path,
            None => canonicalize_if_exists(expand_tilde(DEFAULT_LOCAL_LIBRARY)?),
        },
        include_local,
    })
}

/// Resolves the first library path `field` selects, if any file sets it.
fn first_path(
    configs: &[ParsedConfig],
    field: impl Fn(&RawLibrarySettings) -> Option<&str>,
) -> Result<Option<PathBuf>, ConfigError> {
    for parsed in configs {
        if let Some(library) = &parsed.config.library
            && let Some(path) = field(library)
        {
            return resolve_library_path(path, parsed.config_dir()).map(Some);
        }
    }
    Ok(None)
}

/// Merges `[search]`.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();
    if let Some(command) = configs
        .iter()
        .find_map(|parsed| parsed.config.search.as_ref()?.command.clone())
    {
        result.command = command;
    }
    result
}
