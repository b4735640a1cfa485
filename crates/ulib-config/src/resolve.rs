//! Path resolution for library locations.
//!
//! Library paths may be tilde-prefixed or relative to the config file that set them. They
//! are not required to exist: a missing library is reported later, not rejected here.
//! Paths that do exist are canonicalized, so tree locations compare equal to the real
//! paths an external search reports.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured library path to an absolute path.
///
/// - Tilde paths (`~/Library`) expand to the home directory
/// - Relative paths (`./lib`, `../shared`) are joined onto `config_dir`
/// - Absolute paths are kept
///
/// The result is canonicalized when it exists, resolving symlinks and `..`
/// components. A missing path is returned as joined.
pub fn resolve_library_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    };
    Ok(canonicalize_if_exists(absolute))
}

/// Canonicalizes `path`, or returns it unchanged if it cannot be resolved.
pub(crate) fn canonicalize_if_exists(path: PathBuf) -> PathBuf {
    path.canonicalize().unwrap_or(path)
}

/// Expands a leading `~` or `~/` to the home directory.
pub(crate) fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
