//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use ulib_config::Config;
use ulib_library::{Library, LogReporter, Mdfind, SourceSpec, assemble_library};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration.
    pub config: Config,
    /// Library assembled on first use.
    library: Option<Library>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = Config::load(&cwd).map_err(|e| {
            eprintln!("error: failed to load configuration: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self {
            cwd,
            config,
            library: None,
        })
    }

    /// Loads only the current directory, using default settings.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = Config::load_from_files(&[]).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self {
            cwd,
            config,
            library: None,
        })
    }

    /// Library sources in the order they are assembled.
    pub fn source_specs(&self) -> Vec<SourceSpec> {
        self.config
            .sources()
            .into_iter()
            .map(|source| SourceSpec::new(source.label(), source.library_dir))
            .collect()
    }

    /// Returns the assembled library, reading it from disk on first call.
    pub fn library(&mut self) -> Result<&Library, ExitCode> {
        let library = match self.library.take() {
            Some(library) => library,
            None => assemble_library(&self.source_specs(), &mut LogReporter).map_err(|e| {
                eprintln!("error: failed to read library: {e}");
                ExitCode::FAILURE
            })?,
        };
        Ok(self.library.insert(library))
    }

    /// The configured external search provider.
    pub fn search_provider(&self) -> Mdfind {
        Mdfind::new(&self.config.search.command)
    }

    /// Resolves a user-supplied path against the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}
