use std::path::{Path, PathBuf};

use crate::error::{HeaderGuardError, Result};

use super::Config;
use super::model::CONFIG_VERSION;
use super::validation::validate_config_semantics;

/// Result of loading a configuration, containing both the config and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// The file the config was read from, `None` for the built-in default.
    pub source: Option<PathBuf>,
}

impl LoadResult {
    /// Directory relative paths in the config resolve against.
    ///
    /// The config file's directory, or `fallback` for the built-in default.
    #[must_use]
    pub fn base_dir(&self, fallback: &Path) -> PathBuf {
        self.source
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| fallback.to_path_buf(), Path::to_path_buf)
    }
}

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default location.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    fn load(&self) -> Result<LoadResult>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<LoadResult>;
}

pub const LOCAL_CONFIG_NAME: &str = ".header-guard.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// Validate config version. Returns an error if version is unsupported.
fn validate_config_version(config: &Config) -> Result<()> {
    match &config.version {
        None => Ok(()),
        Some(v) if v == CONFIG_VERSION => Ok(()),
        Some(v) => Err(HeaderGuardError::Config(format!(
            "Unsupported config version '{v}'. Only version '{CONFIG_VERSION}' is supported."
        ))),
    }
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Get the platform-specific configuration directory for header-guard.
    ///
    /// - Windows: `%APPDATA%\header-guard`
    /// - macOS: `~/Library/Application Support/header-guard`
    /// - Linux: `~/.config/header-guard` (XDG)
    fn config_dir(&self) -> Option<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "header-guard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.header-guard.toml` in current directory
/// 2. `config.toml` in the platform-specific user config directory
/// 3. Returns `Config::default()` if no config found
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    #[must_use]
    pub const fn fs(&self) -> &F {
        &self.fs
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        validate_config_version(&config)?;
        validate_config_semantics(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<LoadResult> {
        if let Some(local_path) = self.local_config_path()
            && self.fs.exists(&local_path)
        {
            return self.load_from_path(&local_path);
        }

        if let Some(user_path) = self.user_config_path()
            && self.fs.exists(&user_path)
        {
            return self.load_from_path(&user_path);
        }

        tracing::debug!("no config file found, using defaults");
        Ok(LoadResult {
            config: Config::default(),
            source: None,
        })
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadResult> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| HeaderGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::parse_config(&content)?;
        tracing::info!(path = %path.display(), "loaded configuration");

        Ok(LoadResult {
            config,
            source: Some(path.to_path_buf()),
        })
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
