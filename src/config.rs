//! Configuration for directory-driven composite builds
//!
//! Holds the shared source root that discovery lists and an optional build
//! root under which every unit gets its own artifact directory. Without a build
//! root override the host's root unit build directory is used. Both accept
//! absolute paths or paths relative to the composite build's root directory.
//!
//! # Environment Variables
//!
//! - `MULTIPROJECT_SOURCE_DIR`: source root override - default: `<root>/src`
//! - `MULTIPROJECT_BUILD_DIR`: build root override - default: the root unit's build directory
//!
//! # Settings File
//!
//! ```toml
//! [multiproject]
//! source_directory = "modules"
//! build_directory = "out"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use multiproject::config::MultiProjectConfig;
//! use multiproject::fs::RealFileSystem;
//!
//! let fs = RealFileSystem::new();
//! let mut config = MultiProjectConfig::new("/work/repo");
//! config.set_source_directory(&fs, "modules").expect("modules is not a file");
//! assert_eq!(config.source_directory(), std::path::Path::new("/work/repo/modules"));
//! ```

use crate::fs::FileSystem;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_SOURCE_DIR: &str = "src";

pub const SOURCE_DIR_ENV: &str = "MULTIPROJECT_SOURCE_DIR";
pub const BUILD_DIR_ENV: &str = "MULTIPROJECT_BUILD_DIR";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured directory points at an existing plain file
    #[error("The multiproject directory is not a directory: {0:?}")]
    NotADirectory(PathBuf),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    Parse { field: String, error: String },
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    multiproject: Option<SettingsTable>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsTable {
    source_directory: Option<PathBuf>,
    build_directory: Option<PathBuf>,
}

/// Resolved source and build roots of a composite build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiProjectConfig {
    /// Root directory of the composite build; relative overrides resolve against it
    root_dir: PathBuf,

    /// Directory whose immediate children become build units
    source_dir: PathBuf,

    /// Override of the directory under which each unit gets `<build_dir>/<unit name>`
    build_dir: Option<PathBuf>,
}

impl MultiProjectConfig {
    /// Creates the default configuration: `<root>/src` and no build root override.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        Self {
            source_dir: root_dir.join(DEFAULT_SOURCE_DIR),
            build_dir: None,
            root_dir,
        }
    }

    /// Loads the defaults and applies `MULTIPROJECT_*` environment overrides.
    pub fn from_env(fs: &dyn FileSystem, root_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::new(root_dir);

        if let Ok(dir) = env::var(SOURCE_DIR_ENV) {
            config.set_source_directory(fs, dir)?;
        }
        if let Ok(dir) = env::var(BUILD_DIR_ENV) {
            config.set_build_directory(fs, dir)?;
        }

        Ok(config)
    }

    /// Loads the defaults and applies the optional `[multiproject]` table of a
    /// TOML settings document.
    pub fn from_toml_str(
        fs: &dyn FileSystem,
        root_dir: impl Into<PathBuf>,
        text: &str,
    ) -> Result<Self, ConfigError> {
        let settings: SettingsFile = toml::from_str(text).map_err(|e| ConfigError::Parse {
            field: "multiproject".to_string(),
            error: e.to_string(),
        })?;

        let mut config = Self::new(root_dir);
        if let Some(table) = settings.multiproject {
            if let Some(dir) = table.source_directory {
                config.set_source_directory(fs, dir)?;
            }
            if let Some(dir) = table.build_directory {
                config.set_build_directory(fs, dir)?;
            }
        }

        Ok(config)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn source_directory(&self) -> &Path {
        &self.source_dir
    }

    /// The build root override, if one was set.
    pub fn build_directory(&self) -> Option<&Path> {
        self.build_dir.as_deref()
    }

    /// The build root in effect: the override when set, otherwise
    /// `host_build_dir`, the root unit's own build directory.
    pub fn build_root<'a>(&'a self, host_build_dir: &'a Path) -> &'a Path {
        self.build_dir.as_deref().unwrap_or(host_build_dir)
    }

    /// Sets the source root. Fails with [`ConfigError::NotADirectory`] if the
    /// resolved path is an existing plain file, leaving the prior value in place.
    pub fn set_source_directory(
        &mut self,
        fs: &dyn FileSystem,
        path: impl AsRef<Path>,
    ) -> Result<(), ConfigError> {
        self.source_dir = self.resolve_directory(fs, path.as_ref())?;
        Ok(())
    }

    /// Sets the build root with the same resolution rules as the source root.
    pub fn set_build_directory(
        &mut self,
        fs: &dyn FileSystem,
        path: impl AsRef<Path>,
    ) -> Result<(), ConfigError> {
        self.build_dir = Some(self.resolve_directory(fs, path.as_ref())?);
        Ok(())
    }

    fn resolve_directory(&self, fs: &dyn FileSystem, path: &Path) -> Result<PathBuf, ConfigError> {
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        };

        if fs.is_file(&resolved) {
            return Err(ConfigError::NotADirectory(resolved));
        }

        Ok(resolved)
    }

    /// Validates the configuration
    ///
    /// The root directory must be absolute so every derived path is absolute too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root_dir.is_absolute() {
            return Err(ConfigError::ValidationFailed(format!(
                "Root directory must be absolute: {:?}",
                self.root_dir
            )));
        }
        Ok(())
    }
}

impl fmt::Display for MultiProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Multiproject Configuration:")?;
        writeln!(f, "  Root: {}", self.root_dir.display())?;
        writeln!(f, "  Source Directory: {}", self.source_dir.display())?;
        match &self.build_dir {
            Some(dir) => writeln!(f, "  Build Directory: {}", dir.display())?,
            None => writeln!(f, "  Build Directory: (root unit build directory)")?,
        }
        Ok(())
    }
}
