use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the configuration phase of a composite build.
///
/// An absent source root is not represented here: it means zero units.
#[derive(Debug, Error)]
pub enum MultiProjectError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Failed to list source root {path:?}: {source:#}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Units '{first}' and '{second}' resolve to the same build directory {dir:?}")]
    BuildDirCollision {
        first: String,
        second: String,
        dir: PathBuf,
    },

    #[error("Configuration is frozen once settings have been evaluated")]
    ConfigFrozen,

    #[error("Settings have already been evaluated")]
    AlreadyEvaluated,

    #[error("Failed to serialize layout: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MultiProjectError>;
