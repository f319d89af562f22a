//! Error types for preset storage and application

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for preset operations
pub type Result<T> = std::result::Result<T, PresetError>;

/// Structural failures. Data-quality problems found while applying a preset
/// are reported through `ApplyReport` instead.
#[derive(Error, Debug)]
pub enum PresetError {
    /// Preset file could not be read or written
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store has no backing file to save into
    #[error("no preset file bound to this store")]
    NoPath,

    #[error("preset not found: {0}")]
    PresetNotFound(String),

    #[error("preset already exists: {0}")]
    DuplicatePreset(String),

    /// Preset name the file format cannot read back
    #[error("invalid preset name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Binding the file format cannot read back
    #[error("invalid binding {property:?} = {value:?}: {reason}")]
    InvalidBinding {
        property: String,
        value: String,
        reason: &'static str,
    },

    /// Asset search collaborator could not be reached
    #[error("asset search failed: {0}")]
    AssetSearch(String),

    #[error("settings error: {0}")]
    Settings(String),
}

impl PresetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
