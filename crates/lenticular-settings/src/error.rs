//! Error types for the settings crate.
//!
//! Wraps the I/O and format errors of configuration persistence together with
//! the validation errors a loaded configuration can raise.

use lenticular_core::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file extension is neither `.json` nor `.toml`.
    #[error("Config file must be .json or .toml: {0}")]
    UnsupportedFormat(PathBuf),

    /// The platform configuration directory could not be found.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// A panel in the scene failed validation.
    #[error("Invalid panel {index}: {source}")]
    InvalidPanel {
        index: usize,
        #[source]
        source: ConfigError,
    },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
