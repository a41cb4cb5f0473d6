//! Lenticular Settings Crate
//!
//! Panel and scene configuration, validation and JSON/TOML persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{AspectRatio, FaceConfig, PanelConfig, SceneConfig, FACE_COUNT};
pub use error::{Result, SettingsError};
pub use persistence::{default_config_path, load_or_default, ConfigFormat};
