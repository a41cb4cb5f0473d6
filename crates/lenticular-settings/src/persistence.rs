//! Scene configuration files
//!
//! Scenes are stored as JSON or TOML, chosen by file extension. Both load and
//! save validate the scene, so an invalid configuration never reaches disk or
//! a caller.

use crate::config::SceneConfig;
use crate::error::{Result, SettingsError};
use std::path::{Path, PathBuf};
use tracing::info;

const APP_DIR: &str = "lenticular";
const CONFIG_FILE: &str = "scene.toml";

/// File format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Format implied by the extension of `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ConfigFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ConfigFormat::Toml),
            _ => Err(SettingsError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl SceneConfig {
    /// Load a scene from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!(path = %path.display(), panels = config.panels.len(), "Loaded scene config");
        Ok(config)
    }

    /// Save a scene to a `.json` or `.toml` file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!(path = %path.display(), "Saved scene config");
        Ok(())
    }
}

/// Platform config location: `<config dir>/lenticular/scene.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| SettingsError::ConfigDirectory("Could not determine config directory".to_string()))?;
    Ok(dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the scene at `path`, or the default scene if the file does not exist
pub fn load_or_default(path: &Path) -> Result<SceneConfig> {
    if path.exists() {
        SceneConfig::load_from_file(path)
    } else {
        info!(path = %path.display(), "No scene config found, using defaults");
        Ok(SceneConfig::default())
    }
}
