//! Configuration and settings management for PlanoKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Canvas settings (intrinsic size)
//! - Viewport settings (zoom limits and step)
//! - Element settings (minimum size, generated shelf layout)
//! - Storage settings (template and catalog files)

use planokit_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_SLOTS_PER_SHELF, MAX_ZOOM,
    MIN_ELEMENT_SIZE, MIN_ZOOM, ZOOM_STEP,
};
use planokit_core::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

const APP_DIR: &str = "planokit";

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Intrinsic canvas width in canvas units
    pub width: f64,
    /// Intrinsic canvas height in canvas units
    pub height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Additive step for zoom in/out
    pub zoom_step: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }
}

/// Element settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSettings {
    /// Minimum width and height of any element
    pub min_size: f64,
    /// Slots generated by the "add shelf" action
    pub slots_per_shelf: usize,
}

impl Default for ElementSettings {
    fn default() -> Self {
        Self {
            min_size: MIN_ELEMENT_SIZE,
            slots_per_shelf: DEFAULT_SLOTS_PER_SHELF,
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON file holding both template namespaces
    pub templates_path: PathBuf,
    /// Optional product catalog JSON file
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let base = Config::config_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            templates_path: base.join("templates.json"),
            catalog_path: None,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub viewport: ViewportSettings,
    pub elements: ElementSettings,
    pub storage: StorageSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from file (JSON or TOML, by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into(),
                )
            }
        };

        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from file, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file (JSON or TOML, by extension)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into(),
                )
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = |key: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
        };

        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;
        positive("viewport.min_zoom", self.viewport.min_zoom)?;
        positive("viewport.max_zoom", self.viewport.max_zoom)?;
        positive("viewport.zoom_step", self.viewport.zoom_step)?;
        positive("elements.min_size", self.elements.min_size)?;

        if self.viewport.max_zoom < self.viewport.min_zoom {
            return Err(ConfigError::ValueOutOfRange {
                key: "viewport.max_zoom".to_string(),
                value: format!(
                    "{} (below min_zoom {})",
                    self.viewport.max_zoom, self.viewport.min_zoom
                ),
            });
        }

        if self.elements.min_size > self.canvas.width.min(self.canvas.height) {
            return Err(ConfigError::ValueOutOfRange {
                key: "elements.min_size".to_string(),
                value: format!("{} (larger than canvas)", self.elements.min_size),
            });
        }

        Ok(())
    }

    /// Intrinsic canvas size
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas.width, self.canvas.height)
    }

    /// Platform config directory for PlanoKit
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Default config file location
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.canvas_size(), Size::new(1200.0, 800.0));
        if let Ok(dir) = Config::config_dir() {
            assert!(dir.ends_with(APP_DIR));
            assert_eq!(config.storage.templates_path, dir.join("templates.json"));
        }
        assert!(config.storage.templates_path.ends_with("templates.json"));
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.canvas.width = 1600.0;
        config.viewport.max_zoom = 4.0;
        config.storage.catalog_path = Some(dir.path().join("catalog.json"));
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"canvas": {"width": 900.0}}"#).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.canvas.width, 900.0);
        assert_eq!(loaded.canvas.height, DEFAULT_CANVAS_HEIGHT);
        assert_eq!(loaded.viewport, ViewportSettings::default());
    }

    #[test]
    fn test_validation_rejects_bad_zoom() {
        let mut config = Config::default();
        config.viewport.min_zoom = 2.0;
        config.viewport.max_zoom = 1.0;
        assert!(config.validate().is_err());

        config.viewport.max_zoom = 3.0;
        config.viewport.zoom_step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let err = Config::default().save_to_file(&path).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
