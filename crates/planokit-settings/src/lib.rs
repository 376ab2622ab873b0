//! PlanoKit Settings Crate
//!
//! Handles configuration for the planogram editor: canvas dimensions, zoom
//! limits, element defaults, and where templates are stored.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, ElementSettings, StorageSettings, ViewportSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
