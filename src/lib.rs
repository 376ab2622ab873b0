//! # PlanoKit
//!
//! A Rust planogram authoring engine: merchandising staff lay out shelf
//! geometry (shelf-lines, dividers, product slots) and bind catalog products
//! to slots.
//!
//! ## Architecture
//!
//! PlanoKit is organized as a workspace with multiple crates:
//!
//! 1. **planokit-core** - Errors, geometry primitives, constants, id generation
//! 2. **planokit-designer** - Shelf builder, viewport, binding engine, templates, session
//! 3. **planokit-settings** - Configuration files and validation
//! 4. **planokit** - Facade that wires configuration into a ready session
//!
//! The hosting view layer owns rendering and input capture; it forwards
//! normalized pointer and drop events into a [`PlanogramSession`].

use std::path::Path;

pub use planokit_core::{Error, LayoutError, Point, Result, SessionError, Size, TemplateError};
pub use planokit_designer::{
    BindingEngine, Catalog, DragSession, DropEvent, DropOutcome, EditorMode, Element, ElementKind,
    InstantiatedShelf, JsonFileTemplateRepository, MemoryTemplateRepository, Planogram,
    PlanogramSession, Product, PromptAction, PromptResult, ResizeSession, SaveOutcome,
    SessionOptions, Shelf, ShelfBuilder, TemplateKind, TemplateRepository, TemplateStore, Viewport,
    ZoomLimits,
};
pub use planokit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Session parameters derived from a validated config.
pub fn session_options(config: &Config) -> SessionOptions {
    SessionOptions {
        canvas: config.canvas_size(),
        zoom_limits: ZoomLimits::new(
            config.viewport.min_zoom,
            config.viewport.max_zoom,
            config.viewport.zoom_step,
        ),
        min_element_size: config.elements.min_size,
        slots_per_shelf: config.elements.slots_per_shelf,
    }
}

/// Opens a session backed by the configured template file and catalog.
///
/// A missing catalog path yields an empty catalog; a configured but
/// unreadable catalog is an error.
pub fn open_session(config: &Config) -> anyhow::Result<PlanogramSession<JsonFileTemplateRepository>> {
    config.validate()?;

    let catalog = match config.storage.catalog_path.as_deref() {
        Some(path) => load_catalog(path)?,
        None => Catalog::default(),
    };
    let repository = JsonFileTemplateRepository::open(&config.storage.templates_path)?;

    tracing::info!(
        "Opened session: {} products, templates at {}",
        catalog.len(),
        repository.path().display()
    );
    Ok(PlanogramSession::new(
        session_options(config),
        catalog,
        repository,
    ))
}

fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    Catalog::load_from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load catalog {}: {}", path.display(), e))
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.storage.templates_path = dir.path().join("templates.json");
        config
    }

    #[test]
    fn test_open_session_without_catalog() {
        let dir = TempDir::new().unwrap();
        let session = open_session(&config_in(&dir)).unwrap();
        assert!(session.catalog().is_empty());
        assert!(session
            .list_template_names(TemplateKind::Shelf)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_open_session_loads_catalog_and_templates() {
        let dir = TempDir::new().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        std::fs::write(
            &catalog_path,
            r#"[
                {"id": "lays-classic", "name": "Lays Classic", "image": "/images/products/lays.jpg"},
                {"id": "mms", "name": "M&Ms", "image": "/images/products/mms.webp"}
            ]"#,
        )
        .unwrap();

        let mut config = config_in(&dir);
        config.storage.catalog_path = Some(catalog_path);

        {
            let mut session = open_session(&config).unwrap();
            assert_eq!(session.catalog().len(), 2);
            let slot = session.add_element(ElementKind::Slot).unwrap();
            session.assign(&slot, "mms").unwrap();
            session.save_shelf_template("endcap").unwrap();
        }

        let session = open_session(&config).unwrap();
        assert_eq!(
            session.list_template_names(TemplateKind::Shelf).unwrap(),
            vec!["endcap"]
        );
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.storage.catalog_path = Some(dir.path().join("absent.json"));
        assert!(open_session(&config).is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.canvas.width = 0.0;
        assert!(open_session(&config).is_err());
    }

    #[test]
    fn test_session_options_follow_config() {
        let mut config = Config::default();
        config.canvas.width = 1600.0;
        config.viewport.max_zoom = 4.0;
        config.elements.slots_per_shelf = 3;

        let options = session_options(&config);
        assert_eq!(options.canvas.width, 1600.0);
        assert_eq!(options.zoom_limits.max, 4.0);
        assert_eq!(options.slots_per_shelf, 3);
    }
}
