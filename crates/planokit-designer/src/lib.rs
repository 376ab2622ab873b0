//! # PlanoKit Designer
//!
//! This crate provides the layout and editing engine for planogram authoring:
//! shelf geometry, the canvas viewport, slot-product binding, and named
//! template persistence.
//!
//! ## Core Components
//!
//! - **Elements**: shelf-lines, divider-lines, and slots with canvas-space geometry
//! - **Shelf Builder**: add, move (clamped), resize (floored), and template instantiation
//! - **Viewport**: fit zoom, zoom steps, centering, screen ↔ canvas conversion
//! - **Drag Sessions**: uncommitted pointer drags that commit or cancel cleanly
//! - **Binding Engine**: drag-drop and chooser assignment, catalog filtering
//! - **Templates**: shelf and planogram snapshots behind a repository trait
//! - **Session**: ties the above together with an explicit name-prompt state
//!
//! ## Architecture
//!
//! ```text
//! PlanogramSession
//!   ├── Viewport        (screen → canvas)
//!   ├── ShelfBuilder    (shelves, elements)
//!   ├── BindingEngine   (planogram, chooser, filters)
//!   ├── Catalog         (read-only products)
//!   └── TemplateStore   (TemplateRepository)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use planokit_designer::{Catalog, ElementKind, MemoryTemplateRepository, PlanogramSession, Point, SessionOptions};
//!
//! let mut session = PlanogramSession::new(SessionOptions::default(), Catalog::default(), MemoryTemplateRepository::new());
//! session.mount(900.0, 600.0)?;
//! let slot = session.drop_from_palette(ElementKind::Slot, Point::new(120.0, 80.0))?;
//! session.assign(&slot, "lays-classic")?;
//! session.save_shelf_template("endcap-v1")?;
//! ```

pub mod binding;
pub mod catalog;
pub mod drag;
pub mod element;
pub mod planogram;
pub mod session;
pub mod shelf;
pub mod templates;
pub mod viewport;

pub use binding::{BindingEngine, DropEvent, DropOutcome, ProductChooser};
pub use catalog::{Catalog, Product};
pub use drag::{DragSession, ResizeSession};
pub use element::{Element, ElementKind};
pub use planogram::Planogram;
pub use session::{EditorMode, PlanogramSession, PromptAction, PromptResult, SessionOptions};
pub use shelf::{InstantiatedShelf, Shelf, ShelfBuilder};
pub use templates::{
    JsonFileTemplateRepository, MemoryTemplateRepository, SaveOutcome, TemplateKind,
    TemplateRepository, TemplateStore,
};
pub use viewport::{Viewport, ZoomLimits};

pub use planokit_core::{Error, Point, Result, Size};
