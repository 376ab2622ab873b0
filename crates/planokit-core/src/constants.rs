//! Layout and viewport constants shared across the workspace.

/// Smallest width or height an element may have, in canvas units.
pub const MIN_ELEMENT_SIZE: f64 = 4.0;

/// Intrinsic canvas width in canvas units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;

/// Intrinsic canvas height in canvas units.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.25;

/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 3.0;

/// Additive step applied by zoom in/out commands.
pub const ZOOM_STEP: f64 = 0.1;

/// Fit zoom never enlarges the canvas beyond 1:1.
pub const MAX_FIT_ZOOM: f64 = 1.0;

/// Where palette actions place a new element.
pub const DEFAULT_ELEMENT_X: f64 = 20.0;
pub const DEFAULT_ELEMENT_Y: f64 = 20.0;

/// Default (width, height) for each element type.
pub const SHELF_LINE_SIZE: (f64, f64) = (400.0, 8.0);
pub const DIVIDER_LINE_SIZE: (f64, f64) = (8.0, 160.0);
pub const SLOT_SIZE: (f64, f64) = (120.0, 160.0);

/// Number of slots generated by the "add shelf" action.
pub const DEFAULT_SLOTS_PER_SHELF: usize = 5;

/// Horizontal gap between generated slots.
pub const SLOT_GAP: f64 = 10.0;

/// Drop zone id of the read-only product gallery.
pub const PRODUCT_GALLERY_ZONE: &str = "product-gallery";

/// Tolerance for floating-point geometry comparisons.
pub const GEOMETRY_EPSILON: f64 = 1e-9;
