//! Pointer-driven move and resize sessions.
//!
//! A session records the element's committed geometry at `begin`, accumulates
//! canvas-space deltas while the pointer moves, and touches the shelf builder
//! only at `end`. Dropping or cancelling a session leaves the element exactly
//! as it was.

use planokit_core::{LayoutError, Point, Result, Size};
use tracing::debug;

use crate::shelf::ShelfBuilder;
use crate::viewport::Viewport;

/// An in-progress element drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    element_id: String,
    origin: Point,
    dx: f64,
    dy: f64,
}

impl DragSession {
    /// Starts dragging `element_id` from its committed position.
    pub fn begin(builder: &ShelfBuilder, element_id: &str) -> Result<Self> {
        let element = builder
            .element(element_id)
            .ok_or_else(|| LayoutError::UnknownElement {
                id: element_id.to_string(),
            })?;
        Ok(Self {
            element_id: element_id.to_string(),
            origin: element.position(),
            dx: 0.0,
            dy: 0.0,
        })
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Accumulates a pointer movement given in screen pixels.
    pub fn update(&mut self, screen_dx: f64, screen_dy: f64, viewport: &Viewport) {
        let (dx, dy) = viewport.delta_to_canvas(screen_dx, screen_dy);
        self.dx += dx;
        self.dy += dy;
    }

    /// Accumulated canvas-space displacement, before clamping.
    pub fn canvas_delta(&self) -> (f64, f64) {
        (self.dx, self.dy)
    }

    /// Where the element would land if the drag ended now. Nothing is committed.
    pub fn preview(&self, builder: &ShelfBuilder) -> Result<Point> {
        builder.clamped_position(
            &self.element_id,
            self.origin.x + self.dx,
            self.origin.y + self.dy,
        )
    }

    /// Commits the drag through the clamped move.
    pub fn end(self, builder: &mut ShelfBuilder) -> Result<Point> {
        debug!(
            "Drag of {} committed with delta ({:.2}, {:.2})",
            self.element_id, self.dx, self.dy
        );
        builder.move_element(&self.element_id, self.dx, self.dy)
    }

    /// Abandons the drag.
    pub fn cancel(self) {
        debug!("Drag of {} cancelled", self.element_id);
    }
}

/// An in-progress resize from the bottom-right handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    element_id: String,
    origin: Size,
    dw: f64,
    dh: f64,
}

impl ResizeSession {
    pub fn begin(builder: &ShelfBuilder, element_id: &str) -> Result<Self> {
        let element = builder
            .element(element_id)
            .ok_or_else(|| LayoutError::UnknownElement {
                id: element_id.to_string(),
            })?;
        Ok(Self {
            element_id: element_id.to_string(),
            origin: element.size(),
            dw: 0.0,
            dh: 0.0,
        })
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// Accumulates a handle movement given in screen pixels.
    pub fn update(&mut self, screen_dx: f64, screen_dy: f64, viewport: &Viewport) {
        let (dw, dh) = viewport.delta_to_canvas(screen_dx, screen_dy);
        self.dw += dw;
        self.dh += dh;
    }

    /// Size the element would have if the resize ended now. Nothing is committed.
    pub fn preview(&self, builder: &ShelfBuilder) -> Result<Size> {
        builder.clamped_size(
            &self.element_id,
            self.origin.width + self.dw,
            self.origin.height + self.dh,
        )
    }

    pub fn end(self, builder: &mut ShelfBuilder) -> Result<Size> {
        builder.resize_element(
            &self.element_id,
            self.origin.width + self.dw,
            self.origin.height + self.dh,
        )
    }

    pub fn cancel(self) {
        debug!("Resize of {} cancelled", self.element_id);
    }
}
