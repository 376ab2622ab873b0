//! Viewport and coordinate transformation for the shelf canvas.
//!
//! Handles conversion between screen coordinates (pixels inside the scroll
//! container) and canvas coordinates (the un-zoomed space element positions
//! are stored in). Manages zoom, scroll offsets, and the fit-to-container
//! baseline.

use std::fmt;

use planokit_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_FIT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
use planokit_core::{Point, Size};
use tracing::debug;

/// Zoom bounds and step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ZoomLimits {
    /// Creates limits, falling back to defaults for any non-positive or inverted value.
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        let min = if valid(min) { min } else { MIN_ZOOM };
        let max = if valid(max) && max >= min { max } else { MAX_ZOOM.max(min) };
        let step = if valid(step) { step } else { ZOOM_STEP };
        Self { min, max, step }
    }

    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self::new(MIN_ZOOM, MAX_ZOOM, ZOOM_STEP)
    }
}

/// Represents the viewport transformation state (zoom and scroll).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    scroll_x: f64,
    scroll_y: f64,
    canvas: Size,
    container: Size,
    fit_zoom: Option<f64>,
    limits: ZoomLimits,
}

impl Viewport {
    /// Creates a viewport for a canvas of the given intrinsic size at 1:1 zoom.
    pub fn new(canvas: Size) -> Self {
        Self {
            zoom: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            canvas,
            container: canvas,
            fit_zoom: None,
            limits: ZoomLimits::default(),
        }
    }

    /// Replaces the zoom limits, re-clamping the current zoom.
    pub fn with_limits(mut self, limits: ZoomLimits) -> Self {
        self.limits = limits;
        self.zoom = limits.clamp(self.zoom);
        self
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Intrinsic (un-zoomed) canvas size.
    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    /// Visible container size in screen pixels.
    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Canvas size as drawn at the current zoom.
    pub fn rendered_size(&self) -> Size {
        self.canvas.scaled(self.zoom)
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Cached fit zoom from the last mount.
    pub fn fit_zoom(&self) -> Option<f64> {
        self.fit_zoom
    }

    /// Sets the zoom level, clamped to the limits. Non-finite or non-positive values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            return;
        }
        self.zoom = self.limits.clamp(zoom);
    }

    /// Zooms in by one step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.limits.step);
    }

    /// Zooms out by one step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.limits.step);
    }

    /// Called when the canvas is mounted into a container.
    ///
    /// Computes `clamp(container_width / canvas_width, min_zoom, 1.0)`, caches
    /// it as the reset baseline, applies it, and centers the design.
    pub fn mount(&mut self, container_width: f64, container_height: f64) -> f64 {
        self.container = Size::new(container_width.max(0.0), container_height.max(0.0));
        let ratio = if self.canvas.width > 0.0 {
            self.container.width / self.canvas.width
        } else {
            MAX_FIT_ZOOM
        };
        let fit = if ratio.is_finite() {
            ratio.clamp(self.limits.min, MAX_FIT_ZOOM.max(self.limits.min))
        } else {
            MAX_FIT_ZOOM
        };
        self.fit_zoom = Some(fit);
        self.zoom = self.limits.clamp(fit);
        self.center_on_design();
        debug!("Mounted viewport: {}", self);
        fit
    }

    /// Updates the container size without recomputing the fit baseline.
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.container = Size::new(width.max(0.0), height.max(0.0));
    }

    /// Reapplies the cached fit zoom and re-centers.
    pub fn reset_view(&mut self) {
        let baseline = self.fit_zoom.unwrap_or(MAX_FIT_ZOOM);
        self.zoom = self.limits.clamp(baseline);
        self.center_on_design();
    }

    /// Gets the horizontal scroll offset in screen pixels.
    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    /// Gets the vertical scroll offset in screen pixels.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Sets the scroll offset.
    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// Scrolls by a delta amount.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.scroll_x += dx;
        self.scroll_y += dy;
    }

    /// Aligns the canvas center with the container center at the current zoom.
    ///
    /// Uses the rendered size. When the rendered canvas is smaller than the
    /// container on an axis, that axis cannot scroll and its offset is 0.
    pub fn center_on_design(&mut self) {
        let rendered = self.rendered_size();
        self.scroll_x = ((rendered.width - self.container.width) / 2.0).max(0.0);
        self.scroll_y = ((rendered.height - self.container.height) / 2.0).max(0.0);
    }

    /// Converts a point inside the container to canvas coordinates.
    ///
    /// Formula:
    /// ```text
    /// canvas_x = (screen_x + scroll_x) / zoom
    /// canvas_y = (screen_y + scroll_y) / zoom
    /// ```
    pub fn to_canvas_space(&self, screen: Point) -> Point {
        Point::new(
            (screen.x + self.scroll_x) / self.zoom,
            (screen.y + self.scroll_y) / self.zoom,
        )
    }

    /// Converts canvas coordinates to a point inside the container.
    pub fn to_screen_space(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom - self.scroll_x,
            canvas.y * self.zoom - self.scroll_y,
        )
    }

    /// Converts a pointer delta in screen pixels to a canvas-space delta.
    ///
    /// Every drag and resize delta must pass through here before it reaches
    /// the shelf builder.
    pub fn delta_to_canvas(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.zoom, dy / self.zoom)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Scroll: ({:.1}, {:.1})",
            self.zoom, self.scroll_x, self.scroll_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_zoom_narrow_container() {
        let mut viewport = Viewport::default();
        let fit = viewport.mount(600.0, 400.0);
        assert!((fit - 0.5).abs() < 1e-9);
        assert_eq!(viewport.zoom(), fit);
        assert_eq!(viewport.fit_zoom(), Some(fit));
    }

    #[test]
    fn test_fit_zoom_never_enlarges() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.mount(4000.0, 3000.0), 1.0);
    }

    #[test]
    fn test_fit_zoom_respects_minimum() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.mount(60.0, 40.0), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_steps_are_clamped() {
        let mut viewport = Viewport::default();
        for _ in 0..100 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom(), MAX_ZOOM);
        for _ in 0..100 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.zoom(), MIN_ZOOM);

        viewport.set_zoom(0.0);
        viewport.set_zoom(f64::NAN);
        assert_eq!(viewport.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_reset_view_restores_fit() {
        let mut viewport = Viewport::default();
        viewport.mount(900.0, 500.0);
        viewport.zoom_in();
        viewport.zoom_in();
        viewport.scroll_by(300.0, 10.0);
        viewport.reset_view();
        assert!((viewport.zoom() - 0.75).abs() < 1e-9);
        assert_eq!((viewport.scroll_x(), viewport.scroll_y()), (0.0, 50.0));
    }

    #[test]
    fn test_center_uses_rendered_size() {
        let mut viewport = Viewport::default();
        viewport.set_container_size(800.0, 600.0);
        viewport.set_zoom(2.0);
        viewport.center_on_design();
        // Rendered 2400x1600 inside 800x600.
        assert_eq!(viewport.scroll_x(), 800.0);
        assert_eq!(viewport.scroll_y(), 500.0);

        let center = viewport.to_canvas_space(Point::new(400.0, 300.0));
        assert!((center.x - 600.0).abs() < 1e-9);
        assert!((center.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_screen_canvas_inverse() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(1.7);
        viewport.set_scroll(35.0, 12.0);
        let p = Point::new(321.0, 123.0);
        let back = viewport.to_canvas_space(viewport.to_screen_space(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_delta_divided_by_zoom() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(0.5);
        assert_eq!(viewport.delta_to_canvas(100.0, -40.0), (200.0, -80.0));
    }

    #[test]
    fn test_invalid_limits_fall_back() {
        let limits = ZoomLimits::new(-1.0, 0.1, 0.0);
        assert_eq!(limits.min, MIN_ZOOM);
        assert_eq!(limits.max, MAX_ZOOM);
        assert_eq!(limits.step, ZOOM_STEP);
    }
}
