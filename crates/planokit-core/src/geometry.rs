//! Canvas geometry primitives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point offset by (dx, dy).
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Width and height of an element or surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the size with each side raised to at least `floor`.
    ///
    /// NaN sides collapse to the floor.
    pub fn at_least(&self, floor: f64) -> Self {
        let side = |v: f64| if v.is_finite() { v.max(floor) } else { floor };
        Self::new(side(self.width), side(self.height))
    }

    /// Returns the size scaled uniformly.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Clamps `value` into `[0, extent - span]`, collapsing to 0 when `span` exceeds `extent`.
pub fn clamp_into(value: f64, span: f64, extent: f64) -> f64 {
    let max = (extent - span).max(0.0);
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_into_range() {
        assert_eq!(clamp_into(-5.0, 10.0, 100.0), 0.0);
        assert_eq!(clamp_into(95.0, 10.0, 100.0), 90.0);
        assert_eq!(clamp_into(42.0, 10.0, 100.0), 42.0);
    }

    #[test]
    fn test_clamp_into_oversized_span() {
        assert_eq!(clamp_into(30.0, 150.0, 100.0), 0.0);
        assert_eq!(clamp_into(f64::NAN, 10.0, 100.0), 0.0);
    }

    #[test]
    fn test_size_floor() {
        let s = Size::new(1.0, f64::NAN).at_least(4.0);
        assert_eq!(s, Size::new(4.0, 4.0));
        assert_eq!(Size::new(50.0, 60.0).at_least(4.0), Size::new(50.0, 60.0));
    }
}
