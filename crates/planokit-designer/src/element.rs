//! Element model: the positioned, sized units that make up a shelf.

use planokit_core::constants::{
    DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y, DIVIDER_LINE_SIZE, SHELF_LINE_SIZE, SLOT_SIZE,
};
use planokit_core::{Point, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element types available from the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// Horizontal shelf surface (wide and thin)
    ShelfLine,
    /// Vertical separator (thin and tall)
    DividerLine,
    /// Product position eligible for assignment
    Slot,
}

impl ElementKind {
    /// Get kind as string
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::ShelfLine => "shelf-line",
            ElementKind::DividerLine => "divider-line",
            ElementKind::Slot => "slot",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "shelf-line" => Some(ElementKind::ShelfLine),
            "divider-line" => Some(ElementKind::DividerLine),
            "slot" => Some(ElementKind::Slot),
            _ => None,
        }
    }

    /// Size given to a freshly created element of this kind.
    pub fn default_size(&self) -> Size {
        let (width, height) = match self {
            ElementKind::ShelfLine => SHELF_LINE_SIZE,
            ElementKind::DividerLine => DIVIDER_LINE_SIZE,
            ElementKind::Slot => SLOT_SIZE,
        };
        Size::new(width, height)
    }

    /// Short prefix used when generating ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ElementKind::ShelfLine => "line",
            ElementKind::DividerLine => "divider",
            ElementKind::Slot => "slot",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shelf-line, divider-line, or slot on the canvas.
///
/// Coordinates are canvas-space with the origin at the top-left of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Only meaningful for slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl Element {
    /// Creates an element at the default palette position with the kind's default size.
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        let size = kind.default_size();
        Self {
            id: id.into(),
            kind,
            x: DEFAULT_ELEMENT_X,
            y: DEFAULT_ELEMENT_Y,
            width: size.width,
            height: size.height,
            product_id: None,
        }
    }

    /// Builder-style position override.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Builder-style size override.
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn is_slot(&self) -> bool {
        self.kind == ElementKind::Slot
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns true if the canvas-space point lies inside the element.
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes_by_kind() {
        let line = ElementKind::ShelfLine.default_size();
        assert!(line.width > line.height);
        let divider = ElementKind::DividerLine.default_size();
        assert!(divider.height > divider.width);
        assert_eq!(ElementKind::Slot.default_size(), Size::new(120.0, 160.0));
    }

    #[test]
    fn test_kind_parse() {
        for kind in [
            ElementKind::ShelfLine,
            ElementKind::DividerLine,
            ElementKind::Slot,
        ] {
            assert_eq!(ElementKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ElementKind::parse("shelf"), None);
    }

    #[test]
    fn test_element_json_shape() {
        let el = Element::new("el-1", ElementKind::Slot).at(120.0, 80.0);
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "slot");
        assert_eq!(json["x"], 120.0);
        assert_eq!(json["width"], 120.0);
        assert!(json.get("productId").is_none());

        let divider: Element = serde_json::from_str(
            r#"{"id":"d","type":"divider-line","x":0,"y":0,"width":8,"height":160}"#,
        )
        .unwrap();
        assert_eq!(divider.kind, ElementKind::DividerLine);
        assert_eq!(divider.product_id, None);
    }

    #[test]
    fn test_contains_point() {
        let el = Element::new("s", ElementKind::Slot).at(10.0, 10.0);
        assert!(el.contains_point(&Point::new(15.0, 100.0)));
        assert!(!el.contains_point(&Point::new(5.0, 100.0)));
    }
}
