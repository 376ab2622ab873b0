//! Shelf builder: owns every shelf and the geometry of its elements.
//!
//! All coordinates handled here are canvas-space. Pointer deltas must be
//! converted with [`crate::viewport::Viewport::delta_to_canvas`] before they
//! reach [`ShelfBuilder::move_element`] or [`ShelfBuilder::resize_element`].

use std::collections::HashSet;

use planokit_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y,
    DEFAULT_SLOTS_PER_SHELF, MIN_ELEMENT_SIZE, SLOT_GAP,
};
use planokit_core::{clamp_into, IdGenerator, LayoutError, Point, Result, Size, TemplateError};
use tracing::{debug, info, warn};

use crate::element::{Element, ElementKind};
use crate::planogram::Planogram;

/// One physical shelf unit: an ordered collection of elements.
///
/// Element order is render order; later elements draw on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelf {
    pub id: String,
    pub elements: Vec<Element>,
}

impl Shelf {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            elements: Vec::new(),
        }
    }

    /// Ids of the slot elements on this shelf, in render order.
    pub fn slot_ids(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.is_slot())
            .map(|e| e.id.clone())
            .collect()
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }
}

/// Result of instantiating a shelf template.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantiatedShelf {
    pub shelf_id: String,
    /// Fresh ids of the slot elements, handed to the binding engine.
    pub slot_ids: Vec<String>,
}

/// Creates, moves, and resizes elements across all shelves of a session.
#[derive(Debug, Clone)]
pub struct ShelfBuilder {
    shelves: Vec<Shelf>,
    active: Option<String>,
    ids: IdGenerator,
    canvas: Size,
    min_size: f64,
    slots_per_shelf: usize,
}

impl ShelfBuilder {
    /// Creates a builder for a canvas of the given intrinsic size.
    pub fn new(canvas: Size) -> Self {
        Self {
            shelves: Vec::new(),
            active: None,
            ids: IdGenerator::new(),
            canvas,
            min_size: MIN_ELEMENT_SIZE,
            slots_per_shelf: DEFAULT_SLOTS_PER_SHELF,
        }
    }

    /// Overrides the minimum element size and the slot count of generated shelves.
    pub fn with_limits(mut self, min_size: f64, slots_per_shelf: usize) -> Self {
        self.min_size = if min_size.is_finite() && min_size > 0.0 {
            min_size
        } else {
            MIN_ELEMENT_SIZE
        };
        self.slots_per_shelf = slots_per_shelf;
        self
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    pub fn shelf(&self, id: &str) -> Option<&Shelf> {
        self.shelves.iter().find(|s| s.id == id)
    }

    pub fn active_shelf_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_shelf(&self) -> Option<&Shelf> {
        self.active.as_deref().and_then(|id| self.shelf(id))
    }

    /// Makes `id` the target of palette actions.
    pub fn set_active_shelf(&mut self, id: &str) -> Result<()> {
        if self.shelf(id).is_none() {
            return Err(LayoutError::UnknownShelf { id: id.to_string() }.into());
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Total number of elements across all shelves.
    pub fn element_count(&self) -> usize {
        self.shelves.iter().map(|s| s.elements.len()).sum()
    }

    /// Looks up an element on any shelf.
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.shelves.iter().find_map(|s| s.element(id))
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut Element> {
        self.shelves
            .iter_mut()
            .flat_map(|s| s.elements.iter_mut())
            .find(|e| e.id == id)
            .ok_or_else(|| LayoutError::UnknownElement { id: id.to_string() }.into())
    }

    /// Returns true if `id` names an existing slot element.
    pub fn is_slot(&self, id: &str) -> bool {
        self.element(id).is_some_and(Element::is_slot)
    }

    /// Ids of every slot on every shelf.
    pub fn slot_ids(&self) -> Vec<String> {
        self.shelves.iter().flat_map(Shelf::slot_ids).collect()
    }

    /// Topmost element under a canvas-space point.
    pub fn hit_test(&self, point: &Point) -> Option<&Element> {
        self.shelves
            .iter()
            .rev()
            .flat_map(|s| s.elements.iter().rev())
            .find(|e| e.contains_point(point))
    }

    /// Creates an empty shelf and makes it active.
    pub fn new_shelf(&mut self) -> String {
        let id = self.ids.next_id("shelf");
        self.shelves.push(Shelf::new(id.clone()));
        self.active = Some(id.clone());
        debug!("Created shelf {}", id);
        id
    }

    /// Creates a shelf pre-filled with a row of slots resting on a shelf-line.
    ///
    /// Rows stack downwards and wrap back to the top once the canvas height
    /// is used up.
    pub fn add_shelf(&mut self) -> String {
        let slot = ElementKind::Slot.default_size();
        let line = ElementKind::ShelfLine.default_size();
        let pitch = slot.height + 4.0 * SLOT_GAP;
        let usable = self.canvas.height - DEFAULT_ELEMENT_Y - slot.height - line.height;
        let rows = if usable.is_finite() && usable > 0.0 {
            (usable / pitch).floor() as usize + 1
        } else {
            1
        };
        let row = self.shelves.len() % rows;
        let base_y = DEFAULT_ELEMENT_Y + row as f64 * pitch;

        let shelf_id = self.new_shelf();
        for i in 0..self.slots_per_shelf {
            let x = DEFAULT_ELEMENT_X + i as f64 * (slot.width + SLOT_GAP);
            self.push_element(ElementKind::Slot, Point::new(x, base_y), slot);
        }

        let line_width = (self.slots_per_shelf as f64 * (slot.width + SLOT_GAP) - SLOT_GAP)
            .max(line.width);
        self.push_element(
            ElementKind::ShelfLine,
            Point::new(DEFAULT_ELEMENT_X, base_y + slot.height),
            Size::new(line_width, line.height),
        );

        info!(
            "Added shelf {} with {} slots in row {}",
            shelf_id, self.slots_per_shelf, row
        );
        shelf_id
    }

    /// Palette action: appends a new element at the default position.
    pub fn add_element(&mut self, kind: ElementKind) -> String {
        self.add_element_at(kind, Point::new(DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y))
    }

    /// Palette drop: appends a new element at a canvas-space point, clamped into the canvas.
    pub fn add_element_at(&mut self, kind: ElementKind, at: Point) -> String {
        self.push_element(kind, at, kind.default_size())
    }

    fn push_element(&mut self, kind: ElementKind, at: Point, size: Size) -> String {
        if self.active_shelf().is_none() {
            self.new_shelf();
        }

        let id = self.ids.next_id(kind.id_prefix());
        let (pos, size) = self.placement(at, size);
        let element = Element::new(id.clone(), kind)
            .at(pos.x, pos.y)
            .sized(size.width, size.height);

        let active = self.active.clone();
        if let Some(shelf) = self
            .shelves
            .iter_mut()
            .find(|s| Some(&s.id) == active.as_ref())
        {
            shelf.elements.push(element);
        }
        debug!("Added {} {} at {}", kind, id, pos);
        id
    }

    /// Floors a size at the minimum and caps it at the room right of and below `at`.
    fn bounded_size(&self, at: Point, width: f64, height: f64) -> Size {
        let floored = Size::new(width, height).at_least(self.min_size);
        Size::new(
            floored
                .width
                .min((self.canvas.width - at.x).max(self.min_size)),
            floored
                .height
                .min((self.canvas.height - at.y).max(self.min_size)),
        )
    }

    /// Position and size that keep an element requested at `at` wholly on the canvas.
    fn placement(&self, at: Point, size: Size) -> (Point, Size) {
        let size = self.bounded_size(Point::default(), size.width, size.height);
        let pos = Point::new(
            clamp_into(at.x, size.width, self.canvas.width),
            clamp_into(at.y, size.height, self.canvas.height),
        );
        (pos, size)
    }

    /// Position `id` would have at (x, y) after clamping, without changing anything.
    pub fn clamped_position(&self, id: &str, x: f64, y: f64) -> Result<Point> {
        let element = self
            .element(id)
            .ok_or_else(|| LayoutError::UnknownElement { id: id.to_string() })?;
        Ok(Point::new(
            clamp_into(x, element.width, self.canvas.width),
            clamp_into(y, element.height, self.canvas.height),
        ))
    }

    /// Moves an element by a canvas-space delta, clamped into the canvas.
    pub fn move_element(&mut self, id: &str, dx: f64, dy: f64) -> Result<Point> {
        let canvas = self.canvas;
        let element = self.element_mut(id)?;
        let target = Point::new(element.x + dx, element.y + dy);
        let x = clamp_into(target.x, element.width, canvas.width);
        let y = clamp_into(target.y, element.height, canvas.height);
        if x != target.x || y != target.y {
            debug!("Clamped {} from {} to ({:.1}, {:.1})", id, target, x, y);
        }
        element.x = x;
        element.y = y;
        Ok(Point::new(x, y))
    }

    /// Size `id` would have if resized to (width, height), without changing anything.
    pub fn clamped_size(&self, id: &str, width: f64, height: f64) -> Result<Size> {
        let element = self
            .element(id)
            .ok_or_else(|| LayoutError::UnknownElement { id: id.to_string() })?;
        Ok(self.bounded_size(element.position(), width, height))
    }

    /// Sets an element's size, top-left anchored.
    ///
    /// Each side is raised to the minimum and capped so the element stays
    /// inside the canvas.
    pub fn resize_element(&mut self, id: &str, width: f64, height: f64) -> Result<Size> {
        let size = self.clamped_size(id, width, height)?;
        if size.width != width || size.height != height {
            debug!(
                "Resize of {} adjusted to {}x{}",
                id, size.width, size.height
            );
        }
        let element = self.element_mut(id)?;
        element.width = size.width;
        element.height = size.height;
        Ok(size)
    }

    /// Instantiates a shelf from template elements under freshly generated ids.
    ///
    /// Ids are scoped to the new shelf (`<shelf-id>/<kind>-<n>`), so the same
    /// template can be instantiated any number of times.
    pub fn instantiate_shelf_from_template(
        &mut self,
        name: &str,
        template: &[Element],
    ) -> Result<InstantiatedShelf> {
        if !template.iter().any(Element::is_slot) {
            warn!("Rejected shelf template '{}': no slot elements", name);
            return Err(TemplateError::InvalidTemplate {
                name: name.to_string(),
                reason: if template.is_empty() {
                    "template is empty".to_string()
                } else {
                    "template has no slot elements".to_string()
                },
            }
            .into());
        }

        let shelf_id = self.ids.next_id("shelf");
        let mut shelf = Shelf::new(shelf_id.clone());
        for source in template {
            let id = format!(
                "{}/{}",
                shelf_id,
                self.ids.next_id(source.kind.id_prefix())
            );
            let (pos, size) = self.placement(source.position(), source.size());
            shelf.elements.push(Element {
                id,
                kind: source.kind,
                x: pos.x,
                y: pos.y,
                width: size.width,
                height: size.height,
                product_id: None,
            });
        }

        let slot_ids = shelf.slot_ids();
        self.shelves.push(shelf);
        self.active = Some(shelf_id.clone());
        info!(
            "Instantiated template '{}' as {} ({} slots)",
            name,
            shelf_id,
            slot_ids.len()
        );
        Ok(InstantiatedShelf { shelf_id, slot_ids })
    }

    /// Removes every element from one shelf. Returns how many were removed.
    pub fn clear_shelf(&mut self, id: &str) -> Result<usize> {
        let shelf = self
            .shelves
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| LayoutError::UnknownShelf { id: id.to_string() })?;
        let removed = shelf.elements.len();
        shelf.elements.clear();
        debug!("Cleared {} elements from {}", removed, id);
        Ok(removed)
    }

    /// Removes all shelves.
    pub fn clear_canvas(&mut self) {
        self.shelves.clear();
        self.active = None;
        debug!("Cleared canvas");
    }

    /// Detached copy of the active shelf's elements, for saving as a template.
    pub fn active_elements(&self) -> Vec<Element> {
        self.active_shelf()
            .map(|s| s.elements.iter().map(detach).collect())
            .unwrap_or_default()
    }

    /// Wholesale replacement with a single shelf holding `elements`.
    ///
    /// Ids are kept, except duplicates, which are renamed. Geometry is
    /// brought onto this builder's canvas the same way a palette drop is.
    pub fn replace_all(&mut self, elements: Vec<Element>) -> String {
        for element in &elements {
            self.ids.observe(&element.id);
        }

        let mut seen = HashSet::new();
        let mut restored = Vec::with_capacity(elements.len());
        for mut element in elements {
            if !seen.insert(element.id.clone()) {
                let fresh = self.ids.next_id(element.kind.id_prefix());
                warn!("Duplicate element id {} renamed to {}", element.id, fresh);
                element.id = fresh.clone();
                seen.insert(fresh);
            }
            let (pos, size) = self.placement(element.position(), element.size());
            if pos != element.position() || size != element.size() {
                warn!(
                    "Loaded element {} adjusted to {} {}x{}",
                    element.id, pos, size.width, size.height
                );
            }
            element.x = pos.x;
            element.y = pos.y;
            element.width = size.width;
            element.height = size.height;
            restored.push(element);
        }

        self.shelves.clear();
        let shelf_id = self.new_shelf();
        if let Some(shelf) = self.shelves.last_mut() {
            shelf.elements = restored;
        }
        shelf_id
    }

    /// Mirrors planogram assignments onto slot elements for rendering.
    pub fn stamp_assignments(&mut self, planogram: &Planogram) {
        for element in self
            .shelves
            .iter_mut()
            .flat_map(|s| s.elements.iter_mut())
            .filter(|e| e.is_slot())
        {
            element.product_id = planogram.get(&element.id).map(str::to_string);
        }
    }
}

impl Default for ShelfBuilder {
    fn default() -> Self {
        Self::new(Size::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT))
    }
}

fn detach(element: &Element) -> Element {
    Element {
        product_id: None,
        ..element.clone()
    }
}
