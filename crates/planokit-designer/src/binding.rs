//! Slot-product binding engine.
//!
//! Two input paths end in [`Planogram::assign`]:
//! - drag-drop: a product dragged out of the gallery and released over a slot
//! - click: a slot is selected, a chooser opens, and the user picks a product
//!
//! Both paths share the catalog filter, which only narrows what is shown and
//! never touches planogram state.

use planokit_core::constants::PRODUCT_GALLERY_ZONE;
use tracing::debug;

use crate::catalog::{Catalog, Product};
use crate::planogram::Planogram;
use crate::shelf::ShelfBuilder;

/// A completed drag as reported by the host's drag-drop layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// Id of the dragged item (a product id for gallery drags).
    pub draggable_id: String,
    /// Zone the drag started in.
    pub source_zone_id: String,
    /// Zone the drag ended over, `None` when released outside any zone.
    pub destination_zone_id: Option<String>,
}

impl DropEvent {
    /// A drag from the product gallery.
    pub fn from_gallery(product_id: impl Into<String>, destination: Option<&str>) -> Self {
        Self {
            draggable_id: product_id.into(),
            source_zone_id: PRODUCT_GALLERY_ZONE.to_string(),
            destination_zone_id: destination.map(str::to_string),
        }
    }
}

/// What a drop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The product was bound to the slot.
    Assigned { slot_id: String, product_id: String },
    /// No destination, or the destination is not a slot.
    Ignored,
}

/// Open product chooser for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChooser {
    pub slot_id: String,
    pub filter: String,
}

/// Owns the planogram and the transient chooser/filter state around it.
#[derive(Debug, Clone, Default)]
pub struct BindingEngine {
    planogram: Planogram,
    chooser: Option<ProductChooser>,
    gallery_filter: String,
}

impl BindingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn planogram(&self) -> &Planogram {
        &self.planogram
    }

    /// Wholesale replacement, used when a planogram template is loaded.
    pub fn replace_planogram(&mut self, planogram: Planogram) {
        self.planogram = planogram;
        self.chooser = None;
    }

    /// Unconditional last-write-wins assignment.
    pub fn assign(&mut self, slot_id: &str, product_id: &str) {
        if let Some(previous) = self.planogram.assign(slot_id, product_id) {
            debug!("Slot {} rebound from {} to {}", slot_id, previous, product_id);
        } else {
            debug!("Slot {} bound to {}", slot_id, product_id);
        }
    }

    /// Product bound to `slot_id`, or `None` when the slot is empty, no longer
    /// exists, or is bound to a product the catalog does not list.
    pub fn product_for<'a>(
        &self,
        slot_id: &str,
        builder: &ShelfBuilder,
        catalog: &'a Catalog,
    ) -> Option<&'a Product> {
        if !builder.is_slot(slot_id) {
            return None;
        }
        self.planogram
            .get(slot_id)
            .and_then(|product_id| catalog.get(product_id))
    }

    /// Applies a completed drag. Only slot-typed destinations assign.
    pub fn handle_drop(&mut self, event: &DropEvent, builder: &ShelfBuilder) -> DropOutcome {
        let Some(destination) = event.destination_zone_id.as_deref() else {
            return DropOutcome::Ignored;
        };
        if destination == PRODUCT_GALLERY_ZONE || !builder.is_slot(destination) {
            debug!(
                "Ignored drop of {} onto non-slot zone {}",
                event.draggable_id, destination
            );
            return DropOutcome::Ignored;
        }

        self.assign(destination, &event.draggable_id);
        DropOutcome::Assigned {
            slot_id: destination.to_string(),
            product_id: event.draggable_id.clone(),
        }
    }

    /// Opens the chooser for a slot. Returns false if `slot_id` is not a slot.
    pub fn open_chooser(&mut self, slot_id: &str, builder: &ShelfBuilder) -> bool {
        if !builder.is_slot(slot_id) {
            return false;
        }
        self.chooser = Some(ProductChooser {
            slot_id: slot_id.to_string(),
            filter: String::new(),
        });
        true
    }

    pub fn chooser(&self) -> Option<&ProductChooser> {
        self.chooser.as_ref()
    }

    /// Updates the chooser's filter text.
    pub fn set_chooser_filter(&mut self, filter: &str) {
        if let Some(chooser) = self.chooser.as_mut() {
            chooser.filter = filter.to_string();
        }
    }

    /// Products the open chooser should list; empty when no chooser is open.
    pub fn chooser_products<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        self.chooser
            .as_ref()
            .map(|c| catalog.filter(&c.filter))
            .unwrap_or_default()
    }

    /// Assigns the chosen product to the chooser's slot and closes it.
    ///
    /// Returns the slot id, or `None` if no chooser was open.
    pub fn choose(&mut self, product_id: &str) -> Option<String> {
        let chooser = self.chooser.take()?;
        self.assign(&chooser.slot_id, product_id);
        Some(chooser.slot_id)
    }

    /// Closes the chooser without assigning.
    pub fn close_chooser(&mut self) {
        self.chooser = None;
    }

    pub fn gallery_filter(&self) -> &str {
        &self.gallery_filter
    }

    pub fn set_gallery_filter(&mut self, filter: &str) {
        self.gallery_filter = filter.to_string();
    }

    /// Products shown in the drag-source gallery under the current filter.
    pub fn gallery_products<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog.filter(&self.gallery_filter)
    }
}
