//! Planogram: the slot → product mapping.
//!
//! The mapping is deliberately independent of shelf geometry. Entries whose
//! slot has disappeared stay in place and simply never match a slot again.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shelf::ShelfBuilder;

/// Slot id → product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Planogram {
    entries: BTreeMap<String, String>,
}

impl Planogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `product_id` to `slot_id`, replacing any earlier binding.
    ///
    /// Returns the previously bound product, if any.
    pub fn assign(&mut self, slot_id: &str, product_id: &str) -> Option<String> {
        self.entries
            .insert(slot_id.to_string(), product_id.to_string())
    }

    /// Product id bound to a slot, if any.
    pub fn get(&self, slot_id: &str) -> Option<&str> {
        self.entries.get(slot_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Slot ids with an entry but no matching slot element. Reporting only.
    pub fn stale_slots(&self, builder: &ShelfBuilder) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|slot| !builder.is_slot(slot))
            .map(String::as_str)
            .collect()
    }
}

impl FromIterator<(String, String)> for Planogram {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
