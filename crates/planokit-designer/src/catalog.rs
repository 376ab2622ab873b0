//! Read-only product catalog supplied by the host.

use planokit_core::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A product that can be placed in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Image URL or path, passed through to the view layer untouched.
    pub image: String,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
        }
    }

    /// Case-insensitive substring match on the product name.
    pub fn matches_search(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Ordered product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parses a JSON array of `{id, name, image}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a catalog from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose name contains `query`, in catalog order. A blank query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Product> {
        let query = query.trim();
        if query.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.matches_search(query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snacks() -> Catalog {
        Catalog::from_json(
            r#"[
                {"id": "lays-classic", "name": "Lays Classic", "image": "/images/lays.jpg"},
                {"id": "doritos-cool-ranch", "name": "Doritos", "image": "/images/doritos.webp"},
                {"id": "mms", "name": "M&Ms", "image": "/images/mms.webp"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let catalog = snacks();
        let hits: Vec<_> = catalog.filter("LAYS").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(hits, vec!["lays-classic"]);

        let hits = catalog.filter("s");
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_blank_filter_shows_all() {
        let catalog = snacks();
        assert_eq!(catalog.filter("").len(), 3);
        assert_eq!(catalog.filter("   ").len(), 3);
        assert!(catalog.filter("pretzel").is_empty());
    }

    #[test]
    fn test_lookup() {
        let catalog = snacks();
        assert_eq!(catalog.get("mms").map(|p| p.name.as_str()), Some("M&Ms"));
        assert!(!catalog.contains("pringles"));
    }
}
