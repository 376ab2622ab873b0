//! # Template Persistence Module
//!
//! Named snapshots of shelf geometry and of planogram mappings.
//!
//! Features:
//! - Two independent namespaces (`shelfTemplates`, `planogramTemplates`)
//! - Silent overwrite on name collision
//! - Pluggable storage through [`TemplateRepository`]
//! - In-memory repository for tests and ephemeral sessions
//! - JSON file repository for durable storage

use planokit_core::{Error, Result, TemplateError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::element::Element;
use crate::planogram::Planogram;

/// Template namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Element arrays (geometry only)
    Shelf,
    /// Slot → product mappings
    Planogram,
}

impl TemplateKind {
    /// Store namespace key
    pub fn namespace(&self) -> &'static str {
        match self {
            TemplateKind::Shelf => "shelfTemplates",
            TemplateKind::Planogram => "planogramTemplates",
        }
    }

    /// Get kind as string
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Shelf => "shelf",
            TemplateKind::Planogram => "planogram",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value storage for template payloads.
///
/// Implementations must make `set` all-or-nothing: either the payload is
/// stored and durable, or an error is returned and nothing changed.
pub trait TemplateRepository {
    /// Payload stored under `name`, if any.
    fn get(&self, kind: TemplateKind, name: &str) -> Result<Option<Value>>;

    /// Stores `payload` under `name`, replacing any previous payload.
    fn set(&mut self, kind: TemplateKind, name: &str, payload: Value) -> Result<()>;

    /// All names stored in the namespace.
    fn list(&self, kind: TemplateKind) -> Result<Vec<String>>;
}

/// Repository backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateRepository {
    entries: HashMap<(TemplateKind, String), Value>,
}

impl MemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateRepository for MemoryTemplateRepository {
    fn get(&self, kind: TemplateKind, name: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(&(kind, name.to_string())).cloned())
    }

    fn set(&mut self, kind: TemplateKind, name: &str, payload: Value) -> Result<()> {
        self.entries.insert((kind, name.to_string()), payload);
        Ok(())
    }

    fn list(&self, kind: TemplateKind) -> Result<Vec<String>> {
        Ok(self
            .entries
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, name)| name.clone())
            .collect())
    }
}

/// On-disk layout of [`JsonFileTemplateRepository`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TemplateDocument {
    #[serde(rename = "shelfTemplates", default)]
    shelf: BTreeMap<String, Value>,
    #[serde(rename = "planogramTemplates", default)]
    planogram: BTreeMap<String, Value>,
}

impl TemplateDocument {
    fn namespace(&self, kind: TemplateKind) -> &BTreeMap<String, Value> {
        match kind {
            TemplateKind::Shelf => &self.shelf,
            TemplateKind::Planogram => &self.planogram,
        }
    }

    fn namespace_mut(&mut self, kind: TemplateKind) -> &mut BTreeMap<String, Value> {
        match kind {
            TemplateKind::Shelf => &mut self.shelf,
            TemplateKind::Planogram => &mut self.planogram,
        }
    }
}

/// Repository persisted as a single JSON document.
///
/// The whole document is rewritten on every `set`, through a sibling temp
/// file and a rename so a failed write never truncates existing templates.
#[derive(Debug, Clone)]
pub struct JsonFileTemplateRepository {
    path: PathBuf,
    document: TemplateDocument,
}

impl JsonFileTemplateRepository {
    /// Opens the repository at `path`; a missing file is an empty repository.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                TemplateDocument::default()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            TemplateDocument::default()
        };
        info!(
            "Opened template store {} ({} shelf, {} planogram)",
            path.display(),
            document.shelf.len(),
            document.planogram.len()
        );
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, document: &TemplateDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TemplateRepository for JsonFileTemplateRepository {
    fn get(&self, kind: TemplateKind, name: &str) -> Result<Option<Value>> {
        Ok(self.document.namespace(kind).get(name).cloned())
    }

    fn set(&mut self, kind: TemplateKind, name: &str, payload: Value) -> Result<()> {
        let mut next = self.document.clone();
        next.namespace_mut(kind).insert(name.to_string(), payload);
        self.write(&next)?;
        self.document = next;
        Ok(())
    }

    fn list(&self, kind: TemplateKind) -> Result<Vec<String>> {
        Ok(self.document.namespace(kind).keys().cloned().collect())
    }
}

/// What a save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new template was stored.
    Created,
    /// An existing template with the same name was replaced.
    Overwritten,
    /// The name was empty; nothing was written.
    Aborted,
}

/// Typed save/load on top of a [`TemplateRepository`].
#[derive(Debug, Clone)]
pub struct TemplateStore<R: TemplateRepository> {
    repository: R,
}

impl<R: TemplateRepository> TemplateStore<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Saves detached copies of `elements` under `name`.
    pub fn save_shelf_template(&mut self, name: &str, elements: &[Element]) -> Result<SaveOutcome> {
        let detached: Vec<Element> = elements
            .iter()
            .map(|e| Element {
                product_id: None,
                ..e.clone()
            })
            .collect();
        self.save(TemplateKind::Shelf, name, serde_json::to_value(detached)?)
    }

    /// Saves the full slot → product mapping under `name`.
    pub fn save_planogram_template(
        &mut self,
        name: &str,
        planogram: &Planogram,
    ) -> Result<SaveOutcome> {
        self.save(TemplateKind::Planogram, name, serde_json::to_value(planogram)?)
    }

    pub fn load_shelf_template(&self, name: &str) -> Result<Vec<Element>> {
        self.load(TemplateKind::Shelf, name)
    }

    pub fn load_planogram_template(&self, name: &str) -> Result<Planogram> {
        self.load(TemplateKind::Planogram, name)
    }

    /// Names stored in a namespace, sorted.
    pub fn list_template_names(&self, kind: TemplateKind) -> Result<Vec<String>> {
        let mut names = self.repository.list(kind)?;
        names.sort();
        Ok(names)
    }

    /// Returns true if a template named `name` exists in `kind`.
    pub fn exists(&self, kind: TemplateKind, name: &str) -> Result<bool> {
        Ok(self.repository.get(kind, name.trim())?.is_some())
    }

    fn save(&mut self, kind: TemplateKind, name: &str, payload: Value) -> Result<SaveOutcome> {
        let name = name.trim();
        if name.is_empty() {
            warn!("Aborted {} template save: empty name", kind);
            return Ok(SaveOutcome::Aborted);
        }

        let existed = self.repository.get(kind, name)?.is_some();
        self.repository.set(kind, name, payload)?;

        let outcome = if existed {
            SaveOutcome::Overwritten
        } else {
            SaveOutcome::Created
        };
        info!("Saved {} template '{}' ({:?})", kind, name, outcome);
        Ok(outcome)
    }

    fn load<T: serde::de::DeserializeOwned>(&self, kind: TemplateKind, name: &str) -> Result<T> {
        let name = name.trim();
        let payload = self
            .repository
            .get(kind, name)?
            .ok_or_else(|| TemplateError::NotFound {
                kind: kind.to_string(),
                name: name.to_string(),
            })?;

        let value = serde_json::from_value(payload).map_err(|e| {
            warn!("Stored {} template '{}' failed to decode: {}", kind, name, e);
            Error::from(TemplateError::Corrupt {
                kind: kind.to_string(),
                name: name.to_string(),
                reason: e.to_string(),
            })
        })?;
        info!("Loaded {} template '{}'", kind, name);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_shelf_round_trip() {
        let mut store = TemplateStore::new(MemoryTemplateRepository::new());
        let elements = vec![
            Element::new("slot-1", ElementKind::Slot).at(120.0, 80.0),
            Element::new("line-2", ElementKind::ShelfLine).at(20.0, 240.0),
        ];
        assert_eq!(
            store.save_shelf_template("endcap-v1", &elements).unwrap(),
            SaveOutcome::Created
        );
        assert_eq!(store.load_shelf_template("endcap-v1").unwrap(), elements);
    }

    #[test]
    fn test_overwrite_on_same_name() {
        let mut store = TemplateStore::new(MemoryTemplateRepository::new());
        let mut planogram = Planogram::new();
        planogram.assign("slot-1", "mms");
        store.save_planogram_template("weekly", &planogram).unwrap();

        planogram.assign("slot-1", "lays-classic");
        assert_eq!(
            store.save_planogram_template("weekly", &planogram).unwrap(),
            SaveOutcome::Overwritten
        );
        let loaded = store.load_planogram_template("weekly").unwrap();
        assert_eq!(loaded.get("slot-1"), Some("lays-classic"));
        assert_eq!(
            store.list_template_names(TemplateKind::Planogram).unwrap(),
            vec!["weekly"]
        );
    }

    #[test]
    fn test_blank_name_aborts() {
        let mut store = TemplateStore::new(MemoryTemplateRepository::new());
        let outcome = store
            .save_shelf_template("   ", &[Element::new("s", ElementKind::Slot)])
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Aborted);
        assert!(store
            .list_template_names(TemplateKind::Shelf)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_template_not_found() {
        let store = TemplateStore::new(MemoryTemplateRepository::new());
        assert!(store.load_shelf_template("nonexistent").unwrap_err().is_not_found());
        assert!(store
            .load_planogram_template("nonexistent")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_namespaces_are_independent() {
        let mut store = TemplateStore::new(MemoryTemplateRepository::new());
        store
            .save_shelf_template("same", &[Element::new("s", ElementKind::Slot)])
            .unwrap();
        assert!(store.load_planogram_template("same").unwrap_err().is_not_found());
        assert!(store.exists(TemplateKind::Shelf, "same").unwrap());
        assert!(!store.exists(TemplateKind::Planogram, "same").unwrap());
    }

    #[test]
    fn test_corrupt_payload() {
        let mut repo = MemoryTemplateRepository::new();
        repo.set(TemplateKind::Shelf, "bad", serde_json::json!({"not": "a list"}))
            .unwrap();
        let store = TemplateStore::new(repo);
        let err = store.load_shelf_template("bad").unwrap_err();
        assert!(matches!(
            err,
            Error::Template(TemplateError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_saved_shelf_is_detached() {
        let mut store = TemplateStore::new(MemoryTemplateRepository::new());
        let mut slot = Element::new("slot-1", ElementKind::Slot);
        slot.product_id = Some("mms".to_string());
        store.save_shelf_template("a", &[slot]).unwrap();
        assert!(store.load_shelf_template("a").unwrap()[0].product_id.is_none());
    }
}
