//! Template persistence through the JSON file repository.

use planokit_designer::{
    Catalog, ElementKind, JsonFileTemplateRepository, PlanogramSession, Product, SaveOutcome,
    SessionOptions, TemplateKind, TemplateRepository,
};
use tempfile::TempDir;

fn session_at(path: &std::path::Path) -> PlanogramSession<JsonFileTemplateRepository> {
    let repository = JsonFileTemplateRepository::open(path).unwrap();
    PlanogramSession::new(
        SessionOptions::default(),
        Catalog::new(vec![Product::new(
            "lays-classic",
            "Lays Classic",
            "/images/products/lays.jpg",
        )]),
        repository,
    )
}

#[test]
fn test_templates_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store").join("templates.json");

    let (slot, saved) = {
        let mut session = session_at(&path);
        let slot = session.add_element(ElementKind::Slot).unwrap();
        session.move_element(&slot, 100.0, 40.0).unwrap();
        session.assign(&slot, "lays-classic").unwrap();
        session.save_shelf_template("endcap-v1").unwrap();
        session.save_planogram_template("spring").unwrap();
        let saved = session.builder().active_shelf().unwrap().elements.clone();
        (slot, saved)
    };
    assert!(path.exists());

    let mut session = session_at(&path);
    assert_eq!(
        session.list_template_names(TemplateKind::Shelf).unwrap(),
        vec!["endcap-v1"]
    );
    session.load_planogram_template("spring").unwrap();
    session.load_shelf_template("endcap-v1").unwrap();
    assert_eq!(session.builder().active_shelf().unwrap().elements, saved);
    assert_eq!(
        session.product_for(&slot).map(|p| p.name.as_str()),
        Some("Lays Classic")
    );

    let fresh = session.add_element(ElementKind::Slot).unwrap();
    assert_ne!(fresh, slot);
}

#[test]
fn test_document_layout_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("templates.json");

    let mut session = session_at(&path);
    let slot = session.add_element(ElementKind::Slot).unwrap();
    session.assign(&slot, "lays-classic").unwrap();
    session.save_shelf_template("bay").unwrap();
    session.save_planogram_template("bay").unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let shelf = &raw["shelfTemplates"]["bay"][0];
    assert_eq!(shelf["type"], "slot");
    assert_eq!(shelf["id"], slot.as_str());
    assert!(shelf.get("productId").is_none());
    assert_eq!(raw["planogramTemplates"]["bay"][slot.as_str()], "lays-classic");
}

#[test]
fn test_overwrite_keeps_single_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("templates.json");

    let mut session = session_at(&path);
    session.add_element(ElementKind::Slot).unwrap();
    assert_eq!(
        session.save_shelf_template("bay").unwrap(),
        SaveOutcome::Created
    );
    session.add_element(ElementKind::DividerLine).unwrap();
    assert_eq!(
        session.save_shelf_template("bay").unwrap(),
        SaveOutcome::Overwritten
    );

    let repository = JsonFileTemplateRepository::open(&path).unwrap();
    assert_eq!(repository.list(TemplateKind::Shelf).unwrap(), vec!["bay"]);
    let payload = repository.get(TemplateKind::Shelf, "bay").unwrap().unwrap();
    assert_eq!(payload.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_corrupt_payload_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("templates.json");
    std::fs::write(
        &path,
        r#"{"shelfTemplates": {"broken": {"not": "a list"}}, "planogramTemplates": {}}"#,
    )
    .unwrap();

    let mut session = session_at(&path);
    session.add_shelf().unwrap();
    let before = session.builder().shelves().to_vec();

    let err = session.load_shelf_template("broken").unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(session.builder().shelves(), before.as_slice());
}

#[test]
fn test_unreadable_document_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("templates.json");
    std::fs::write(&path, "{ this is not json").unwrap();
    assert!(JsonFileTemplateRepository::open(&path).is_err());
}

#[test]
fn test_empty_file_opens_as_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("templates.json");
    std::fs::write(&path, "").unwrap();

    let repository = JsonFileTemplateRepository::open(&path).unwrap();
    assert!(repository.list(TemplateKind::Shelf).unwrap().is_empty());
    assert!(repository.list(TemplateKind::Planogram).unwrap().is_empty());
}
