use chrono::{TimeZone, Utc};
use devshelf::category::builtin_categories;
use devshelf::storage::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, CUSTOM_CATEGORIES_KEY,
};
use devshelf::validation::{CategoryDraft, ResourceDraft, SubCategoryDraft};
use devshelf::views::ViewSelection;
use devshelf::{Shelf, ShelfError};
use serde_json::Value;
use std::sync::Arc;

fn draft(category: &str, sub: &str, url: &str, title: &str) -> ResourceDraft {
    ResourceDraft {
        category_id: Some(category.to_string()),
        sub_category_id: Some(sub.to_string()),
        url: url.to_string(),
        title: title.to_string(),
    }
}

fn populated_shelf() -> Shelf {
    let mut shelf = Shelf::open(Arc::new(MemoryKeyValueStore::new()));
    shelf
        .add_category(&CategoryDraft {
            id: Some("design".to_string()),
            name: "Design".to_string(),
            icon: Some("fa-palette".to_string()),
            sub_categories: vec![SubCategoryDraft {
                name: "Color Tools".to_string(),
                icon: None,
            }],
            use_defaults: true,
        })
        .unwrap();
    shelf
        .add_resource(&draft("frontend", "tools", "https://vitejs.dev", "Vite"))
        .unwrap();
    shelf
        .add_resource(&draft("design", "color-tools", "https://coolors.co", "Coolors"))
        .unwrap();
    shelf
}

#[test]
fn export_carries_every_category_and_resource() {
    let shelf = populated_shelf();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let json: Value = serde_json::from_str(&shelf.export(at).to_json().unwrap()).unwrap();

    assert_eq!(json["version"], "0.1.0");
    assert_eq!(json["exportDate"], "2024-05-01T08:00:00.000Z");
    assert_eq!(
        json["devTypes"].as_array().unwrap().len(),
        builtin_categories().len() + 1
    );
    assert_eq!(json["resourceData"]["frontend"]["tools"][0]["title"], "Vite");
    assert_eq!(json["resourceData"]["design"]["color-tools"][0]["type"], "color-tools");
}

#[test]
fn round_trip_into_empty_file_backed_shelf() {
    let source = populated_shelf();
    let exported = source.export(Utc::now()).to_json().unwrap();

    let temp = tempfile::tempdir().unwrap();
    let backend = Arc::new(FileKeyValueStore::new(temp.path()));
    let mut target = Shelf::open(backend.clone());
    let report = target.import_str(&exported).unwrap();

    assert_eq!(report.added_custom, vec!["design".to_string()]);
    assert_eq!(report.skipped_custom.len(), builtin_categories().len());
    assert_eq!(target.resources().document(), source.resources().document());

    // Imported categories land under the key the registry loads from.
    assert!(backend.get(CUSTOM_CATEGORIES_KEY).unwrap().is_some());
    let reopened = Shelf::open(backend);
    assert!(reopened.registry().contains("design"));
    assert_eq!(reopened.resources().document().len(), 2);
}

#[test]
fn import_overwrites_whole_category_but_keeps_others() {
    let mut shelf = populated_shelf();
    shelf
        .add_resource(&draft("backend", "docs", "https://docs.rs", "docs.rs"))
        .unwrap();

    let content = r#"{
        "resourceData": {
            "frontend": {"docs": [{"url": "https://developer.mozilla.org", "title": "MDN",
                "addedAt": "2024-01-01T00:00:00.000Z", "type": "docs"}]}
        },
        "devTypes": [],
        "version": "0.1.0"
    }"#;
    let report = shelf.import_str(content).unwrap();
    assert_eq!(report.merged_categories, vec!["frontend".to_string()]);

    let document = shelf.resources().document();
    assert!(document.entries("frontend", "tools").is_none());
    assert_eq!(document.entries("frontend", "docs").unwrap()[0].title, "MDN");
    assert_eq!(document.entries("backend", "docs").unwrap().len(), 1);
    assert_eq!(document.entries("design", "color-tools").unwrap().len(), 1);
}

#[test]
fn legacy_entries_without_ids_get_one() {
    let mut shelf = Shelf::open(Arc::new(MemoryKeyValueStore::new()));
    let content = r#"{
        "resourceData": {
            "backend": {"apis": [
                {"url": "https://a.dev", "title": "A", "addedAt": "2024-01-01T00:00:00.000Z", "type": "apis"},
                {"url": "https://b.dev", "title": "B", "addedAt": "2024-01-01T00:00:00.000Z", "type": "apis"}
            ]}
        },
        "devTypes": []
    }"#;
    shelf.import_str(content).unwrap();

    let entries = shelf.resources().document().entries("backend", "apis").unwrap();
    assert!(!entries[0].id.is_empty());
    assert_ne!(entries[0].id, entries[1].id);
    let second = entries[1].id.clone();
    assert!(shelf.delete_resource_by_id(&second).unwrap());
}

#[test]
fn repeated_ids_in_a_file_still_list_and_delete_by_row() {
    let mut shelf = Shelf::open(Arc::new(MemoryKeyValueStore::new()));
    let content = r#"{
        "resourceData": {
            "backend": {"tools": [
                {"id": "dup", "url": "https://a.dev", "title": "A", "addedAt": "2024-01-01T00:00:00.000Z", "type": "tools"}
            ]},
            "frontend": {"tools": [
                {"id": "x", "url": "https://x.dev", "title": "X", "addedAt": "2024-01-01T00:00:00.000Z", "type": "tools"},
                {"id": "dup", "url": "https://b.dev", "title": "B", "addedAt": "2024-01-01T00:00:00.000Z", "type": "tools"}
            ]}
        },
        "devTypes": []
    }"#;
    shelf.import_str(content).unwrap();

    let rows = shelf.view(&ViewSelection {
        category: Some("frontend".to_string()),
        ..ViewSelection::default()
    });
    let row = rows.iter().find(|r| r.entry.title == "B").unwrap();
    assert_eq!((row.sub_category_id.as_str(), row.index), ("tools", 1));
    assert_ne!(row.entry.id, "dup");

    assert!(shelf
        .delete_resource(&row.category_id, &row.sub_category_id, row.index)
        .unwrap());
    let document = shelf.resources().document();
    let titles: Vec<_> = document
        .entries("frontend", "tools")
        .unwrap()
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["X"]);
    assert_eq!(document.entries("backend", "tools").unwrap().len(), 1);
}

#[test]
fn newer_version_imports_with_warning() {
    let mut shelf = Shelf::open(Arc::new(MemoryKeyValueStore::new()));
    let report = shelf
        .import_str(r#"{"resourceData": {}, "devTypes": [], "version": "9.9.9"}"#)
        .unwrap();
    assert!(report.version_warning.unwrap().contains("9.9.9"));
}

#[test]
fn structurally_invalid_files_are_rejected_whole() {
    let mut shelf = populated_shelf();
    let before = shelf.resources().document().clone();
    for content in [
        r#"{"devTypes": []}"#,
        r#"{"resourceData": {"frontend": {"tools": "nope"}}, "devTypes": []}"#,
        r#"{"resourceData": {}, "devTypes": {"id": "x"}}"#,
    ] {
        let err = shelf.import_str(content).unwrap_err();
        assert!(matches!(err, ShelfError::ImportFormat(_)));
    }
    assert_eq!(shelf.resources().document(), &before);
    assert_eq!(shelf.registry().custom().len(), 1);
}
