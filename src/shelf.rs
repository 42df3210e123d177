//! Shelf: the application service over one key-value store.
//!
//! Owns the category registry and the resource store, runs form validation
//! before any mutation, and implements the workflows that touch both
//! (deleting a category together with its resources, importing a backup).

use crate::category::{Category, CategoryRegistry};
use crate::error::ShelfError;
use crate::resource::{EntryKey, EntryPatch, ResourceEntry, ResourceStore};
use crate::storage::KeyValueStore;
use crate::transfer::{parse_import, ExportDocument, ImportReport};
use crate::validation::{build_category, validate_patch, validate_resource, CategoryDraft, ResourceDraft};
use crate::views::{visible_resources, ResourceView, ViewSelection};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct Shelf {
    registry: CategoryRegistry,
    resources: ResourceStore,
}

impl Shelf {
    /// Load the custom categories and the resource document from `store`.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            registry: CategoryRegistry::open(store.clone()),
            resources: ResourceStore::open(store),
        }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn categories(&self) -> Vec<Category> {
        self.registry.get_all()
    }

    /// Validate and file a new resource, stamped with the current time.
    pub fn add_resource(&mut self, draft: &ResourceDraft) -> Result<ResourceEntry, ShelfError> {
        self.add_resource_at(draft, Utc::now())
    }

    pub fn add_resource_at(
        &mut self,
        draft: &ResourceDraft,
        now: DateTime<Utc>,
    ) -> Result<ResourceEntry, ShelfError> {
        let valid = validate_resource(draft, &self.registry)?;
        let entry = ResourceEntry::new(valid.url, valid.title, &valid.sub_category_id, now);
        self.resources
            .add(&valid.category_id, &valid.sub_category_id, entry.clone())?;
        Ok(entry)
    }

    pub fn delete_resource(
        &mut self,
        category_id: &str,
        sub_category_id: &str,
        index: usize,
    ) -> Result<bool, ShelfError> {
        self.resources.delete(category_id, sub_category_id, index)
    }

    pub fn delete_resource_by_id(&mut self, entry_id: &str) -> Result<bool, ShelfError> {
        self.resources.delete_by_id(entry_id)
    }

    pub fn edit_resource(
        &mut self,
        category_id: &str,
        sub_category_id: &str,
        key: &EntryKey,
        patch: &EntryPatch,
    ) -> Result<bool, ShelfError> {
        let patch = validate_patch(patch)?;
        self.resources.edit(category_id, sub_category_id, key, &patch)
    }

    pub fn edit_resource_by_id(
        &mut self,
        entry_id: &str,
        patch: &EntryPatch,
    ) -> Result<bool, ShelfError> {
        let patch = validate_patch(patch)?;
        self.resources.edit_by_id(entry_id, &patch)
    }

    /// Validate and register a custom category.
    pub fn add_category(&mut self, draft: &CategoryDraft) -> Result<Category, ShelfError> {
        let category = build_category(draft, || self.registry.generate_id())?;
        self.registry.add_custom(category.clone())?;
        Ok(category)
    }

    /// Delete a custom category and every resource filed under it.
    ///
    /// Built-ins are rejected. Returns whether the category existed.
    pub fn delete_category(&mut self, category_id: &str) -> Result<bool, ShelfError> {
        if self.registry.is_builtin(category_id) {
            return Err(ShelfError::BuiltinCategory(category_id.to_string()));
        }
        let existed = self.registry.custom().iter().any(|c| c.id == category_id);
        self.registry.delete_custom(category_id)?;
        self.resources.remove_category(category_id)?;
        Ok(existed)
    }

    pub fn view(&self, selection: &ViewSelection) -> Vec<ResourceView> {
        visible_resources(&self.registry, &self.resources, selection)
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        ExportDocument::new(
            self.resources.document().clone(),
            self.registry.get_all(),
            now,
        )
    }

    /// Merge a backup file into the shelf.
    ///
    /// The file is fully parsed before anything changes. Resources and
    /// categories merge independently: every imported resource category
    /// overwrites the held one, while imported categories whose id is
    /// already registered are skipped.
    pub fn import_str(&mut self, content: &str) -> Result<ImportReport, ShelfError> {
        let bundle = parse_import(content)?;
        if let Some(warning) = &bundle.version_warning {
            tracing::warn!(warning = %warning, "Importing backup with a different version");
        }

        let merged_categories = self.resources.merge_categories(bundle.resource_data)?;

        let mut added_custom = Vec::new();
        let mut skipped_custom = Vec::new();
        for category in bundle.dev_types {
            if self.registry.contains(&category.id) {
                skipped_custom.push(category.id);
                continue;
            }
            let id = category.id.clone();
            self.registry.add_custom(category)?;
            added_custom.push(id);
        }

        tracing::info!(
            merged = merged_categories.len(),
            added = added_custom.len(),
            skipped = skipped_custom.len(),
            "Import complete"
        );
        Ok(ImportReport {
            merged_categories,
            added_custom,
            skipped_custom,
            version_warning: bundle.version_warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;
    use crate::storage::{MemoryKeyValueStore, RESOURCE_DATA_KEY};

    fn shelf() -> (Arc<MemoryKeyValueStore>, Shelf) {
        let store = Arc::new(MemoryKeyValueStore::new());
        (store.clone(), Shelf::open(store))
    }

    fn design_draft() -> CategoryDraft {
        CategoryDraft {
            id: Some("design".to_string()),
            name: "设计资源".to_string(),
            use_defaults: false,
            ..CategoryDraft::default()
        }
    }

    fn resource(category: &str, sub: &str, url: &str, title: &str) -> ResourceDraft {
        ResourceDraft {
            category_id: Some(category.to_string()),
            sub_category_id: Some(sub.to_string()),
            url: url.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_add_category_then_resource_then_delete() {
        let (_store, mut shelf) = shelf();
        let category = shelf.add_category(&design_draft()).unwrap();
        assert_eq!(category.resource_types.len(), 1);
        assert_eq!(category.resource_types[0].id, "other");

        shelf
            .add_resource(&resource("design", "other", "https://a.com/page-one", "A"))
            .unwrap();
        assert!(shelf.delete_resource("design", "other", 0).unwrap());
        assert!(shelf.resources().document().category("design").is_none());
    }

    #[test]
    fn test_invalid_resource_never_reaches_store() {
        let (store, mut shelf) = shelf();
        let err = shelf
            .add_resource(&resource("frontend", "tools", "vitejs.dev", "Vite"))
            .unwrap_err();
        assert!(matches!(err, ShelfError::Validation(ref v) if v.field == Field::Url));
        assert!(store.get(RESOURCE_DATA_KEY).unwrap().is_none());
    }

    #[test]
    fn test_builtin_category_cannot_be_deleted() {
        let (_store, mut shelf) = shelf();
        shelf
            .add_resource(&resource("frontend", "tools", "https://vitejs.dev", "Vite"))
            .unwrap();
        let err = shelf.delete_category("frontend").unwrap_err();
        assert!(matches!(err, ShelfError::BuiltinCategory(_)));
        assert_eq!(shelf.resources().document().len(), 1);
    }

    #[test]
    fn test_deleting_custom_category_drops_its_resources() {
        let (_store, mut shelf) = shelf();
        shelf.add_category(&design_draft()).unwrap();
        shelf
            .add_resource(&resource("design", "other", "https://dribbble.com", "Dribbble"))
            .unwrap();

        assert!(shelf.delete_category("design").unwrap());
        assert!(!shelf.registry().contains("design"));
        assert!(shelf.resources().document().is_empty());
        assert!(!shelf.delete_category("design").unwrap());
    }

    #[test]
    fn test_edit_validates_patch() {
        let (_store, mut shelf) = shelf();
        let entry = shelf
            .add_resource(&resource("frontend", "tools", "https://vitejs.dev", "Vite"))
            .unwrap();
        let bad = EntryPatch {
            title: Some(" ".to_string()),
            url: None,
        };
        assert!(shelf.edit_resource_by_id(&entry.id, &bad).is_err());

        let good = EntryPatch {
            title: Some("Vite 5".to_string()),
            url: None,
        };
        assert!(shelf.edit_resource_by_id(&entry.id, &good).unwrap());
    }

    #[test]
    fn test_import_merges_paths_independently() {
        let (_store, mut shelf) = shelf();
        let content = r#"{
            "resourceData": {
                "frontend": {"tools": [{"url": "https://vitejs.dev", "title": "Vite",
                    "addedAt": "2024-01-01T00:00:00.000Z", "type": "tools"}]},
                "design": {"other": [{"url": "https://figma.com", "title": "Figma",
                    "addedAt": "2024-01-01T00:00:00.000Z", "type": "other"}]}
            },
            "devTypes": [
                {"id": "frontend", "name": "Imported frontend", "icon": "fa-code", "resourceTypes": []},
                {"id": "design", "name": "设计资源", "icon": "fa-folder",
                 "resourceTypes": [{"id": "other", "name": "其他资源", "icon": "fa-file"}]}
            ],
            "exportDate": "2024-01-02T00:00:00.000Z",
            "version": "0.1.0"
        }"#;

        let report = shelf.import_str(content).unwrap();
        assert_eq!(report.skipped_custom, vec!["frontend".to_string()]);
        assert_eq!(report.added_custom, vec!["design".to_string()]);
        assert!(report.version_warning.is_none());

        assert_eq!(shelf.registry().find("frontend").unwrap().name, "前端开发");
        assert_eq!(
            shelf.resources().document().entries("frontend", "tools").unwrap()[0].title,
            "Vite"
        );
    }

    #[test]
    fn test_malformed_import_changes_nothing() {
        let (store, mut shelf) = shelf();
        shelf
            .add_resource(&resource("frontend", "tools", "https://vitejs.dev", "Vite"))
            .unwrap();
        let before = store.get(RESOURCE_DATA_KEY).unwrap();

        let err = shelf.import_str(r#"{"resourceData": {}}"#).unwrap_err();
        assert!(matches!(err, ShelfError::ImportFormat(_)));
        assert_eq!(store.get(RESOURCE_DATA_KEY).unwrap(), before);
    }
}
