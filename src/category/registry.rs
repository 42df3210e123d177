//! Category registry: built-ins merged with persisted custom categories.

use super::builtin::{builtin_categories, known_sub_category_name};
use super::model::Category;
use crate::error::ShelfError;
use crate::storage::{read_json, write_json, KeyValueStore, CUSTOM_CATEGORIES_KEY};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Category registry
///
/// Holds the custom categories in memory and delegates persistence to the
/// key-value store. Built-ins are never written.
pub struct CategoryRegistry {
    builtins: Vec<Category>,
    custom: Vec<Category>,
    store: Arc<dyn KeyValueStore>,
}

impl CategoryRegistry {
    /// Open the registry, loading custom categories from the store.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let mut registry = Self {
            builtins: builtin_categories(),
            custom: Vec::new(),
            store,
        };
        registry.reload();
        registry
    }

    /// Re-read the custom list. A corrupt list degrades to no custom categories.
    pub fn reload(&mut self) {
        self.custom = read_json(self.store.as_ref(), CUSTOM_CATEGORIES_KEY).unwrap_or_default();
        tracing::debug!(custom = self.custom.len(), "Loaded custom categories");
    }

    /// Built-ins first, then custom categories in persisted order.
    pub fn get_all(&self) -> Vec<Category> {
        self.builtins
            .iter()
            .chain(self.custom.iter())
            .cloned()
            .collect()
    }

    pub fn custom(&self) -> &[Category] {
        &self.custom
    }

    pub fn find(&self, category_id: &str) -> Option<&Category> {
        self.builtins
            .iter()
            .chain(self.custom.iter())
            .find(|category| category.id == category_id)
    }

    pub fn contains(&self, category_id: &str) -> bool {
        self.find(category_id).is_some()
    }

    pub fn is_builtin(&self, category_id: &str) -> bool {
        self.builtins.iter().any(|category| category.id == category_id)
    }

    /// Append a custom category and persist the custom list.
    ///
    /// Fails with `DuplicateId` if the id is taken by a built-in or custom
    /// category; nothing is written in that case.
    pub fn add_custom(&mut self, category: Category) -> Result<Vec<Category>, ShelfError> {
        if self.contains(&category.id) {
            return Err(ShelfError::DuplicateId(category.id));
        }

        tracing::info!(category_id = %category.id, name = %category.name, "Adding custom category");
        self.custom.push(category);
        self.persist()?;
        Ok(self.get_all())
    }

    /// Remove a custom category by id. Unknown ids are a no-op.
    ///
    /// This filters the custom list unconditionally; rejecting built-in ids is
    /// up to the caller.
    pub fn delete_custom(&mut self, category_id: &str) -> Result<Vec<Category>, ShelfError> {
        let before = self.custom.len();
        self.custom.retain(|category| category.id != category_id);
        if self.custom.len() != before {
            tracing::info!(category_id, "Deleted custom category");
        }
        self.persist()?;
        Ok(self.get_all())
    }

    /// Time-derived id for a new custom category.
    pub fn generate_id(&self) -> String {
        self.generate_id_at(Utc::now())
    }

    /// `custom-<unix millis>`, suffixed with `-2`, `-3`, ... while taken.
    pub fn generate_id_at(&self, now: DateTime<Utc>) -> String {
        let base = format!("custom-{}", now.timestamp_millis());
        if !self.contains(&base) {
            return base;
        }
        (2u32..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or(base)
    }

    /// Display name for a sub-category id.
    ///
    /// Searches every registered category, then a table of well-known ids,
    /// and finally falls back to the id itself.
    pub fn sub_category_name(&self, sub_category_id: &str) -> String {
        self.builtins
            .iter()
            .chain(self.custom.iter())
            .find_map(|category| category.sub_category(sub_category_id))
            .map(|sub| sub.name.clone())
            .or_else(|| known_sub_category_name(sub_category_id).map(str::to_string))
            .unwrap_or_else(|| sub_category_id.to_string())
    }

    fn persist(&self) -> Result<(), ShelfError> {
        write_json(self.store.as_ref(), CUSTOM_CATEGORIES_KEY, &self.custom)?;
        Ok(())
    }
}
