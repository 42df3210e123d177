//! Resource store: in-memory document with write-through persistence.

use super::model::{EntryKey, EntryPatch, ResourceDocument, ResourceEntry};
use crate::error::ShelfError;
use crate::storage::{read_json, write_json, KeyValueStore, RESOURCE_DATA_KEY};
use std::sync::Arc;

/// An entry read by [`ResourceStore::query_indexed`] with its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntry {
    pub sub_category_id: String,
    /// Position inside the `sub_category_id` list.
    pub index: usize,
    pub entry: ResourceEntry,
}

/// Resource store
///
/// The in-memory document is authoritative. Each mutation that changes it
/// writes the full document back; if that write fails the error is returned
/// and memory keeps the change until the next successful write.
pub struct ResourceStore {
    document: ResourceDocument,
    store: Arc<dyn KeyValueStore>,
}

impl ResourceStore {
    /// Open the store. An absent or corrupt document loads as empty.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let mut resources = Self {
            document: ResourceDocument::new(),
            store,
        };
        resources.reload();
        resources
    }

    /// Reload from storage.
    ///
    /// Empty containers are dropped and missing or repeated ids replaced in
    /// memory only; storage catches up with the next mutation.
    pub fn reload(&mut self) {
        self.document = read_json(self.store.as_ref(), RESOURCE_DATA_KEY).unwrap_or_default();
        if self.document.prune_empty() {
            tracing::warn!("Dropped empty containers from stored resources");
        }
        let assigned = self.document.ensure_unique_ids();
        if assigned > 0 {
            tracing::debug!(assigned, "Assigned ids to stored resources");
        }
        tracing::debug!(entries = self.document.len(), "Loaded resource document");
    }

    pub fn document(&self) -> &ResourceDocument {
        &self.document
    }

    /// Append `entry` under (category, sub-category). No registry check.
    pub fn add(
        &mut self,
        category_id: &str,
        sub_category_id: &str,
        entry: ResourceEntry,
    ) -> Result<(), ShelfError> {
        tracing::info!(
            category_id,
            sub_category_id,
            entry_id = %entry.id,
            url = %entry.url,
            "Adding resource"
        );
        self.document.push(category_id, sub_category_id, entry);
        self.persist()
    }

    /// Delete by position. Returns whether an entry was removed; a miss
    /// leaves storage untouched.
    pub fn delete(
        &mut self,
        category_id: &str,
        sub_category_id: &str,
        index: usize,
    ) -> Result<bool, ShelfError> {
        match self.document.remove_at(category_id, sub_category_id, index) {
            Some(removed) => {
                tracing::info!(
                    category_id,
                    sub_category_id,
                    index,
                    entry_id = %removed.id,
                    "Deleted resource"
                );
                self.persist()?;
                Ok(true)
            }
            None => {
                tracing::debug!(category_id, sub_category_id, index, "Nothing to delete");
                Ok(false)
            }
        }
    }

    pub fn delete_by_id(&mut self, entry_id: &str) -> Result<bool, ShelfError> {
        match self.document.remove_by_id(entry_id) {
            Some(_) => {
                tracing::info!(entry_id, "Deleted resource");
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Patch the entry matching `key` in the addressed list.
    pub fn edit(
        &mut self,
        category_id: &str,
        sub_category_id: &str,
        key: &EntryKey,
        patch: &EntryPatch,
    ) -> Result<bool, ShelfError> {
        let found = self
            .document
            .patch_matching(category_id, sub_category_id, key, patch)
            .is_some();
        self.finish_edit(found)
    }

    pub fn edit_by_id(&mut self, entry_id: &str, patch: &EntryPatch) -> Result<bool, ShelfError> {
        let found = self.document.patch_by_id(entry_id, patch).is_some();
        self.finish_edit(found)
    }

    /// Drop everything filed under a category.
    pub fn remove_category(&mut self, category_id: &str) -> Result<bool, ShelfError> {
        match self.document.remove_category(category_id) {
            Some(subs) => {
                tracing::info!(category_id, sub_categories = subs.len(), "Removed category resources");
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Overwrite same-named categories with the incoming ones and persist.
    pub fn merge_categories(&mut self, incoming: ResourceDocument) -> Result<Vec<String>, ShelfError> {
        let merged = self.document.merge_categories(incoming);
        self.document.ensure_unique_ids();
        tracing::info!(categories = merged.len(), "Merged imported resources");
        self.persist()?;
        Ok(merged)
    }

    /// Entries under a category, or one of its sub-categories.
    ///
    /// Without a sub-category, lists are concatenated in `declared_order`,
    /// followed by any undeclared sub-categories in key order. Entries without
    /// a type tag are tagged with the sub-category they were found in.
    pub fn query(
        &self,
        category_id: &str,
        sub_category_id: Option<&str>,
        declared_order: &[&str],
    ) -> Vec<ResourceEntry> {
        self.query_indexed(category_id, sub_category_id, declared_order)
            .into_iter()
            .map(|hit| hit.entry)
            .collect()
    }

    /// Same order as [`ResourceStore::query`], with each entry's position in
    /// the list it was read from.
    pub fn query_indexed(
        &self,
        category_id: &str,
        sub_category_id: Option<&str>,
        declared_order: &[&str],
    ) -> Vec<IndexedEntry> {
        let Some(subs) = self.document.category(category_id) else {
            return Vec::new();
        };

        let lists: Vec<(&str, &Vec<ResourceEntry>)> = match sub_category_id {
            Some(sub_id) => subs.get(sub_id).map(|list| (sub_id, list)).into_iter().collect(),
            None => {
                let declared = declared_order
                    .iter()
                    .filter_map(|sub_id| subs.get(*sub_id).map(|list| (*sub_id, list)));
                let undeclared = subs
                    .iter()
                    .filter(|(sub_id, _)| !declared_order.contains(&sub_id.as_str()))
                    .map(|(sub_id, list)| (sub_id.as_str(), list));
                declared.chain(undeclared).collect()
            }
        };

        lists
            .into_iter()
            .flat_map(|(sub_id, list)| {
                list.iter().enumerate().map(move |(index, entry)| {
                    let mut entry = entry.clone();
                    if entry.sub_category.is_empty() {
                        entry.sub_category = sub_id.to_string();
                    }
                    IndexedEntry {
                        sub_category_id: sub_id.to_string(),
                        index,
                        entry,
                    }
                })
            })
            .collect()
    }

    fn finish_edit(&mut self, found: bool) -> Result<bool, ShelfError> {
        if !found {
            tracing::debug!("No resource matched edit");
            return Ok(false);
        }
        tracing::info!("Edited resource");
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), ShelfError> {
        write_json(self.store.as_ref(), RESOURCE_DATA_KEY, &self.document)?;
        Ok(())
    }
}
