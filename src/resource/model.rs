use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Sub-category id → entries; entries keep insertion order.
pub type SubCategoryMap = BTreeMap<String, Vec<ResourceEntry>>;

fn new_entry_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A single saved link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
    /// Stable identifier. Empty for entries stored before ids existed until
    /// [`ResourceDocument::ensure_unique_ids`] runs.
    #[serde(default)]
    pub id: String,
    pub url: String,
    pub title: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub added_at: String,
    /// Owning sub-category id.
    #[serde(rename = "type", default)]
    pub sub_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ResourceEntry {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        sub_category: impl Into<String>,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_entry_id(),
            url: url.into(),
            title: title.into(),
            added_at: format_timestamp(added_at),
            sub_category: sub_category.into(),
            image_url: None,
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            url: self.url.clone(),
            title: self.title.clone(),
            added_at: self.added_at.clone(),
        }
    }

    fn apply(&mut self, patch: &EntryPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(url) = &patch.url {
            self.url = url.clone();
        }
    }
}

/// `2024-01-01T00:00:00.000Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Value-based identity of an entry: (url, title, addedAt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryKey {
    pub url: String,
    pub title: String,
    pub added_at: String,
}

impl EntryKey {
    pub fn matches(&self, entry: &ResourceEntry) -> bool {
        entry.url == self.url && entry.title == self.title && entry.added_at == self.added_at
    }
}

/// Fields an edit may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub url: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none()
    }
}

/// Category id → sub-category id → entries.
///
/// Delete operations prune emptied lists and emptied categories, so a
/// document built by add/delete never holds an empty container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceDocument {
    categories: BTreeMap<String, SubCategoryMap>,
}

impl ResourceDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, category_id: &str) -> Option<&SubCategoryMap> {
        self.categories.get(category_id)
    }

    pub fn category_ids(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn entries(&self, category_id: &str, sub_category_id: &str) -> Option<&[ResourceEntry]> {
        self.categories
            .get(category_id)?
            .get(sub_category_id)
            .map(Vec::as_slice)
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.categories
            .values()
            .flat_map(|subs| subs.values())
            .map(Vec::len)
            .sum()
    }

    /// True when some category or sub-category maps to an empty container.
    pub fn has_empty_containers(&self) -> bool {
        self.categories
            .values()
            .any(|subs| subs.is_empty() || subs.values().any(Vec::is_empty))
    }

    /// Append to the addressed list, creating containers as needed.
    pub fn push(&mut self, category_id: &str, sub_category_id: &str, entry: ResourceEntry) {
        self.categories
            .entry(category_id.to_string())
            .or_default()
            .entry(sub_category_id.to_string())
            .or_default()
            .push(entry);
    }

    /// Remove the entry at `index`, pruning emptied containers.
    pub fn remove_at(
        &mut self,
        category_id: &str,
        sub_category_id: &str,
        index: usize,
    ) -> Option<ResourceEntry> {
        let subs = self.categories.get_mut(category_id)?;
        let list = subs.get_mut(sub_category_id)?;
        if index >= list.len() {
            return None;
        }
        let removed = list.remove(index);
        self.prune(category_id, sub_category_id);
        Some(removed)
    }

    /// Remove the entry with the given id wherever it lives.
    pub fn remove_by_id(&mut self, entry_id: &str) -> Option<ResourceEntry> {
        let (category_id, sub_category_id, index) = self.locate(entry_id)?;
        self.remove_at(&category_id, &sub_category_id, index)
    }

    /// Patch the first entry in the addressed list matching `key`.
    pub fn patch_matching(
        &mut self,
        category_id: &str,
        sub_category_id: &str,
        key: &EntryKey,
        patch: &EntryPatch,
    ) -> Option<&ResourceEntry> {
        let entry = self
            .categories
            .get_mut(category_id)?
            .get_mut(sub_category_id)?
            .iter_mut()
            .find(|entry| key.matches(entry))?;
        entry.apply(patch);
        Some(&*entry)
    }

    /// Patch the entry with the given id.
    pub fn patch_by_id(&mut self, entry_id: &str, patch: &EntryPatch) -> Option<&ResourceEntry> {
        let entry = self
            .categories
            .values_mut()
            .flat_map(|subs| subs.values_mut())
            .flat_map(|list| list.iter_mut())
            .find(|entry| entry.id == entry_id)?;
        entry.apply(patch);
        Some(&*entry)
    }

    /// (category id, sub-category id, index) of the entry with `entry_id`.
    pub fn locate(&self, entry_id: &str) -> Option<(String, String, usize)> {
        self.categories.iter().find_map(|(category_id, subs)| {
            subs.iter().find_map(|(sub_category_id, list)| {
                list.iter()
                    .position(|entry| entry.id == entry_id)
                    .map(|index| (category_id.clone(), sub_category_id.clone(), index))
            })
        })
    }

    /// Give a fresh id to every entry whose id is empty or already used by
    /// an earlier entry (category, then sub-category key order). Returns how
    /// many changed.
    pub fn ensure_unique_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut assigned = 0;
        for entry in self
            .categories
            .values_mut()
            .flat_map(|subs| subs.values_mut())
            .flat_map(|list| list.iter_mut())
        {
            if entry.id.is_empty() || seen.contains(&entry.id) {
                entry.id = new_entry_id();
                assigned += 1;
            }
            seen.insert(entry.id.clone());
        }
        assigned
    }

    /// Drop empty lists and categories left with no lists. Returns whether
    /// anything was dropped.
    pub fn prune_empty(&mut self) -> bool {
        if !self.has_empty_containers() {
            return false;
        }
        self.categories.retain(|_, subs| retain_non_empty(subs));
        true
    }

    /// Drop a whole category.
    pub fn remove_category(&mut self, category_id: &str) -> Option<SubCategoryMap> {
        self.categories.remove(category_id)
    }

    /// Shallow merge: each incoming category replaces the one held under the
    /// same id. Empty incoming lists are dropped first, and a category left
    /// with nothing replaces the held one by removing it.
    ///
    /// Returns the merged category ids.
    pub fn merge_categories(&mut self, incoming: ResourceDocument) -> Vec<String> {
        let mut merged = Vec::new();
        for (category_id, mut subs) in incoming.categories {
            if !retain_non_empty(&mut subs) {
                self.categories.remove(&category_id);
            } else {
                self.categories.insert(category_id.clone(), subs);
            }
            merged.push(category_id);
        }
        merged
    }

    fn prune(&mut self, category_id: &str, sub_category_id: &str) {
        let Some(subs) = self.categories.get_mut(category_id) else {
            return;
        };
        if subs.get(sub_category_id).is_some_and(Vec::is_empty) {
            subs.remove(sub_category_id);
        }
        if subs.is_empty() {
            self.categories.remove(category_id);
        }
    }
}

/// Drop empty lists; false when nothing is left.
fn retain_non_empty(subs: &mut SubCategoryMap) -> bool {
    subs.retain(|_, list| !list.is_empty());
    !subs.is_empty()
}
