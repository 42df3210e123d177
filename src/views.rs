//! Resource Views
//!
//! Derives the visible list of resources from the current selection and an
//! optional search term. Nothing here is persisted or cached; the list is
//! recomputed from the store on every call.

use crate::category::CategoryRegistry;
use crate::resource::{ResourceEntry, ResourceStore};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use url::Url;

/// Current selection in the resource list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelection {
    /// Category to show; `None` shows every category.
    pub category: Option<String>,
    /// Sub-category within `category`; `None` shows all of them.
    pub sub_category: Option<String>,
    /// Case-insensitive substring matched against title or URL.
    pub search: Option<String>,
}

/// One row of the resource list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceView {
    pub category_id: String,
    pub sub_category_id: String,
    /// Position inside its sub-category list, usable for delete-by-index.
    pub index: usize,
    pub entry: ResourceEntry,
}

/// Entries to display for `selection`, in display order.
pub fn visible_resources(
    registry: &CategoryRegistry,
    resources: &ResourceStore,
    selection: &ViewSelection,
) -> Vec<ResourceView> {
    let category_ids: Vec<String> = match &selection.category {
        Some(category_id) => vec![category_id.clone()],
        None => {
            let mut ids: Vec<String> = registry.get_all().into_iter().map(|c| c.id).collect();
            for id in resources.document().category_ids() {
                if !ids.iter().any(|known| known == id) {
                    ids.push(id.to_string());
                }
            }
            ids
        }
    };

    let sub_filter = selection
        .category
        .as_ref()
        .and(selection.sub_category.as_deref());
    let term = selection
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut rows = Vec::new();
    for category_id in &category_ids {
        let declared = registry
            .find(category_id)
            .map(|c| c.sub_category_ids())
            .unwrap_or_default();

        for hit in resources.query_indexed(category_id, sub_filter, &declared) {
            if let Some(term) = &term {
                if !matches_search(&hit.entry, term) {
                    continue;
                }
            }
            rows.push(ResourceView {
                category_id: category_id.clone(),
                sub_category_id: hit.sub_category_id,
                index: hit.index,
                entry: hit.entry,
            });
        }
    }
    rows
}

/// `term` must already be lower-cased.
fn matches_search(entry: &ResourceEntry, term: &str) -> bool {
    entry.title.to_lowercase().contains(term) || entry.url.to_lowercase().contains(term)
}

/// Host of `url` without a leading `www.`; the raw string if it does not parse.
pub fn display_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h).to_string()))
        .unwrap_or_else(|| url.to_string())
}

/// `YYYY-MM-DD HH:MM` in local time; the raw string if it does not parse.
pub fn format_added_at(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
