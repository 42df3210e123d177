//! Shelf command service: single entry point per CLI command variant.
//!
//! Owns the command workflows; the CLI parses arguments, calls one method per
//! variant, and formats the typed result.

use crate::category::Category;
use crate::error::{ShelfError, StorageError};
use crate::resource::{EntryKey, EntryPatch, ResourceEntry};
use crate::shelf::Shelf;
use crate::transfer::{default_export_file_name, ImportReport};
use crate::validation::{suggest_title, CategoryDraft, ResourceDraft};
use crate::views::{ResourceView, ViewSelection};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub struct ShelfCommandService;

/// Result of category list command.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListResult {
    pub categories: Vec<CategoryListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryListItem {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub builtin: bool,
    pub sub_categories: Vec<String>,
    pub resource_count: usize,
}

/// Result of category add command.
#[derive(Debug, Clone)]
pub struct CategoryAddResult {
    pub category: Category,
}

/// Result of category remove command.
#[derive(Debug, Clone)]
pub struct CategoryRemoveResult {
    pub category_id: String,
    pub existed: bool,
    pub removed_resources: usize,
}

/// Result of resource add command.
#[derive(Debug, Clone)]
pub struct ResourceAddResult {
    pub category_id: String,
    pub sub_category_id: String,
    pub entry: ResourceEntry,
    /// The title was derived from the URL because none was given.
    pub title_suggested: bool,
}

/// Which entry a remove command targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    Position {
        category_id: String,
        sub_category_id: String,
        index: usize,
    },
    Id(String),
}

/// Which entry an edit command targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Entry matched by its (url, title, addedAt) value.
    Key {
        category_id: String,
        sub_category_id: String,
        key: EntryKey,
    },
    Id(String),
}

/// Result of resource remove or edit; `changed` is false when nothing matched.
#[derive(Debug, Clone)]
pub struct ResourceChangeResult {
    pub changed: bool,
}

/// Result of list command.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceListResult {
    pub rows: Vec<ResourceView>,
}

/// Result of export command.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub path: PathBuf,
    pub resource_count: usize,
    pub category_count: usize,
}

impl ShelfCommandService {
    /// Every registered category, built-ins first, with its resource count.
    pub fn list_categories(shelf: &Shelf) -> CategoryListResult {
        let document = shelf.resources().document();
        let categories = shelf
            .categories()
            .into_iter()
            .map(|category| {
                let resource_count = document
                    .category(&category.id)
                    .map(|subs| subs.values().map(Vec::len).sum())
                    .unwrap_or(0);
                CategoryListItem {
                    builtin: shelf.registry().is_builtin(&category.id),
                    sub_categories: category
                        .resource_types
                        .iter()
                        .map(|s| s.id.clone())
                        .collect(),
                    id: category.id,
                    name: category.name,
                    icon: category.icon,
                    resource_count,
                }
            })
            .collect();
        CategoryListResult { categories }
    }

    pub fn add_category(
        shelf: &mut Shelf,
        draft: &CategoryDraft,
    ) -> Result<CategoryAddResult, ShelfError> {
        let category = shelf.add_category(draft)?;
        tracing::info!(category_id = %category.id, "Added custom category");
        Ok(CategoryAddResult { category })
    }

    /// Remove a custom category and its resources.
    pub fn remove_category(
        shelf: &mut Shelf,
        category_id: &str,
    ) -> Result<CategoryRemoveResult, ShelfError> {
        let removed_resources = shelf
            .resources()
            .document()
            .category(category_id)
            .map(|subs| subs.values().map(Vec::len).sum())
            .unwrap_or(0);
        let existed = shelf.delete_category(category_id)?;
        Ok(CategoryRemoveResult {
            category_id: category_id.to_string(),
            existed,
            removed_resources: if existed { removed_resources } else { 0 },
        })
    }

    /// Add a resource, deriving the title from the URL when it is blank.
    pub fn add_resource(
        shelf: &mut Shelf,
        draft: &ResourceDraft,
        now: DateTime<Utc>,
    ) -> Result<ResourceAddResult, ShelfError> {
        let mut draft = draft.clone();
        let mut title_suggested = false;
        if draft.title.trim().is_empty() {
            if let Some(title) = suggest_title(&draft.url) {
                draft.title = title;
                title_suggested = true;
            }
        }
        let entry = shelf.add_resource_at(&draft, now)?;
        let (category_id, sub_category_id) = (
            draft.category_id.unwrap_or_default().trim().to_string(),
            draft.sub_category_id.unwrap_or_default().trim().to_string(),
        );
        tracing::info!(
            category_id = %category_id,
            sub_category_id = %sub_category_id,
            entry_id = %entry.id,
            "Added resource"
        );
        Ok(ResourceAddResult {
            category_id,
            sub_category_id,
            entry,
            title_suggested,
        })
    }

    pub fn remove_resource(
        shelf: &mut Shelf,
        target: &RemoveTarget,
    ) -> Result<ResourceChangeResult, ShelfError> {
        let changed = match target {
            RemoveTarget::Position {
                category_id,
                sub_category_id,
                index,
            } => shelf.delete_resource(category_id, sub_category_id, *index)?,
            RemoveTarget::Id(entry_id) => shelf.delete_resource_by_id(entry_id)?,
        };
        Ok(ResourceChangeResult { changed })
    }

    pub fn edit_resource(
        shelf: &mut Shelf,
        target: &EditTarget,
        patch: &EntryPatch,
    ) -> Result<ResourceChangeResult, ShelfError> {
        if patch.is_empty() {
            return Ok(ResourceChangeResult { changed: false });
        }
        let changed = match target {
            EditTarget::Key {
                category_id,
                sub_category_id,
                key,
            } => shelf.edit_resource(category_id, sub_category_id, key, patch)?,
            EditTarget::Id(entry_id) => shelf.edit_resource_by_id(entry_id, patch)?,
        };
        Ok(ResourceChangeResult { changed })
    }

    pub fn list_resources(shelf: &Shelf, selection: &ViewSelection) -> ResourceListResult {
        ResourceListResult {
            rows: shelf.view(selection),
        }
    }

    /// Write a backup to `output`, or to the dated default name in the current directory.
    pub fn export(
        shelf: &Shelf,
        output: Option<&Path>,
        now: DateTime<Utc>,
    ) -> Result<ExportResult, ShelfError> {
        let document = shelf.export(now);
        let json = document.to_json()?;
        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(default_export_file_name(now)));
        std::fs::write(&path, json).map_err(|source| StorageError::Write {
            key: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Exported shelf");
        Ok(ExportResult {
            resource_count: document.resource_data.len(),
            category_count: document.dev_types.len(),
            path,
        })
    }

    pub fn import(shelf: &mut Shelf, path: &Path) -> Result<ImportReport, ShelfError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ShelfError::ImportFormat(format!("cannot read {}: {}", path.display(), e))
        })?;
        shelf.import_str(&content)
    }
}
