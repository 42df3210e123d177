//! Form validation for new resources and new categories.
//!
//! Checks run in a fixed order and the first failure short-circuits with an
//! error tied to the offending field.

use crate::category::{
    default_sub_categories, fallback_sub_category, Category, CategoryRegistry, SubCategory,
};
use crate::error::{Field, ValidationError};
use crate::resource::EntryPatch;
use url::Url;

/// Icon given to categories created without one.
pub const DEFAULT_CATEGORY_ICON: &str = "fa-folder";

/// Icon given to sub-categories created without one.
pub const DEFAULT_SUB_CATEGORY_ICON: &str = "fa-file";

/// Raw input of the add-resource form.
#[derive(Debug, Clone, Default)]
pub struct ResourceDraft {
    pub category_id: Option<String>,
    pub sub_category_id: Option<String>,
    pub url: String,
    pub title: String,
}

/// A resource draft that passed validation, with inputs trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidResource {
    pub category_id: String,
    pub sub_category_id: String,
    pub url: String,
    pub title: String,
}

fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Validate an add-resource submission.
///
/// Order: category selected and registered, sub-category selected and declared
/// by that category, URL present, URL absolute and well-formed, title present.
pub fn validate_resource(
    draft: &ResourceDraft,
    registry: &CategoryRegistry,
) -> Result<ValidResource, ValidationError> {
    let category_id = selected(&draft.category_id)
        .ok_or_else(|| ValidationError::new(Field::Category, "Please select a category"))?;
    let category = registry.find(category_id).ok_or_else(|| {
        ValidationError::new(Field::Category, format!("Unknown category: {}", category_id))
    })?;

    let sub_category_id = selected(&draft.sub_category_id)
        .ok_or_else(|| ValidationError::new(Field::SubCategory, "Please select a sub-category"))?;
    if category.sub_category(sub_category_id).is_none() {
        return Err(ValidationError::new(
            Field::SubCategory,
            format!(
                "Category '{}' has no sub-category '{}'",
                category.id, sub_category_id
            ),
        ));
    }

    let url = validate_url(&draft.url)?;
    let title = validate_title(&draft.title)?;

    Ok(ValidResource {
        category_id: category_id.to_string(),
        sub_category_id: sub_category_id.to_string(),
        url,
        title,
    })
}

/// Non-empty and parseable as an absolute URL. Returns the trimmed URL.
pub fn validate_url(raw: &str) -> Result<String, ValidationError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ValidationError::new(Field::Url, "Please enter the resource URL"));
    }
    Url::parse(url).map_err(|e| {
        ValidationError::new(Field::Url, format!("Please enter a valid URL ({})", e))
    })?;
    Ok(url.to_string())
}

pub fn validate_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::new(Field::Title, "Please enter the resource title"));
    }
    Ok(title.to_string())
}

/// Validate the fields an edit changes. Returns the patch with inputs trimmed.
pub fn validate_patch(patch: &EntryPatch) -> Result<EntryPatch, ValidationError> {
    Ok(EntryPatch {
        title: patch.title.as_deref().map(validate_title).transpose()?,
        url: patch.url.as_deref().map(validate_url).transpose()?,
    })
}

/// Title derived from a URL: `host - Last Segment`.
///
/// Only `http`/`https` URLs produce a suggestion. A leading `www.` is dropped
/// from the host; the last path segment has `-`/`_` turned into spaces, its
/// extension removed, and each word capitalized.
pub fn suggest_title(raw_url: &str) -> Option<String> {
    let raw_url = raw_url.trim();
    if !raw_url.starts_with("http") {
        return None;
    }
    let url = Url::parse(raw_url).ok()?;
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    let last_segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last());

    let formatted = last_segment.map(format_path_segment).unwrap_or_default();
    if formatted.is_empty() {
        Some(host.to_string())
    } else {
        Some(format!("{} - {}", host, formatted))
    }
}

fn format_path_segment(segment: &str) -> String {
    let spaced = segment.replace(['-', '_'], " ");
    let stem = match spaced.rfind('.') {
        Some(dot) if dot + 1 < spaced.len() => &spaced[..dot],
        _ => spaced.as_str(),
    };
    stem.split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Raw input for one sub-category row of the add-category form.
#[derive(Debug, Clone, Default)]
pub struct SubCategoryDraft {
    pub name: String,
    pub icon: Option<String>,
}

/// Raw input of the add-category form.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    /// Explicit id; a generated one is used when absent.
    pub id: Option<String>,
    pub name: String,
    pub icon: Option<String>,
    pub sub_categories: Vec<SubCategoryDraft>,
    /// Use the stock developer sub-categories when none are given.
    pub use_defaults: bool,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            icon: None,
            sub_categories: Vec::new(),
            use_defaults: true,
        }
    }
}

/// Sub-category id from its display name: trimmed, lower-cased, whitespace
/// runs replaced by a single hyphen.
pub fn sub_category_id(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn build_sub_category(draft: &SubCategoryDraft) -> Result<SubCategory, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new(
            Field::Name,
            "Please enter a sub-category name",
        ));
    }
    Ok(SubCategory::new(
        sub_category_id(name),
        name,
        draft
            .icon
            .clone()
            .unwrap_or_else(|| DEFAULT_SUB_CATEGORY_ICON.to_string()),
    ))
}

/// Validate an add-category submission and build the category.
///
/// `generate_id` is only called when the draft carries no id. Every built
/// category has at least one sub-category.
pub fn build_category(
    draft: &CategoryDraft,
    generate_id: impl FnOnce() -> String,
) -> Result<Category, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new(Field::Name, "Please enter a category name"));
    }

    let mut resource_types = draft
        .sub_categories
        .iter()
        .map(build_sub_category)
        .collect::<Result<Vec<_>, _>>()?;
    if resource_types.is_empty() {
        resource_types = if draft.use_defaults {
            default_sub_categories()
        } else {
            vec![fallback_sub_category()]
        };
    }

    let id = match selected(&draft.id) {
        Some(id) => id.to_string(),
        None => generate_id(),
    };

    Ok(Category {
        id,
        name: name.to_string(),
        icon: draft
            .icon
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
        resource_types,
    })
}
