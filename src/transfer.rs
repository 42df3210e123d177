//! Import/export of the whole shelf as a single JSON backup file.

use crate::category::Category;
use crate::error::ShelfError;
use crate::resource::model::format_timestamp;
use crate::resource::ResourceDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version tag written into exports and checked (advisory only) on import.
pub const EXPORT_VERSION: &str = "0.1.0";

/// Pseudo-category id never written into an export.
pub const HOME_CATEGORY_ID: &str = "home";

/// On-disk backup format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub resource_data: ResourceDocument,
    pub dev_types: Vec<Category>,
    pub export_date: String,
    pub version: String,
}

impl ExportDocument {
    pub fn new(
        resource_data: ResourceDocument,
        categories: Vec<Category>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            resource_data,
            dev_types: categories
                .into_iter()
                .filter(|category| category.id != HOME_CATEGORY_ID)
                .collect(),
            export_date: format_timestamp(exported_at),
            version: EXPORT_VERSION.to_string(),
        }
    }

    /// Pretty-printed JSON, as written to the backup file.
    pub fn to_json(&self) -> Result<String, ShelfError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShelfError::ImportFormat(format!("Failed to serialize export: {}", e)))
    }
}

/// `dev-resources-backup-YYYY-MM-DD.json`
pub fn default_export_file_name(exported_at: DateTime<Utc>) -> String {
    format!("dev-resources-backup-{}.json", exported_at.format("%Y-%m-%d"))
}

/// A parsed, structurally valid import file.
#[derive(Debug, Clone)]
pub struct ImportBundle {
    pub resource_data: ResourceDocument,
    pub dev_types: Vec<Category>,
    /// Set when the file carries a version other than [`EXPORT_VERSION`].
    pub version_warning: Option<String>,
}

/// Parse an import file. Nothing is merged if this fails.
pub fn parse_import(content: &str) -> Result<ImportBundle, ShelfError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ShelfError::ImportFormat(format!("not valid JSON: {}", e)))?;
    let Value::Object(mut root) = value else {
        return Err(ShelfError::ImportFormat(
            "top level must be a JSON object".to_string(),
        ));
    };

    let mut section = |name: &str| -> Result<Value, ShelfError> {
        match root.remove(name) {
            Some(Value::Null) | None => Err(ShelfError::ImportFormat(format!(
                "missing required field '{}'",
                name
            ))),
            Some(value) => Ok(value),
        }
    };
    let resource_value = section("resourceData")?;
    let categories_value = section("devTypes")?;

    let mut resource_data: ResourceDocument = serde_json::from_value(resource_value)
        .map_err(|e| ShelfError::ImportFormat(format!("invalid resourceData: {}", e)))?;
    let dev_types: Vec<Category> = serde_json::from_value(categories_value)
        .map_err(|e| ShelfError::ImportFormat(format!("invalid devTypes: {}", e)))?;
    resource_data.ensure_unique_ids();

    let version_warning = match root.get("version") {
        None | Some(Value::Null) => None,
        Some(Value::String(v)) if v == EXPORT_VERSION => None,
        Some(other) => Some(format!(
            "File version {} differs from {}; some data may not be compatible",
            other, EXPORT_VERSION
        )),
    };

    Ok(ImportBundle {
        resource_data,
        dev_types,
        version_warning,
    })
}

/// Outcome of a completed import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Category ids whose resources were overwritten from the file.
    pub merged_categories: Vec<String>,
    /// Categories appended to the custom list.
    pub added_custom: Vec<String>,
    /// Categories skipped because their id was already registered.
    pub skipped_custom: Vec<String>,
    pub version_warning: Option<String>,
}
