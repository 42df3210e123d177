//! Error types shared across the shelf.

use std::fmt;
use thiserror::Error;

/// Errors raised by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove key '{key}': {source}")]
    Remove {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage backend rejected write for key '{key}': {reason}")]
    Rejected { key: String, reason: String },
}

/// Form field a validation failure is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Category,
    SubCategory,
    Url,
    Title,
    Name,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Category => "category",
            Field::SubCategory => "sub-category",
            Field::Url => "url",
            Field::Title => "title",
            Field::Name => "name",
        };
        f.write_str(name)
    }
}

/// A rejected form input, reported next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Top-level error for shelf operations.
#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Category id already exists: {0}")]
    DuplicateId(String),

    #[error("Built-in category cannot be deleted: {0}")]
    BuiltinCategory(String),

    #[error("Operation failed, please retry: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid import file: {0}")]
    ImportFormat(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
