//! Devshelf: a categorized bookmark shelf for developer resources
//!
//! Resources (saved links) are filed under a category and one of its
//! sub-categories. Built-in categories ship with the crate; custom ones are
//! persisted next to the resource document in a key-value store. The whole
//! shelf can be exported to, and merged back from, a single JSON backup.

pub mod category;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod resource;
pub mod shelf;
pub mod storage;
pub mod tooling;
pub mod transfer;
pub mod validation;
pub mod views;

pub use error::{ShelfError, StorageError, ValidationError};
pub use shelf::Shelf;
