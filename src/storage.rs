//! Key-value storage: the persistence port behind the registry and the store.
//!
//! Every persisted document is an opaque JSON blob addressed by a string key.
//! Callers own the key they write to and always replace the whole blob.

pub mod contract;
pub mod file;
pub mod memory;

pub use contract::{read_json, write_json, KeyValueStore};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

/// Key holding the resource document.
pub const RESOURCE_DATA_KEY: &str = "resourceData";

/// Key holding the list of user-created categories.
pub const CUSTOM_CATEGORIES_KEY: &str = "customDevTypes";
