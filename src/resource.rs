//! Resource Store
//!
//! The nested mapping of category → sub-category → ordered list of saved
//! links, persisted in full after every mutation.

pub mod model;
pub mod store;

pub use model::{EntryKey, EntryPatch, ResourceDocument, ResourceEntry};
pub use store::{IndexedEntry, ResourceStore};
