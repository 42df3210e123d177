//! Category Registry
//!
//! Categories group resources at the top level and declare the sub-categories a
//! resource can be filed under. A fixed set of built-in categories ships with
//! the shelf; users can add their own, which are persisted separately.

pub mod builtin;
pub mod model;
pub mod registry;

pub use builtin::{builtin_categories, default_sub_categories, fallback_sub_category};
pub use model::{Category, SubCategory};
pub use registry::CategoryRegistry;
