//! Config composition: source layering and defaults.

mod merge_policy;
pub mod service;
