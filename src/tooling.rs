//! Tooling Layer
//!
//! The `devshelf` command-line interface and its text formatting.

pub mod cli;
pub mod format;

pub use cli::{CategoryCommands, Cli, CliContext, Commands};
