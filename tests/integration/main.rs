//! Integration tests for the devshelf resource shelf

mod cli_commands;
mod import_export;
mod store_invariants;
