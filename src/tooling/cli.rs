//! CLI Tooling
//!
//! Command-line interface for the shelf. Every command loads the persisted
//! documents from the data directory, runs one operation, and writes back
//! only what changed.

use crate::commands::{EditTarget, RemoveTarget, ShelfCommandService};
use crate::config::{ConfigLoader, ShelfConfig};
use crate::error::ShelfError;
use crate::resource::{EntryKey, EntryPatch};
use crate::shelf::Shelf;
use crate::storage::FileKeyValueStore;
use crate::tooling::format::{
    format_category_table, format_export_summary, format_import_report, format_resource_table,
    Palette,
};
use crate::validation::{CategoryDraft, ResourceDraft, SubCategoryDraft};
use crate::views::ViewSelection;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Devshelf CLI - categorized bookmarks for developer resources
#[derive(Parser)]
#[command(name = "devshelf")]
#[command(about = "Categorized bookmark shelf for developer resources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the shelf documents (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Effective configuration: config sources with command-line overrides applied.
    pub fn load_config(&self) -> Result<ShelfConfig, ShelfError> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Add a resource to a category's sub-category
    Add {
        /// Category id
        #[arg(long)]
        category: String,
        /// Sub-category id
        #[arg(long)]
        sub: String,
        /// Absolute URL of the resource
        #[arg(long)]
        url: String,
        /// Title (derived from the URL when omitted)
        #[arg(long)]
        title: Option<String>,
    },
    /// Remove a resource by position or by id
    #[command(group(ArgGroup::new("target").required(true).args(["index", "id"])))]
    Remove {
        /// Category id
        #[arg(long, requires_all = ["sub", "index"])]
        category: Option<String>,
        /// Sub-category id
        #[arg(long)]
        sub: Option<String>,
        /// Position within the sub-category list (see `list`)
        #[arg(long, requires_all = ["category", "sub"])]
        index: Option<usize>,
        /// Resource id
        #[arg(long)]
        id: Option<String>,
    },
    /// Edit a resource's title or URL
    #[command(group(ArgGroup::new("target").required(true).args(["id", "added_at"])))]
    Edit {
        /// Category id
        #[arg(long)]
        category: Option<String>,
        /// Sub-category id
        #[arg(long)]
        sub: Option<String>,
        /// Resource id
        #[arg(long)]
        id: Option<String>,
        /// Current URL (with --title and --added-at)
        #[arg(long)]
        url: Option<String>,
        /// Current title (with --url and --added-at)
        #[arg(long)]
        title: Option<String>,
        /// Current added-at timestamp (with --url and --title)
        #[arg(long, requires_all = ["category", "sub", "url", "title"])]
        added_at: Option<String>,
        /// New title
        #[arg(long)]
        new_title: Option<String>,
        /// New URL
        #[arg(long)]
        new_url: Option<String>,
    },
    /// List resources, optionally filtered
    List {
        /// Category id
        #[arg(long)]
        category: Option<String>,
        /// Sub-category id (only with --category)
        #[arg(long, requires = "category")]
        sub: Option<String>,
        /// Case-insensitive text matched against title or URL
        #[arg(long)]
        search: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Export the shelf to a backup file
    Export {
        /// Output path (default: dev-resources-backup-YYYY-MM-DD.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Merge a backup file into the shelf
    Import {
        /// Backup file path
        path: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List built-in and custom categories
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Add a custom category
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Explicit id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Font Awesome icon class
        #[arg(long)]
        icon: Option<String>,
        /// Sub-category name; repeat for several
        #[arg(long = "sub")]
        sub: Vec<String>,
        /// Use a single fallback sub-category instead of the stock developer set
        #[arg(long)]
        no_defaults: bool,
    },
    /// Remove a custom category and its resources
    Remove {
        /// Category id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// CLI context for one data directory
pub struct CliContext {
    shelf: Mutex<Shelf>,
    config: ShelfConfig,
    data_dir: PathBuf,
}

impl CliContext {
    /// Open the shelf stored in the configured data directory.
    pub fn new(config: ShelfConfig) -> Result<Self, ShelfError> {
        let data_dir = config.storage.resolve_data_dir()?;
        tracing::debug!(data_dir = %data_dir.display(), "Opening shelf");
        let store = Arc::new(FileKeyValueStore::new(&data_dir));
        Ok(Self {
            shelf: Mutex::new(Shelf::open(store)),
            config,
            data_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn palette(&self) -> Palette {
        Palette {
            color: self.config.display.color,
        }
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ShelfError> {
        match command {
            Commands::Category { command } => self.handle_category_command(command),
            Commands::Add {
                category,
                sub,
                url,
                title,
            } => self.handle_add(category, sub, url, title.as_deref()),
            Commands::Remove {
                category,
                sub,
                index,
                id,
            } => {
                let target = match (id, category, sub, index) {
                    (Some(id), _, _, _) => RemoveTarget::Id(id.clone()),
                    (None, Some(category), Some(sub), Some(index)) => RemoveTarget::Position {
                        category_id: category.clone(),
                        sub_category_id: sub.clone(),
                        index: *index,
                    },
                    _ => {
                        return Err(ShelfError::ConfigError(
                            "remove needs --id, or --category, --sub and --index".to_string(),
                        ))
                    }
                };
                self.handle_remove(&target)
            }
            Commands::Edit {
                category,
                sub,
                id,
                url,
                title,
                added_at,
                new_title,
                new_url,
            } => {
                let target = match (id, category, sub, url, title, added_at) {
                    (Some(id), _, _, _, _, _) => EditTarget::Id(id.clone()),
                    (None, Some(category), Some(sub), Some(url), Some(title), Some(added_at)) => {
                        EditTarget::Key {
                            category_id: category.clone(),
                            sub_category_id: sub.clone(),
                            key: EntryKey {
                                url: url.clone(),
                                title: title.clone(),
                                added_at: added_at.clone(),
                            },
                        }
                    }
                    _ => {
                        return Err(ShelfError::ConfigError(
                            "edit needs --id, or --category, --sub, --url, --title and --added-at"
                                .to_string(),
                        ))
                    }
                };
                let patch = EntryPatch {
                    title: new_title.clone(),
                    url: new_url.clone(),
                };
                self.handle_edit(&target, &patch)
            }
            Commands::List {
                category,
                sub,
                search,
                format,
            } => {
                let selection = ViewSelection {
                    category: category.clone(),
                    sub_category: sub.clone(),
                    search: search.clone(),
                };
                self.handle_list(&selection, format)
            }
            Commands::Export { output } => self.handle_export(output.as_deref()),
            Commands::Import { path } => self.handle_import(path),
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                ShelfError::ConfigError(format!("Failed to render configuration: {}", e))
            }),
        }
    }

    fn handle_category_command(&self, command: &CategoryCommands) -> Result<String, ShelfError> {
        match command {
            CategoryCommands::List { format } => {
                let shelf = self.shelf.lock();
                let result = ShelfCommandService::list_categories(&shelf);
                if format == "json" {
                    return to_json(&result.categories);
                }
                Ok(format_category_table(&result, self.palette()))
            }
            CategoryCommands::Add {
                name,
                id,
                icon,
                sub,
                no_defaults,
            } => {
                let draft = CategoryDraft {
                    id: id.clone(),
                    name: name.clone(),
                    icon: icon.clone(),
                    sub_categories: sub
                        .iter()
                        .map(|name| SubCategoryDraft {
                            name: name.clone(),
                            icon: None,
                        })
                        .collect(),
                    use_defaults: !no_defaults,
                };
                let mut shelf = self.shelf.lock();
                let result = ShelfCommandService::add_category(&mut shelf, &draft)?;
                let subs: Vec<&str> = result
                    .category
                    .resource_types
                    .iter()
                    .map(|s| s.id.as_str())
                    .collect();
                Ok(format!(
                    "{}\nSub-categories: {}",
                    self.palette().success(&format!(
                        "Added category: {} ({})",
                        result.category.id, result.category.name
                    )),
                    subs.join(", ")
                ))
            }
            CategoryCommands::Remove { id, yes } => self.handle_category_remove(id, *yes),
        }
    }

    fn handle_category_remove(&self, category_id: &str, yes: bool) -> Result<String, ShelfError> {
        let mut shelf = self.shelf.lock();
        if shelf.registry().is_builtin(category_id) {
            return Err(ShelfError::BuiltinCategory(category_id.to_string()));
        }
        if !yes {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Remove category '{}' and all of its resources?",
                    category_id
                ))
                .interact()
                .map_err(|e| ShelfError::ConfigError(format!("Failed to get user input: {}", e)))?;

            if !confirmed {
                return Ok("Removal cancelled".to_string());
            }
        }

        let result = ShelfCommandService::remove_category(&mut shelf, category_id)?;
        if !result.existed {
            return Ok(format!("No custom category with id: {}", result.category_id));
        }
        Ok(self.palette().success(&format!(
            "Removed category: {} ({} resource(s) deleted)",
            result.category_id, result.removed_resources
        )))
    }

    fn handle_add(
        &self,
        category: &str,
        sub: &str,
        url: &str,
        title: Option<&str>,
    ) -> Result<String, ShelfError> {
        let draft = ResourceDraft {
            category_id: Some(category.to_string()),
            sub_category_id: Some(sub.to_string()),
            url: url.to_string(),
            title: title.unwrap_or_default().to_string(),
        };
        let mut shelf = self.shelf.lock();
        let result = ShelfCommandService::add_resource(&mut shelf, &draft, Utc::now())?;
        let mut out = self.palette().success(&format!(
            "Added resource: {} to {}/{}",
            result.entry.title, result.category_id, result.sub_category_id
        ));
        if result.title_suggested {
            out.push_str("\n(title derived from the URL)");
        }
        out.push_str(&format!("\nId: {}", result.entry.id));
        Ok(out)
    }

    fn handle_remove(&self, target: &RemoveTarget) -> Result<String, ShelfError> {
        let mut shelf = self.shelf.lock();
        let result = ShelfCommandService::remove_resource(&mut shelf, target)?;
        if result.changed {
            Ok(self.palette().success("Removed resource"))
        } else {
            Ok("No matching resource; nothing changed".to_string())
        }
    }

    fn handle_edit(&self, target: &EditTarget, patch: &EntryPatch) -> Result<String, ShelfError> {
        if patch.is_empty() {
            return Ok("Nothing to change; pass --new-title or --new-url".to_string());
        }
        let mut shelf = self.shelf.lock();
        let result = ShelfCommandService::edit_resource(&mut shelf, target, patch)?;
        if result.changed {
            Ok(self.palette().success("Updated resource"))
        } else {
            Ok("No matching resource; nothing changed".to_string())
        }
    }

    fn handle_list(&self, selection: &ViewSelection, format: &str) -> Result<String, ShelfError> {
        let shelf = self.shelf.lock();
        let result = ShelfCommandService::list_resources(&shelf, selection);
        if format == "json" {
            return to_json(&result.rows);
        }
        Ok(format_resource_table(
            &result.rows,
            shelf.registry(),
            self.palette(),
        ))
    }

    fn handle_export(&self, output: Option<&Path>) -> Result<String, ShelfError> {
        let shelf = self.shelf.lock();
        let result = ShelfCommandService::export(&shelf, output, Utc::now())?;
        Ok(format_export_summary(&result, self.palette()))
    }

    fn handle_import(&self, path: &Path) -> Result<String, ShelfError> {
        let mut shelf = self.shelf.lock();
        let report = ShelfCommandService::import(&mut shelf, path)?;
        Ok(format_import_report(&report, self.palette()))
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ShelfError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ShelfError::ConfigError(format!("Failed to render JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_remove_requires_a_target() {
        assert!(Cli::try_parse_from(["devshelf", "remove"]).is_err());
        assert!(Cli::try_parse_from(["devshelf", "remove", "--category", "frontend"]).is_err());
        assert!(Cli::try_parse_from([
            "devshelf", "remove", "--category", "frontend", "--sub", "tools", "--index", "0"
        ])
        .is_ok());
        assert!(Cli::try_parse_from(["devshelf", "remove", "--id", "abc"]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["devshelf", "list", "--data-dir", "/tmp/shelf", "--log-level", "debug"])
                .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/shelf")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_category_add_collects_repeated_subs() {
        let cli = Cli::try_parse_from([
            "devshelf", "category", "add", "--name", "Design", "--sub", "Fonts", "--sub", "Color Tools",
        ])
        .unwrap();
        match cli.command {
            Commands::Category {
                command: CategoryCommands::Add { sub, no_defaults, .. },
            } => {
                assert_eq!(sub, vec!["Fonts".to_string(), "Color Tools".to_string()]);
                assert!(!no_defaults);
            }
            _ => panic!("parsed into the wrong command"),
        }
    }
}
