//! Format command results as text.

use crate::category::CategoryRegistry;
use crate::commands::{CategoryListResult, ExportResult};
use crate::transfer::ImportReport;
use crate::views::{display_domain, format_added_at, ResourceView};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Whether headings and notices carry ANSI styling.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    pub fn heading(&self, title: &str) -> String {
        if self.color {
            format!("{}", title.bold().underline())
        } else {
            title.to_string()
        }
    }

    pub fn success(&self, message: &str) -> String {
        if self.color {
            format!("{}", message.green())
        } else {
            message.to_string()
        }
    }

    pub fn warning(&self, message: &str) -> String {
        if self.color {
            format!("{}", message.yellow())
        } else {
            message.to_string()
        }
    }
}

pub fn format_category_table(result: &CategoryListResult, palette: Palette) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Name", "Icon", "Kind", "Sub-categories", "Resources"]);
    for item in &result.categories {
        table.add_row(vec![
            item.id.clone(),
            item.name.clone(),
            item.icon.clone(),
            if item.builtin { "built-in" } else { "custom" }.to_string(),
            item.sub_categories.join(", "),
            item.resource_count.to_string(),
        ]);
    }
    format!("{}\n\n{}", palette.heading("Categories"), table)
}

/// Resource rows with category and sub-category display names.
pub fn format_resource_table(
    rows: &[ResourceView],
    registry: &CategoryRegistry,
    palette: Palette,
) -> String {
    if rows.is_empty() {
        return "No resources found".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "Category", "Sub-category", "#", "Title", "Domain", "Added", "Id",
    ]);
    for row in rows {
        let category_name = registry
            .find(&row.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| row.category_id.clone());
        table.add_row(vec![
            category_name,
            registry.sub_category_name(&row.sub_category_id),
            row.index.to_string(),
            row.entry.title.clone(),
            display_domain(&row.entry.url),
            format_added_at(&row.entry.added_at),
            short_id(&row.entry.id).to_string(),
        ]);
    }
    format!(
        "{}\n\n{}\n{} resource(s)",
        palette.heading("Resources"),
        table,
        rows.len()
    )
}

/// First block of a UUID; enough to tell rows apart on screen.
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

pub fn format_export_summary(result: &ExportResult, palette: Palette) -> String {
    palette.success(&format!(
        "Exported {} resource(s) and {} categories to {}",
        result.resource_count,
        result.category_count,
        result.path.display()
    ))
}

pub fn format_import_report(report: &ImportReport, palette: Palette) -> String {
    let mut out = String::new();
    if let Some(warning) = &report.version_warning {
        out.push_str(&palette.warning(&format!("Warning: {}", warning)));
        out.push('\n');
    }
    out.push_str(&palette.success("Import complete"));
    out.push('\n');
    out.push_str(&format!(
        "  Resource categories merged: {}\n",
        list_or_dash(&report.merged_categories)
    ));
    out.push_str(&format!(
        "  Custom categories added: {}\n",
        list_or_dash(&report.added_custom)
    ));
    out.push_str(&format!(
        "  Categories already present: {}",
        list_or_dash(&report.skipped_custom)
    ));
    out
}

fn list_or_dash(ids: &[String]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.join(", ")
    }
}
