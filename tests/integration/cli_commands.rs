use clap::Parser;
use devshelf::config::ShelfConfig;
use devshelf::tooling::cli::{Cli, CliContext};
use devshelf::ShelfError;
use tempfile::TempDir;

fn context(temp: &TempDir) -> CliContext {
    let mut config = ShelfConfig::default();
    config.storage.data_dir = Some(temp.path().to_path_buf());
    config.display.color = false;
    CliContext::new(config).unwrap()
}

fn run(context: &CliContext, args: &[&str]) -> Result<String, ShelfError> {
    let mut argv = vec!["devshelf"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    context.execute(&cli.command)
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["devshelf", "category", "list"],
        vec!["devshelf", "category", "list", "--format", "json"],
        vec!["devshelf", "category", "add", "--name", "Design", "--no-defaults"],
        vec!["devshelf", "category", "remove", "design", "--yes"],
        vec!["devshelf", "add", "--category", "frontend", "--sub", "tools", "--url", "https://vitejs.dev"],
        vec!["devshelf", "edit", "--id", "abc", "--new-title", "Vite"],
        vec!["devshelf", "list", "--category", "frontend", "--sub", "tools"],
        vec!["devshelf", "list", "--search", "vite", "--format", "json"],
        vec!["devshelf", "export", "--output", "backup.json"],
        vec!["devshelf", "import", "backup.json"],
        vec!["devshelf", "config", "--config", "devshelf.toml"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_incomplete_targets() {
    assert!(Cli::try_parse_from(["devshelf", "list", "--sub", "tools"]).is_err());
    assert!(Cli::try_parse_from(["devshelf", "edit", "--new-title", "x"]).is_err());
    assert!(Cli::try_parse_from([
        "devshelf", "edit", "--added-at", "2024-01-01T00:00:00.000Z", "--new-title", "x"
    ])
    .is_err());
}

#[test]
fn add_list_edit_remove_flow() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp);

    let added = run(
        &ctx,
        &["add", "--category", "frontend", "--sub", "tools", "--url", "https://vitejs.dev/guide"],
    )
    .unwrap();
    assert!(added.contains("vitejs.dev - Guide"));
    assert!(added.contains("(title derived from the URL)"));

    let listed = run(&ctx, &["list", "--format", "json"]).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&listed).unwrap();
    let id = rows[0]["entry"]["id"].as_str().unwrap().to_string();
    assert_eq!(rows[0]["category_id"], "frontend");
    assert_eq!(rows[0]["index"], 0);

    let edited = run(&ctx, &["edit", "--id", &id, "--new-title", "Vite Guide"]).unwrap();
    assert_eq!(edited, "Updated resource");

    let text = run(&ctx, &["list", "--search", "guide"]).unwrap();
    assert!(text.contains("Vite Guide"));
    assert!(text.contains("1 resource(s)"));

    let removed = run(&ctx, &["remove", "--category", "frontend", "--sub", "tools", "--index", "0"]).unwrap();
    assert_eq!(removed, "Removed resource");
    let again = run(&ctx, &["remove", "--id", &id]).unwrap();
    assert_eq!(again, "No matching resource; nothing changed");
    assert_eq!(run(&ctx, &["list"]).unwrap(), "No resources found");
}

#[test]
fn invalid_url_is_a_validation_error() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp);
    let err = run(
        &ctx,
        &["add", "--category", "frontend", "--sub", "tools", "--url", "vitejs.dev", "--title", "Vite"],
    )
    .unwrap_err();
    assert!(matches!(err, ShelfError::Validation(_)));
    assert!(!temp.path().join("resourceData.json").exists());
}

#[test]
fn custom_category_lifecycle() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp);

    let added = run(
        &ctx,
        &["category", "add", "--id", "design", "--name", "Design", "--sub", "Color Tools"],
    )
    .unwrap();
    assert!(added.contains("Added category: design (Design)"));
    assert!(added.contains("color-tools"));

    let duplicate = run(&ctx, &["category", "add", "--id", "design", "--name", "Again"]).unwrap_err();
    assert!(matches!(duplicate, ShelfError::DuplicateId(_)));

    run(
        &ctx,
        &["add", "--category", "design", "--sub", "color-tools", "--url", "https://coolors.co", "--title", "Coolors"],
    )
    .unwrap();

    let categories = run(&ctx, &["category", "list", "--format", "json"]).unwrap();
    let categories: serde_json::Value = serde_json::from_str(&categories).unwrap();
    let design = categories
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == "design")
        .unwrap();
    assert_eq!(design["builtin"], false);
    assert_eq!(design["resource_count"], 1);

    let builtin = run(&ctx, &["category", "remove", "frontend", "--yes"]).unwrap_err();
    assert!(matches!(builtin, ShelfError::BuiltinCategory(_)));

    let removed = run(&ctx, &["category", "remove", "design", "--yes"]).unwrap();
    assert!(removed.contains("1 resource(s) deleted"));
    assert_eq!(run(&ctx, &["list"]).unwrap(), "No resources found");
}

#[test]
fn export_then_import_through_files() {
    let source_dir = tempfile::tempdir().unwrap();
    let source = context(&source_dir);
    run(
        &source,
        &["add", "--category", "backend", "--sub", "docs", "--url", "https://docs.rs", "--title", "docs.rs"],
    )
    .unwrap();

    let backup = source_dir.path().join("backup.json");
    let exported = run(&source, &["export", "--output", backup.to_str().unwrap()]).unwrap();
    assert!(exported.starts_with("Exported 1 resource(s)"));

    let target_dir = tempfile::tempdir().unwrap();
    let target = context(&target_dir);
    let imported = run(&target, &["import", backup.to_str().unwrap()]).unwrap();
    assert!(imported.contains("Resource categories merged: backend"));
    assert!(run(&target, &["list"]).unwrap().contains("docs.rs"));
}

#[test]
fn config_command_prints_toml() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(&temp);
    let rendered = run(&ctx, &["config"]).unwrap();
    assert!(rendered.contains("[storage]"));
    assert!(rendered.contains("data_dir"));
    assert!(rendered.contains("color = false"));
}
