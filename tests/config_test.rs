// tests/config_test.rs
use autotag::config::{load_config, Config, CONFIG_FILE};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let workspace = TempDir::new().unwrap();
    let config = load_config(None, workspace.path()).expect("Should load default config");
    assert_eq!(config, Config::default());
    assert_eq!(config.root(), "./");
    assert!(!config.dry_run());
}

#[test]
fn test_load_from_file() {
    let workspace = TempDir::new().unwrap();
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
root = "charts/app/Chart.yaml"
regex_pattern = "^version: (?P<version>.+)$"
tag_prefix = "chart-"
commit_message_template = "- {{message}} ({{sha}})"
dry_run = true
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    // Absolute paths are used as-is
    let config = load_config(Some(temp_file.path().to_str().unwrap()), workspace.path()).unwrap();
    assert_eq!(config.root(), "charts/app/Chart.yaml");
    assert_eq!(config.tag_prefix(), "chart-");
    assert_eq!(
        config.commit_message_template.as_deref(),
        Some("- {{message}} ({{sha}})")
    );
    assert!(config.dry_run());
}

#[test]
fn test_workspace_config_file_is_picked_up() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join(CONFIG_FILE),
        "strategy = \"docker\"\ntag_suffix = \"-img\"\n",
    )
    .unwrap();

    let config = load_config(None, workspace.path()).unwrap();
    assert_eq!(config.strategy.as_deref(), Some("docker"));
    assert_eq!(config.tag_suffix(), "-img");
}

#[test]
fn test_relative_config_path_resolves_against_workspace() {
    let workspace = TempDir::new().unwrap();
    fs::create_dir(workspace.path().join(".github")).unwrap();
    fs::write(
        workspace.path().join(".github/autotag.toml"),
        "tag_prefix = \"v\"\n",
    )
    .unwrap();

    let config = load_config(Some(".github/autotag.toml"), workspace.path()).unwrap();
    assert_eq!(config.tag_prefix(), "v");
}

#[test]
fn test_invalid_file_is_an_error() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join(CONFIG_FILE), "tag_prefix = [").unwrap();
    assert!(load_config(None, workspace.path()).is_err());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let workspace = TempDir::new().unwrap();
    assert!(load_config(Some("absent.toml"), workspace.path()).is_err());
}

#[test]
fn test_command_line_layer_wins() {
    let file = Config {
        tag_prefix: Some("release-".to_string()),
        package_root: Some("web".to_string()),
        ..Config::default()
    };
    let cli = Config {
        tag_prefix: Some("v".to_string()),
        root: Some(String::new()),
        ..Config::default()
    };

    let merged = file.merge(cli);
    assert_eq!(merged.tag_prefix(), "v");
    assert_eq!(merged.root(), "web");
}

#[test]
fn test_command_line_can_disable_dry_run_from_file() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join(CONFIG_FILE), "dry_run = true\n").unwrap();

    let file = load_config(None, workspace.path()).unwrap();
    assert!(file.dry_run());

    let cli = Config {
        dry_run: Some(false),
        ..Config::default()
    };
    assert!(!file.merge(cli).dry_run());
}
