// analyzeコマンドハンドラーのテスト

use anyhow::Result;
use schema_assoc::cli::commands::analyze::{AnalyzeCommand, AnalyzeCommandHandler};
use schema_assoc::cli::OutputFormat;
use schema_assoc::core::config::AnalyzerConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const LIBRARY_YAML: &str = r#"
version: "1.0"
tables:
  AUTHORS:
    name: AUTHORS
    columns:
      - name: ID
        type:
          kind: INTEGER
        nullable: false
    constraints:
      - type: PRIMARY_KEY
        columns:
          - ID
  BOOKS:
    name: BOOKS
    columns:
      - name: ID
        type:
          kind: INTEGER
        nullable: false
      - name: AUTHORID
        type:
          kind: INTEGER
        nullable: true
    constraints:
      - type: PRIMARY_KEY
        columns:
          - ID
"#;

/// テスト用のプロジェクトディレクトリを作成
fn setup_test_project() -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let project_path = temp_dir.path().to_path_buf();

    fs::create_dir_all(project_path.join("schema"))?;
    fs::write(project_path.join("schema").join("library.yaml"), LIBRARY_YAML)?;

    Ok((temp_dir, project_path))
}

fn command(project_path: PathBuf, format: OutputFormat) -> AnalyzeCommand {
    AnalyzeCommand {
        project_path,
        config_path: None,
        schema_path: PathBuf::from("schema"),
        format,
    }
}

#[test]
fn test_text_output() -> Result<()> {
    colored::control::set_override(false);
    let (_temp_dir, project_path) = setup_test_project()?;

    let output = AnalyzeCommandHandler::new().execute(&command(project_path, OutputFormat::Text))?;

    assert!(output.contains("fk_BOOKS_AUTHORID_AUTHORS"));
    assert!(output.contains("AUTHORS.ID <- BOOKS.AUTHORID"));
    assert!(output.contains("found in 2 table(s)"));
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;

    let output = AnalyzeCommandHandler::new().execute(&command(project_path, OutputFormat::Json))?;
    let value: serde_json::Value = serde_json::from_str(&output)?;

    assert_eq!(value["tables"], 2);
    let weak_associations = value["weak_associations"].as_array().unwrap();
    assert_eq!(weak_associations.len(), 1);
    assert_eq!(
        weak_associations[0]["associations"][0]["primary_key_column"]["table"],
        "AUTHORS"
    );
    Ok(())
}

#[test]
fn test_project_config_is_applied() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    let yaml = LIBRARY_YAML.replace(
        "      - name: AUTHORID\n        type:\n          kind: INTEGER",
        "      - name: AUTHORID\n        type:\n          kind: TEXT",
    );
    fs::write(project_path.join("schema").join("library.yaml"), yaml)?;

    // 型検証ありでは一致しない
    let output = AnalyzeCommandHandler::new()
        .execute(&command(project_path.clone(), OutputFormat::Json))?;
    let value: serde_json::Value = serde_json::from_str(&output)?;
    assert!(value["weak_associations"].as_array().unwrap().is_empty());

    let config = AnalyzerConfig {
        check_column_types: false,
        ..Default::default()
    };
    fs::write(
        project_path.join(AnalyzerConfig::DEFAULT_CONFIG_PATH),
        serde_saphyr::to_string(&config)?,
    )?;

    let output = AnalyzeCommandHandler::new().execute(&command(project_path, OutputFormat::Json))?;
    let value: serde_json::Value = serde_json::from_str(&output)?;
    assert_eq!(value["weak_associations"].as_array().unwrap().len(), 1);
    Ok(())
}

#[test]
fn test_explicit_config_must_exist() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    let mut command = command(project_path.clone(), OutputFormat::Text);
    command.config_path = Some(project_path.join("missing.yaml"));

    let error = AnalyzeCommandHandler::new().execute(&command).unwrap_err();
    assert!(format!("{:#}", error).contains("Failed to read config file"));
    Ok(())
}

#[test]
fn test_missing_schema_path() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    let mut command = command(project_path, OutputFormat::Text);
    command.schema_path = PathBuf::from("no_such_dir");

    let error = AnalyzeCommandHandler::new().execute(&command).unwrap_err();
    assert!(format!("{:#}", error).contains("File not found"));
    Ok(())
}

#[test]
fn test_incomplete_schema_is_an_error() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    let yaml = LIBRARY_YAML.replacen("          - ID\n", "          - AUTHOR_KEY\n", 1);
    fs::write(project_path.join("schema").join("library.yaml"), yaml)?;

    let error = AnalyzeCommandHandler::new()
        .execute(&command(project_path, OutputFormat::Text))
        .unwrap_err();
    assert!(format!("{:#}", error).contains("Unknown column"));
    Ok(())
}
