// analyzeコマンドハンドラー
//
// 弱い関連の解析機能を実装します。
// - 解析設定の解決（--config、カレントディレクトリの設定ファイル、既定値）
// - スキーマ定義ファイルの読み込み
// - 弱い関連の解析
// - テキスト/JSON形式での結果表示

use crate::cli::commands::{render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::config::AnalyzerConfig;
use crate::core::weak_association::WeakAssociations;
use crate::services::schema_parser::SchemaParserService;
use crate::services::weak_associations_analyzer::WeakAssociationsAnalyzer;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// analyzeコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeOutput {
    /// 解析したテーブル数
    pub tables: usize,
    /// 見つかった弱い関連外部キー
    pub weak_associations: WeakAssociations,
}

impl CommandOutput for AnalyzeOutput {
    fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Weak Associations ===".bold()));

        for weak_fk in &self.weak_associations {
            output.push_str(&format!("{}\n", weak_fk.name.cyan()));
            for association in &weak_fk.associations {
                output.push_str(&format!("  {}\n", association));
            }
        }

        if !self.weak_associations.is_empty() {
            output.push('\n');
        }

        let pair_count = self.weak_associations.associations().count();
        let summary = format!(
            "{} weak association(s) ({} column pair(s)) found in {} table(s).",
            self.weak_associations.len(),
            pair_count,
            self.tables
        );
        if self.weak_associations.is_empty() {
            output.push_str(&format!("{} {}", "✓".green(), summary));
        } else {
            output.push_str(&format!("{} {}", "!".yellow(), summary));
        }

        output
    }
}

/// analyzeコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct AnalyzeCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// スキーマファイルまたはディレクトリ
    pub schema_path: PathBuf,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// analyzeコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct AnalyzeCommandHandler {}

impl AnalyzeCommandHandler {
    /// 新しいAnalyzeCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// analyzeコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - analyzeコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 成功時は指定フォーマットの解析結果
    pub fn execute(&self, command: &AnalyzeCommand) -> Result<String> {
        let config = self.load_config(command)?;
        debug!(?config, "Resolved analyzer config");

        let schema_path = if command.schema_path.is_absolute() {
            command.schema_path.clone()
        } else {
            command.project_path.join(&command.schema_path)
        };

        let parser = SchemaParserService::new();
        let mut schema = parser
            .parse_schema_path(&schema_path)
            .with_context(|| "Failed to parse schema")?;

        let analyzer = WeakAssociationsAnalyzer::new(config);
        let weak_associations = analyzer
            .analyze(&mut schema)
            .with_context(|| "Failed to analyze weak associations")?;

        let output = AnalyzeOutput {
            tables: schema.table_count(),
            weak_associations,
        };

        render_output(&output, command.format)
    }

    /// 解析設定を解決
    ///
    /// `--config` が指定された場合はそのファイルを必須とし、
    /// 指定がなければプロジェクトルートの設定ファイルを任意で読み込みます。
    fn load_config(&self, command: &AnalyzeCommand) -> Result<AnalyzerConfig> {
        if let Some(config_path) = &command.config_path {
            return AnalyzerConfig::from_file(config_path)
                .with_context(|| "Failed to read config file");
        }

        let default_path = command
            .project_path
            .join(AnalyzerConfig::DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return AnalyzerConfig::from_file(&default_path)
                .with_context(|| "Failed to read config file");
        }

        Ok(AnalyzerConfig::default())
    }
}
