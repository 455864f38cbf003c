// スキーマパーサーサービス
//
// YAMLスキーマファイルの読み込み、解析、マージ処理を行うサービス。
// ファイル単体またはディレクトリ全体のスキーマファイルを読み込み、
// テーブルを修飾名で索引した統合スキーマを生成します。

use crate::core::error::IoError;
use crate::core::schema::Schema;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// スキーマパーサーサービス
///
/// YAMLスキーマファイルの解析とマージを行います。
#[derive(Debug, Clone, Default)]
pub struct SchemaParserService {}

impl SchemaParserService {
    /// 新しいSchemaParserServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// パスの種類に応じてファイルまたはディレクトリを読み込む
    pub fn parse_schema_path(&self, path: &Path) -> Result<Schema> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        if path.is_dir() {
            self.parse_schema_directory(path)
        } else {
            self.parse_schema_file(path)
        }
    }

    /// 指定されたディレクトリからすべてのYAMLファイルを読み込み、統合されたスキーマを返す
    ///
    /// # Arguments
    ///
    /// * `schema_dir` - スキーマ定義ファイルが格納されたディレクトリ
    ///
    /// # Returns
    ///
    /// 統合されたスキーマオブジェクト（同じ修飾名のテーブルは後のファイルが優先）
    ///
    /// # Errors
    ///
    /// - ディレクトリが存在しない場合
    /// - YAMLファイルの解析に失敗した場合
    pub fn parse_schema_directory(&self, schema_dir: &Path) -> Result<Schema> {
        if !schema_dir.exists() {
            return Err(IoError::FileNotFound {
                path: schema_dir.display().to_string(),
            }
            .into());
        }

        if !schema_dir.is_dir() {
            return Err(anyhow!("Not a directory: {}", schema_dir.display()));
        }

        let yaml_files = self.scan_yaml_files(schema_dir)?;
        let mut merged_schema = Schema::new("1.0".to_string());

        for (i, file_path) in yaml_files.iter().enumerate() {
            let schema = self
                .parse_schema_file(file_path)
                .with_context(|| format!("Failed to parse schema file: {:?}", file_path))?;

            // 最初のファイルのバージョンを使用
            if i == 0 {
                merged_schema.version = schema.version;
            }

            for (_, table) in schema.tables {
                merged_schema.add_table(table);
            }
        }

        debug!(
            files = yaml_files.len(),
            tables = merged_schema.table_count(),
            "Merged schema directory"
        );

        Ok(merged_schema)
    }

    /// 単一のYAMLファイルを解析してスキーマオブジェクトに変換
    ///
    /// YAMLのマップキーに関わらず、テーブルは修飾名（`schema.name`）で索引し直されます。
    ///
    /// # Errors
    ///
    /// - ファイルが存在しない場合
    /// - ファイルの読み込みに失敗した場合
    /// - YAMLの解析に失敗した場合
    pub fn parse_schema_file(&self, file_path: &Path) -> Result<Schema> {
        if !file_path.exists() {
            return Err(IoError::FileNotFound {
                path: file_path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(file_path).map_err(|e| IoError::FileRead {
            path: file_path.display().to_string(),
            cause: e.to_string(),
        })?;

        let parsed: Schema = serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse YAML: {:?}", file_path))?;

        let mut schema = Schema::new(parsed.version);
        for (_, table) in parsed.tables {
            schema.add_table(table);
        }

        Ok(schema)
    }

    /// ディレクトリ内のYAMLファイルをスキャン
    ///
    /// .yaml と .yml 拡張子を持つファイルのみを、パス順に収集します。
    fn scan_yaml_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut yaml_files = Vec::new();

        let entries = fs::read_dir(dir).map_err(|e| IoError::FileRead {
            path: dir.display().to_string(),
            cause: e.to_string(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| IoError::FileRead {
                path: dir.display().to_string(),
                cause: e.to_string(),
            })?;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            if let Some(extension) = path.extension() {
                if extension == "yaml" || extension == "yml" {
                    yaml_files.push(path);
                }
            }
        }

        yaml_files.sort();

        Ok(yaml_files)
    }
}
