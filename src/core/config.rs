// 設定ファイル管理
//
// 弱い関連解析の設定ファイル（YAML形式）の読み込みと検証を行います。

use crate::core::error::IoError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// 共通プレフィックスとして扱う数の上限
const MAX_TABLE_PREFIXES_LIMIT: usize = 32;

/// 解析設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// 単一カラムのユニークキーを親側候補に含めるかどうか
    #[serde(default = "default_true")]
    pub use_unique_keys: bool,

    /// カラム型の互換性を検証するかどうか
    #[serde(default = "default_true")]
    pub check_column_types: bool,

    /// 同一テーブル内の関連（自己参照）を許可するかどうか
    #[serde(default = "default_true")]
    pub allow_self_associations: bool,

    /// テーブル名の共通プレフィックスとして考慮する最大数
    #[serde(default = "default_max_table_prefixes")]
    pub max_table_prefixes: usize,
}

fn default_true() -> bool {
    true
}

fn default_max_table_prefixes() -> usize {
    5
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            use_unique_keys: true,
            check_column_types: true,
            allow_self_associations: true,
            max_table_prefixes: default_max_table_prefixes(),
        }
    }
}

impl AnalyzerConfig {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = crate::core::naming::CONFIG_FILE;

    /// 設定ファイルを読み込む
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).map_err(|e| IoError::FileRead {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;

        let config: Self = content
            .parse()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.validate()?;

        Ok(config)
    }

    /// 設定の妥当性を検証
    pub fn validate(&self) -> Result<()> {
        if self.max_table_prefixes > MAX_TABLE_PREFIXES_LIMIT {
            return Err(anyhow!(
                "max_table_prefixes must be at most {} (got {})",
                MAX_TABLE_PREFIXES_LIMIT,
                self.max_table_prefixes
            ));
        }

        Ok(())
    }
}

/// std::str::FromStrトレイトの実装
impl FromStr for AnalyzerConfig {
    type Err = anyhow::Error;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        serde_saphyr::from_str(yaml).with_context(|| "Failed to parse config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert!(config.use_unique_keys);
        assert!(config.check_column_types);
        assert!(config.allow_self_associations);
        assert_eq!(config.max_table_prefixes, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AnalyzerConfig = "allow_self_associations: false\n".parse().unwrap();
        assert!(!config.allow_self_associations);
        assert!(config.use_unique_keys);
        assert_eq!(config.max_table_prefixes, 5);
    }

    #[test]
    fn test_validate_rejects_excessive_prefixes() {
        let config = AnalyzerConfig {
            max_table_prefixes: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
