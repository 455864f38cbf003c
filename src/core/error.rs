// エラー型定義
//
// アプリケーション全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、AnalysisError と IoError を定義します。

use thiserror::Error;

/// 解析エラー
///
/// 弱い関連の解析を開始する前の事前条件検証で発生するエラーを表現します。
/// いずれもスキーマモデルが不完全であることを示し、解析処理は一切行われません。
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// Unknown column error
    #[error("Unknown column in {constraint}: {message}{}", format_location_opt(.location))]
    UnknownColumn {
        /// エラーメッセージ
        message: String,
        /// 参照元の制約またはインデックスの種類
        constraint: String,
        /// エラー発生位置
        location: Option<ErrorLocation>,
    },

    /// Unknown table error
    #[error("Unknown table '{referenced_table}' referenced by a foreign key{}", format_location_opt(.location))]
    UnknownTable {
        /// 参照先テーブル名
        referenced_table: String,
        /// エラー発生位置
        location: Option<ErrorLocation>,
    },

    /// Foreign key column count mismatch
    #[error("Foreign key column count mismatch: {columns} column(s) reference {referenced_columns} column(s){}", format_location_opt(.location))]
    ForeignKeyArity {
        /// 子側カラム数
        columns: usize,
        /// 参照先カラム数
        referenced_columns: usize,
        /// エラー発生位置
        location: Option<ErrorLocation>,
    },
}

impl AnalysisError {
    /// 未知のカラムエラーかどうか
    pub fn is_unknown_column(&self) -> bool {
        matches!(self, AnalysisError::UnknownColumn { .. })
    }

    /// 未知のテーブルエラーかどうか
    pub fn is_unknown_table(&self) -> bool {
        matches!(self, AnalysisError::UnknownTable { .. })
    }

    /// 外部キーのカラム数不一致エラーかどうか
    pub fn is_foreign_key_arity(&self) -> bool {
        matches!(self, AnalysisError::ForeignKeyArity { .. })
    }

    /// エラー発生位置を取得
    pub fn location(&self) -> Option<&ErrorLocation> {
        match self {
            AnalysisError::UnknownColumn { location, .. }
            | AnalysisError::UnknownTable { location, .. }
            | AnalysisError::ForeignKeyArity { location, .. } => location.as_ref(),
        }
    }
}

/// エラー発生位置
///
/// スキーマ内のエラー発生位置を表現します。
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorLocation {
    /// テーブル名
    pub table: Option<String>,
    /// カラム名
    pub column: Option<String>,
}

impl ErrorLocation {
    /// 新しいエラー位置を作成
    pub fn new() -> Self {
        Self {
            table: None,
            column: None,
        }
    }

    /// テーブル名を指定してエラー位置を作成
    pub fn with_table(table: String) -> Self {
        Self {
            table: Some(table),
            column: None,
        }
    }

    /// テーブル名とカラム名を指定してエラー位置を作成
    pub fn with_column(table: String, column: String) -> Self {
        Self {
            table: Some(table),
            column: Some(column),
        }
    }

    /// 位置情報をフォーマット
    pub fn format(&self) -> String {
        let mut parts = Vec::new();

        if let Some(table) = &self.table {
            parts.push(format!("table: {}", table));
        }
        if let Some(column) = &self.column {
            parts.push(format!("column: {}", column));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!(" ({})", parts.join(", "))
        }
    }
}

impl Default for ErrorLocation {
    fn default() -> Self {
        Self::new()
    }
}

/// 位置情報をフォーマットするヘルパー関数
fn format_location_opt(location: &Option<ErrorLocation>) -> String {
    location.as_ref().map_or(String::new(), |loc| loc.format())
}

/// I/Oエラー
///
/// ファイル操作時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// ファイルパス
        path: String,
    },

    /// File read error
    #[error("Failed to read file: {path} (cause: {cause})")]
    FileRead {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },
}

impl IoError {
    /// ファイルが見つからないエラーかどうか
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, IoError::FileNotFound { .. })
    }

    /// ファイル読み込みエラーかどうか
    pub fn is_file_read(&self) -> bool {
        matches!(self, IoError::FileRead { .. })
    }
}
