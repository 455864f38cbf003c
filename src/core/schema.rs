// スキーマドメインモデル
//
// 弱い関連（weak association）の解析対象となるスキーマを表現する型システム。
// Schema, Table, Column, Index, Constraint と、カラムの同一性を表す ColumnRef を提供します。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// スキーマ定義
///
/// データベース全体のスキーマを表現します。
/// テーブルは修飾名（`schema.table`）をキーとして保持され、キー順に列挙されます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// スキーマのバージョン
    pub version: String,

    /// テーブル定義のマップ（修飾テーブル名 -> Table）
    #[serde(default)]
    pub tables: BTreeMap<String, Table>,
}

impl Schema {
    /// 新しいスキーマを作成
    pub fn new(version: String) -> Self {
        Self {
            version,
            tables: BTreeMap::new(),
        }
    }

    /// テーブルを追加
    ///
    /// テーブルは修飾名で登録されます。同名のテーブルは置き換えられます。
    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.full_name(), table);
    }

    /// 指定されたテーブルが存在するか確認
    pub fn has_table(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    /// 指定されたテーブルを取得
    pub fn get_table(&self, table_name: &str) -> Option<&Table> {
        self.tables.get(table_name)
    }

    /// テーブル数を取得
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// 外部キーの参照先テーブル名を修飾名に解決
    ///
    /// 完全一致を優先し、見つからない場合は参照元と同じ名前空間内のテーブル名で検索します。
    pub fn resolve_table_name(&self, referencing: &Table, referenced: &str) -> Option<String> {
        if self.tables.contains_key(referenced) {
            return Some(referenced.to_string());
        }

        self.tables
            .values()
            .find(|t| t.schema == referencing.schema && t.name == referenced)
            .map(|t| t.full_name())
    }
}

/// テーブル定義
///
/// 単一のテーブルの構造を表現します。
/// カラム、インデックス、制約の定義と、解析で付与された弱い関連名を保持します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// 名前空間（データベーススキーマ名）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// テーブル名
    pub name: String,

    /// カラム定義のリスト
    pub columns: Vec<Column>,

    /// インデックス定義のリスト
    #[serde(default)]
    pub indexes: Vec<Index>,

    /// 制約定義のリスト
    #[serde(default)]
    pub constraints: Vec<Constraint>,

    /// 解析で付与された弱い関連の名前
    ///
    /// 関連そのものは解析結果（`WeakAssociations`）が所有し、
    /// テーブルは名前による参照のみを保持します。
    #[serde(skip)]
    pub weak_associations: BTreeSet<String>,
}

impl Table {
    /// 新しいテーブルを作成
    pub fn new(name: String) -> Self {
        Self {
            schema: None,
            name,
            columns: Vec::new(),
            indexes: Vec::new(),
            constraints: Vec::new(),
            weak_associations: BTreeSet::new(),
        }
    }

    /// 名前空間付きのテーブルを作成
    pub fn with_schema(schema: String, name: String) -> Self {
        Self {
            schema: Some(schema),
            ..Self::new(name)
        }
    }

    /// 修飾名（`schema.table` または `table`）
    pub fn full_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// カラムを追加
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// インデックスを追加
    pub fn add_index(&mut self, index: Index) {
        self.indexes.push(index);
    }

    /// 制約を追加
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// プライマリキーのカラム名を取得
    pub fn get_primary_key_columns(&self) -> Option<Vec<String>> {
        for constraint in &self.constraints {
            if let Constraint::PRIMARY_KEY { columns } = constraint {
                return Some(columns.clone());
            }
        }
        None
    }

    /// 指定されたカラムがプライマリキーの一部かどうか
    pub fn is_part_of_primary_key(&self, column_name: &str) -> bool {
        self.constraints.iter().any(|c| match c {
            Constraint::PRIMARY_KEY { columns } => columns.iter().any(|name| name == column_name),
            _ => false,
        })
    }

    /// 単一カラムのユニークキーを宣言順に列挙
    pub fn single_column_unique_keys(&self) -> impl Iterator<Item = &str> {
        let from_indexes = self
            .indexes
            .iter()
            .filter(|index| index.unique && index.columns.len() == 1)
            .map(|index| index.columns[0].as_str());
        let from_constraints = self.constraints.iter().filter_map(|c| match c {
            Constraint::UNIQUE { columns } if columns.len() == 1 => Some(columns[0].as_str()),
            _ => None,
        });
        from_indexes.chain(from_constraints)
    }

    /// 指定されたカラムを取得
    pub fn get_column(&self, column_name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == column_name)
    }

    /// このテーブルのカラム参照を作成
    pub fn column_ref(&self, column_name: &str) -> ColumnRef {
        ColumnRef::new(self.full_name(), column_name.to_string())
    }
}

/// カラム参照
///
/// 修飾テーブル名とカラム名の組でカラムを一意に識別します。
/// 所有テーブルへの逆参照の役割も兼ねます。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    /// 所有テーブルの修飾名
    pub table: String,

    /// カラム名
    pub column: String,
}

impl ColumnRef {
    /// 新しいカラム参照を作成
    pub fn new(table: String, column: String) -> Self {
        Self { table, column }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// カラム定義
///
/// テーブル内の単一カラムの構造を表現します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// カラム名
    pub name: String,

    /// カラム型
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// NULL許可フラグ
    #[serde(default)]
    pub nullable: bool,

    /// デフォルト値
    #[serde(default)]
    pub default_value: Option<String>,

    /// 自動増分フラグ
    #[serde(default)]
    pub auto_increment: Option<bool>,
}

impl Column {
    /// 新しいカラムを作成
    pub fn new(name: String, column_type: ColumnType, nullable: bool) -> Self {
        Self {
            name,
            column_type,
            nullable,
            default_value: None,
            auto_increment: None,
        }
    }
}

/// カラム型
///
/// サポートされるデータ型を表現します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ColumnType {
    /// 整数型
    INTEGER {
        /// 精度（バイト数）
        #[serde(default)]
        precision: Option<u32>,
    },

    /// 可変長文字列型
    VARCHAR {
        /// 最大長
        length: u32,
    },

    /// テキスト型（長文）
    TEXT,

    /// 真偽値型
    BOOLEAN,

    /// タイムスタンプ型
    TIMESTAMP {
        /// タイムゾーン付きかどうか
        #[serde(default)]
        with_time_zone: Option<bool>,
    },

    /// JSON型
    JSON,

    /// 固定小数点数型
    DECIMAL {
        /// 全体の桁数
        precision: u32,
        /// 小数点以下の桁数
        scale: u32,
    },

    /// 単精度浮動小数点型
    FLOAT,

    /// 倍精度浮動小数点型
    DOUBLE,

    /// 固定長文字列型
    CHAR {
        /// 固定長
        length: u32,
    },

    /// 日付型
    DATE,

    /// 時刻型
    TIME {
        /// タイムゾーン付きかどうか
        #[serde(default)]
        with_time_zone: Option<bool>,
    },

    /// バイナリラージオブジェクト型
    BLOB,

    /// UUID型
    UUID,

    /// バイナリJSON型
    JSONB,

    /// ENUM参照型
    #[serde(rename = "ENUM")]
    Enum {
        /// 参照するENUM型名
        name: String,
    },

    /// 方言固有型
    ///
    /// データベース方言固有の型名をそのまま保持します。
    #[serde(untagged)]
    DialectSpecific {
        /// 型名（例: "SERIAL", "TINYINT"）
        kind: String,
        /// 型パラメータ（任意）
        #[serde(flatten)]
        params: serde_json::Value,
    },
}

/// インデックス定義
///
/// テーブルのインデックスを表現します。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// インデックス名
    pub name: String,

    /// インデックス対象のカラム名リスト
    pub columns: Vec<String>,

    /// ユニークインデックスかどうか
    #[serde(default)]
    pub unique: bool,
}

impl Index {
    /// 新しいインデックスを作成
    pub fn new(name: String, columns: Vec<String>, unique: bool) -> Self {
        Self {
            name,
            columns,
            unique,
        }
    }
}

/// 制約定義
///
/// テーブルの制約（PRIMARY KEY, FOREIGN KEY, UNIQUE, CHECK）を表現します。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(non_camel_case_types)]
pub enum Constraint {
    /// プライマリキー制約
    PRIMARY_KEY {
        /// 対象カラム（キー内の位置順）
        columns: Vec<String>,
    },

    /// 外部キー制約
    FOREIGN_KEY {
        /// 対象カラム（子側）
        columns: Vec<String>,

        /// 参照先テーブル
        referenced_table: String,

        /// 参照先カラム（親側、`columns` と同じ順序で対応）
        referenced_columns: Vec<String>,
    },

    /// ユニーク制約
    UNIQUE {
        /// 対象カラム
        columns: Vec<String>,
    },

    /// チェック制約
    CHECK {
        /// 対象カラム
        columns: Vec<String>,

        /// チェック式
        check_expression: String,
    },
}

impl Constraint {
    /// 制約の種類を文字列で取得
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::PRIMARY_KEY { .. } => "PRIMARY_KEY",
            Constraint::FOREIGN_KEY { .. } => "FOREIGN_KEY",
            Constraint::UNIQUE { .. } => "UNIQUE",
            Constraint::CHECK { .. } => "CHECK",
        }
    }

    /// 制約が対象とするカラム（自テーブル側）
    pub fn columns(&self) -> &[String] {
        match self {
            Constraint::PRIMARY_KEY { columns }
            | Constraint::FOREIGN_KEY { columns, .. }
            | Constraint::UNIQUE { columns }
            | Constraint::CHECK { columns, .. } => columns,
        }
    }
}
