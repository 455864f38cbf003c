// カラムマッチキー索引
//
// 全テーブルの全カラムについてマッチキーを導出し、
// キーからカラム集合への多値マップを構築します。

use crate::core::schema::{ColumnRef, Schema};
use crate::services::match_key::MatchKeyDeriver;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// カラムマッチキー索引
///
/// 解析1回につき1度だけ構築され、以降は読み取り専用で参照されます。
#[derive(Debug, Clone, Default)]
pub struct ColumnMatchIndex {
    /// マッチキー -> そのキーを持つカラム
    columns_by_key: HashMap<String, BTreeSet<ColumnRef>>,

    /// カラム -> そのカラムから導出されたマッチキー
    keys_by_column: HashMap<ColumnRef, BTreeSet<String>>,
}

impl ColumnMatchIndex {
    /// スキーマ全体から索引を構築
    pub fn build(schema: &Schema, deriver: &MatchKeyDeriver) -> Self {
        let mut index = Self::default();

        for (table_name, table) in &schema.tables {
            for column in &table.columns {
                let column_ref = ColumnRef::new(table_name.clone(), column.name.clone());
                for key in deriver.column_keys(&column.name) {
                    index.insert(key, column_ref.clone());
                }
            }
        }

        index
    }

    /// キーとカラムの対応を追加
    fn insert(&mut self, key: String, column: ColumnRef) {
        self.keys_by_column
            .entry(column.clone())
            .or_default()
            .insert(key.clone());
        self.columns_by_key.entry(key).or_default().insert(column);
    }

    /// 指定されたキーを持つカラムを取得（存在しない場合は空集合）
    pub fn columns_matching(&self, key: &str) -> BTreeSet<ColumnRef> {
        self.columns_by_key.get(key).cloned().unwrap_or_default()
    }

    /// 指定されたカラムのマッチキーを取得（存在しない場合は空集合）
    pub fn keys_for(&self, column: &ColumnRef) -> BTreeSet<String> {
        self.keys_by_column.get(column).cloned().unwrap_or_default()
    }
}

impl fmt::Display for ColumnMatchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.columns_by_key.keys().collect();
        keys.sort();

        let entries: Vec<String> = keys
            .into_iter()
            .map(|key| {
                let columns: Vec<String> = self.columns_by_key[key]
                    .iter()
                    .map(|c| c.to_string())
                    .collect();
                format!("{}=[{}]", key, columns.join(", "))
            })
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}
