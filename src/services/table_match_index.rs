// テーブルマッチキー索引
//
// テーブル自身の名前からマッチキーを導出します。
// `authors` テーブルの主キーに `author_id` のようなカラムを対応付けるために使用します。

use crate::core::schema::{Schema, Table};
use crate::services::match_key::MatchKeyDeriver;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// テーブルマッチキー索引
#[derive(Debug, Clone, Default)]
pub struct TableMatchIndex {
    /// 修飾テーブル名 -> マッチキー
    keys_by_table: HashMap<String, BTreeSet<String>>,

    /// 検出された共通プレフィックス（単語列）
    prefixes: Vec<Vec<String>>,
}

impl TableMatchIndex {
    /// スキーマ全体から索引を構築
    ///
    /// # Arguments
    ///
    /// * `schema` - 解析対象のスキーマ
    /// * `deriver` - マッチキー導出サービス
    /// * `max_prefixes` - 考慮する共通プレフィックスの最大数
    pub fn build(schema: &Schema, deriver: &MatchKeyDeriver, max_prefixes: usize) -> Self {
        let prefixes = find_table_name_prefixes(schema, deriver, max_prefixes);

        let keys_by_table = schema
            .tables
            .iter()
            .map(|(full_name, table)| (full_name.clone(), deriver.table_keys(&table.name, &prefixes)))
            .collect();

        Self {
            keys_by_table,
            prefixes,
        }
    }

    /// 指定されたテーブルのマッチキーを取得
    pub fn table_match_keys(&self, table: &Table) -> BTreeSet<String> {
        self.keys_by_table
            .get(&table.full_name())
            .cloned()
            .unwrap_or_default()
    }

    /// 検出された共通プレフィックス
    pub fn prefixes(&self) -> &[Vec<String>] {
        &self.prefixes
    }
}

impl fmt::Display for TableMatchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tables: Vec<&String> = self.keys_by_table.keys().collect();
        tables.sort();

        let entries: Vec<String> = tables
            .into_iter()
            .map(|table| {
                let keys: Vec<&str> = self.keys_by_table[table].iter().map(String::as_str).collect();
                format!("{}=[{}]", table, keys.join(", "))
            })
            .collect();
        write!(f, "{{{}}}", entries.join(", "))
    }
}

/// テーブル名の共通プレフィックスを検出
///
/// テーブル名の先頭単語列のうち、名前全体より短く、2つ以上のテーブルに
/// 共通するものを出現数の多い順（同数は辞書順）に最大 `max_prefixes` 個返します。
fn find_table_name_prefixes(
    schema: &Schema,
    deriver: &MatchKeyDeriver,
    max_prefixes: usize,
) -> Vec<Vec<String>> {
    let mut counts: HashMap<Vec<String>, usize> = HashMap::new();

    for table in schema.tables.values() {
        let words = deriver.split_words(&table.name);
        for length in 1..words.len() {
            *counts.entry(words[..length].to_vec()).or_default() += 1;
        }
    }

    let mut prefixes: Vec<(Vec<String>, usize)> =
        counts.into_iter().filter(|(_, count)| *count >= 2).collect();
    prefixes.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));

    prefixes
        .into_iter()
        .take(max_prefixes)
        .map(|(prefix, _)| prefix)
        .collect()
}
