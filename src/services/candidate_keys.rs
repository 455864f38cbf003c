// 候補キー選択サービス
//
// テーブルごとに、弱い関連の親側（「1」側）になり得るカラムを列挙します。

use crate::core::schema::{ColumnRef, Table};

/// 候補キー選択サービス
#[derive(Debug, Clone)]
pub struct CandidateKeySelector {
    /// 単一カラムのユニークキーを候補に含めるかどうか
    use_unique_keys: bool,
}

impl CandidateKeySelector {
    /// 新しいCandidateKeySelectorを作成
    pub fn new(use_unique_keys: bool) -> Self {
        Self { use_unique_keys }
    }

    /// 親側候補のカラムを列挙
    ///
    /// 主キーのカラムをキー内の位置順に返し、続いて（有効な場合）
    /// 単一カラムのユニークキーを宣言順に返します。重複は除かれます。
    /// 主キーもユニークキーも持たないテーブルでは空になります。
    pub fn candidate_columns(&self, table: &Table) -> Vec<ColumnRef> {
        let mut names: Vec<String> = Vec::new();

        for name in table.get_primary_key_columns().unwrap_or_default() {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        if self.use_unique_keys {
            for name in table.single_column_unique_keys() {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }

        names.iter().map(|name| table.column_ref(name)).collect()
    }
}

impl Default for CandidateKeySelector {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Column, ColumnType, Constraint, Index};

    fn table_with_keys() -> Table {
        let mut table = Table::new("order_items".to_string());
        for name in ["sku", "line_no", "order_id", "barcode"] {
            table.add_column(Column::new(
                name.to_string(),
                ColumnType::INTEGER { precision: None },
                false,
            ));
        }
        table.add_constraint(Constraint::PRIMARY_KEY {
            columns: vec!["order_id".to_string(), "line_no".to_string()],
        });
        table.add_index(Index::new(
            "idx_order_items_barcode".to_string(),
            vec!["barcode".to_string()],
            true,
        ));
        table.add_index(Index::new(
            "idx_order_items_line".to_string(),
            vec!["line_no".to_string()],
            true,
        ));
        table
    }

    fn names(columns: &[ColumnRef]) -> Vec<&str> {
        columns.iter().map(|c| c.column.as_str()).collect()
    }

    #[test]
    fn test_primary_key_in_key_position_order() {
        let selector = CandidateKeySelector::new(false);
        let candidates = selector.candidate_columns(&table_with_keys());
        assert_eq!(names(&candidates), vec!["order_id", "line_no"]);
        assert!(candidates.iter().all(|c| c.table == "order_items"));
    }

    #[test]
    fn test_unique_keys_follow_primary_key_without_duplicates() {
        let selector = CandidateKeySelector::new(true);
        let candidates = selector.candidate_columns(&table_with_keys());
        assert_eq!(names(&candidates), vec!["order_id", "line_no", "barcode"]);
    }

    #[test]
    fn test_table_without_keys_has_no_candidates() {
        let mut table = Table::new("audit_log".to_string());
        table.add_column(Column::new("message".to_string(), ColumnType::TEXT, true));

        assert!(CandidateKeySelector::default()
            .candidate_columns(&table)
            .is_empty());
    }
}
