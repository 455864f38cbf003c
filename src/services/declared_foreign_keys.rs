// 宣言済み外部キー集合
//
// スキーマで宣言された外部キー制約の (親カラム, 子カラム) の組を保持し、
// 既に制約として表現されている関連を除外するために使用します。

use crate::core::schema::{ColumnRef, Constraint, Schema};
use std::collections::HashSet;

/// 宣言済み外部キー集合
#[derive(Debug, Clone, Default)]
pub struct DeclaredForeignKeySet {
    /// (親カラム, 子カラム)
    pairs: HashSet<(ColumnRef, ColumnRef)>,
}

impl DeclaredForeignKeySet {
    /// スキーマ内の全ての外部キー制約から集合を構築
    ///
    /// 参照先テーブルが解決できない制約は無視します（事前条件検証で除外済み）。
    pub fn build(schema: &Schema) -> Self {
        let mut pairs = HashSet::new();

        for (table_name, table) in &schema.tables {
            for constraint in &table.constraints {
                let Constraint::FOREIGN_KEY {
                    columns,
                    referenced_table,
                    referenced_columns,
                } = constraint
                else {
                    continue;
                };

                let Some(parent_table) = schema.resolve_table_name(table, referenced_table) else {
                    continue;
                };

                for (child, parent) in columns.iter().zip(referenced_columns) {
                    pairs.insert((
                        ColumnRef::new(parent_table.clone(), parent.clone()),
                        ColumnRef::new(table_name.clone(), child.clone()),
                    ));
                }
            }
        }

        Self { pairs }
    }

    /// 組が宣言済みの外部キーに含まれるかどうか
    ///
    /// 逆向きの組も宣言済みとみなします。
    pub fn contains(&self, parent: &ColumnRef, child: &ColumnRef) -> bool {
        let forward = (parent.clone(), child.clone());
        let reverse = (child.clone(), parent.clone());
        self.pairs.contains(&forward) || self.pairs.contains(&reverse)
    }

    /// 宣言済みの組の数
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Column, ColumnType, Table};

    fn col(table: &str, column: &str) -> ColumnRef {
        ColumnRef::new(table.to_string(), column.to_string())
    }

    fn schema_with_composite_fk() -> Schema {
        let mut schema = Schema::new("1.0".to_string());

        let mut orders = Table::with_schema("sales".to_string(), "orders".to_string());
        for name in ["region_id", "order_no"] {
            orders.add_column(Column::new(
                name.to_string(),
                ColumnType::INTEGER { precision: None },
                false,
            ));
        }
        schema.add_table(orders);

        let mut lines = Table::with_schema("sales".to_string(), "order_lines".to_string());
        for name in ["order_region_id", "order_no", "line_no"] {
            lines.add_column(Column::new(
                name.to_string(),
                ColumnType::INTEGER { precision: None },
                false,
            ));
        }
        lines.add_constraint(Constraint::FOREIGN_KEY {
            columns: vec!["order_region_id".to_string(), "order_no".to_string()],
            referenced_table: "orders".to_string(),
            referenced_columns: vec!["region_id".to_string(), "order_no".to_string()],
        });
        schema.add_table(lines);

        schema
    }

    #[test]
    fn test_composite_foreign_key_pairs() {
        let declared = DeclaredForeignKeySet::build(&schema_with_composite_fk());

        assert_eq!(declared.len(), 2);
        assert!(declared.contains(
            &col("sales.orders", "region_id"),
            &col("sales.order_lines", "order_region_id")
        ));
        assert!(declared.contains(
            &col("sales.orders", "order_no"),
            &col("sales.order_lines", "order_no")
        ));
        // 列の対応がずれた組は含まない
        assert!(!declared.contains(
            &col("sales.orders", "region_id"),
            &col("sales.order_lines", "order_no")
        ));
    }

    #[test]
    fn test_reverse_pair_is_treated_as_declared() {
        let declared = DeclaredForeignKeySet::build(&schema_with_composite_fk());
        assert!(declared.contains(
            &col("sales.order_lines", "order_no"),
            &col("sales.orders", "order_no")
        ));
    }

    #[test]
    fn test_schema_without_foreign_keys() {
        let declared = DeclaredForeignKeySet::build(&Schema::new("1.0".to_string()));
        assert!(declared.is_empty());
    }
}
