// 弱い関連名の合成
//
// (親カラム, 子カラム) の組から弱い関連外部キーの名前を決定的に合成します。
// 同じ名前に合成された組は1つの弱い関連外部キーにまとめられます。

use crate::core::naming::FOREIGN_KEY_PREFIX;
use crate::core::schema::ColumnRef;

/// 弱い関連名の合成規則
pub trait ForeignKeyNamer {
    /// (親カラム, 子カラム) の組の名前を合成
    fn name_for(&self, primary_key_column: &ColumnRef, foreign_key_column: &ColumnRef) -> String;
}

/// 外部キー制約の慣用的な命名規則
///
/// `fk_{子テーブル}_{子カラム}_{親テーブル}` の形式で、
/// 宣言された外部キー制約に付ける名前と同じ規則で合成します。
/// 修飾テーブル名はそのまま使うため、`sales.orders` と `sales_orders` は区別されます。
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalForeignKeyNamer;

impl ForeignKeyNamer for ConventionalForeignKeyNamer {
    fn name_for(&self, primary_key_column: &ColumnRef, foreign_key_column: &ColumnRef) -> String {
        format!(
            "{}_{}_{}_{}",
            FOREIGN_KEY_PREFIX,
            foreign_key_column.table,
            foreign_key_column.column,
            primary_key_column.table
        )
    }
}
