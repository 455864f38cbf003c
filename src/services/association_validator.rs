// 関連候補の検証サービス
//
// (親カラム, 子カラム) の候補が弱い関連として妥当かどうかを判定します。
// 判定はエラーではなく真偽値で返します。

use crate::core::config::AnalyzerConfig;
use crate::core::schema::{ColumnRef, Schema};
use crate::core::type_category::are_comparable;
use crate::services::declared_foreign_keys::DeclaredForeignKeySet;

/// 関連候補の検証サービス
#[derive(Debug, Clone)]
pub struct AssociationValidator<'a> {
    schema: &'a Schema,
    declared: &'a DeclaredForeignKeySet,
    check_column_types: bool,
    allow_self_associations: bool,
}

impl<'a> AssociationValidator<'a> {
    /// 新しいAssociationValidatorを作成
    pub fn new(
        schema: &'a Schema,
        declared: &'a DeclaredForeignKeySet,
        config: &AnalyzerConfig,
    ) -> Self {
        Self {
            schema,
            declared,
            check_column_types: config.check_column_types,
            allow_self_associations: config.allow_self_associations,
        }
    }

    /// 候補が弱い関連として妥当かどうか
    pub fn is_valid(&self, parent: &ColumnRef, child: &ColumnRef) -> bool {
        if parent == child {
            return false;
        }

        // 実際の制約で表現済み
        if self.declared.contains(parent, child) {
            return false;
        }

        if !self.allow_self_associations && parent.table == child.table {
            return false;
        }

        let (Some(parent_table), Some(child_table)) = (
            self.schema.get_table(&parent.table),
            self.schema.get_table(&child.table),
        ) else {
            return false;
        };

        if self.check_column_types {
            let (Some(parent_column), Some(child_column)) = (
                parent_table.get_column(&parent.column),
                child_table.get_column(&child.column),
            ) else {
                return false;
            };
            if !are_comparable(&parent_column.column_type, &child_column.column_type) {
                return false;
            }
        }

        true
    }
}
