// 型カテゴリ分類
//
// カラム型を型カテゴリに分類し、関連候補となるカラム同士が
// 比較可能な型かどうかを判定する機能を提供します。

use super::schema::ColumnType;

/// 型カテゴリ
///
/// カラム型を大まかなカテゴリに分類します。
/// 弱い関連の型互換性検証に使用されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    /// 数値型 (INTEGER, DECIMAL, FLOAT, DOUBLE)
    Numeric,
    /// 文字列型 (VARCHAR, TEXT, CHAR)
    String,
    /// 日時型 (DATE, TIME, TIMESTAMP)
    DateTime,
    /// バイナリ型 (BLOB)
    Binary,
    /// JSON型 (JSON, JSONB)
    Json,
    /// 真偽値型 (BOOLEAN)
    Boolean,
    /// UUID型 (UUID)
    Uuid,
    /// その他 (ENUM, DialectSpecific)
    Other,
}

impl TypeCategory {
    /// ColumnTypeから型カテゴリを判定
    pub fn from_column_type(column_type: &ColumnType) -> Self {
        match column_type {
            // 数値型
            ColumnType::INTEGER { .. }
            | ColumnType::DECIMAL { .. }
            | ColumnType::FLOAT
            | ColumnType::DOUBLE => TypeCategory::Numeric,

            // 文字列型
            ColumnType::VARCHAR { .. } | ColumnType::TEXT | ColumnType::CHAR { .. } => {
                TypeCategory::String
            }

            // 日時型
            ColumnType::DATE | ColumnType::TIME { .. } | ColumnType::TIMESTAMP { .. } => {
                TypeCategory::DateTime
            }

            ColumnType::BLOB => TypeCategory::Binary,

            ColumnType::JSON | ColumnType::JSONB => TypeCategory::Json,

            ColumnType::BOOLEAN => TypeCategory::Boolean,

            ColumnType::UUID => TypeCategory::Uuid,

            // その他（ENUM、方言固有型）
            ColumnType::Enum { .. } | ColumnType::DialectSpecific { .. } => TypeCategory::Other,
        }
    }
}

/// 2つのカラム型が値として比較可能かどうかを判定
///
/// 組み込み型は同一カテゴリであれば比較可能とみなします。
/// ENUMは同じ型名同士、方言固有型は型名（大文字小文字を区別しない）が一致する場合のみ比較可能です。
pub fn are_comparable(left: &ColumnType, right: &ColumnType) -> bool {
    match (left, right) {
        (ColumnType::Enum { name: l }, ColumnType::Enum { name: r }) => l == r,
        (
            ColumnType::DialectSpecific { kind: l, .. },
            ColumnType::DialectSpecific { kind: r, .. },
        ) => l.eq_ignore_ascii_case(r),
        _ => {
            let category = TypeCategory::from_column_type(left);
            category != TypeCategory::Other && category == TypeCategory::from_column_type(right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_classification() {
        assert_eq!(
            TypeCategory::from_column_type(&ColumnType::INTEGER { precision: Some(8) }),
            TypeCategory::Numeric
        );
        assert_eq!(
            TypeCategory::from_column_type(&ColumnType::CHAR { length: 3 }),
            TypeCategory::String
        );
        assert_eq!(
            TypeCategory::from_column_type(&ColumnType::JSONB),
            TypeCategory::Json
        );
        assert_eq!(
            TypeCategory::from_column_type(&ColumnType::Enum {
                name: "status".to_string()
            }),
            TypeCategory::Other
        );
    }

    #[test]
    fn test_numeric_types_are_comparable() {
        assert!(are_comparable(
            &ColumnType::INTEGER { precision: None },
            &ColumnType::DECIMAL {
                precision: 10,
                scale: 0
            }
        ));
    }

    #[test]
    fn test_numeric_and_string_are_not_comparable() {
        assert!(!are_comparable(
            &ColumnType::INTEGER { precision: None },
            &ColumnType::VARCHAR { length: 36 }
        ));
        assert!(!are_comparable(&ColumnType::UUID, &ColumnType::TEXT));
    }

    #[test]
    fn test_enum_comparability_by_name() {
        let status = ColumnType::Enum {
            name: "status".to_string(),
        };
        let other = ColumnType::Enum {
            name: "priority".to_string(),
        };
        assert!(are_comparable(&status, &status.clone()));
        assert!(!are_comparable(&status, &other));
    }

    #[test]
    fn test_dialect_specific_comparability_by_kind() {
        let serial = ColumnType::DialectSpecific {
            kind: "SERIAL".to_string(),
            params: serde_json::json!({}),
        };
        let serial_lower = ColumnType::DialectSpecific {
            kind: "serial".to_string(),
            params: serde_json::json!({}),
        };
        assert!(are_comparable(&serial, &serial_lower));
        assert!(!are_comparable(&serial, &ColumnType::INTEGER { precision: None }));
    }
}
