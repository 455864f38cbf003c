// 弱い関連ドメインモデル
//
// 命名規則から推定された、宣言されていない外部キー様の関連を表現します。

use crate::core::schema::{ColumnRef, Table};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// 弱い関連
///
/// 推定された (親カラム, 子カラム) の組を1つだけ表現します。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WeakAssociation {
    /// 親側（主キー側）のカラム
    pub primary_key_column: ColumnRef,

    /// 子側（外部キー側）のカラム
    pub foreign_key_column: ColumnRef,
}

impl WeakAssociation {
    /// 新しい弱い関連を作成
    pub fn new(primary_key_column: ColumnRef, foreign_key_column: ColumnRef) -> Self {
        Self {
            primary_key_column,
            foreign_key_column,
        }
    }
}

impl fmt::Display for WeakAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <- {}",
            self.primary_key_column, self.foreign_key_column
        )
    }
}

/// 弱い関連外部キー
///
/// 同じ合成名を持つ弱い関連のグループです。複合外部キーと同様に
/// 複数の (親カラム, 子カラム) の組を保持できます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeakAssociationForeignKey {
    /// 合成名
    pub name: String,

    /// 構成する関連（確定後は正規順）
    pub associations: Vec<WeakAssociation>,
}

impl WeakAssociationForeignKey {
    /// 新しい弱い関連外部キーを作成
    pub fn new(name: String) -> Self {
        Self {
            name,
            associations: Vec::new(),
        }
    }

    /// 関連を追加（同じ組が既にあれば何もしない）
    pub fn add(&mut self, association: WeakAssociation) {
        if !self.associations.contains(&association) {
            self.associations.push(association);
        }
    }

    /// 関連の数
    pub fn len(&self) -> usize {
        self.associations.len()
    }

    /// 関連を持たないかどうか
    pub fn is_empty(&self) -> bool {
        self.associations.is_empty()
    }

    /// 指定されたテーブルが端点のいずれかに含まれるかどうか
    pub fn involves_table(&self, table_name: &str) -> bool {
        self.associations.iter().any(|a| {
            a.primary_key_column.table == table_name || a.foreign_key_column.table == table_name
        })
    }

    /// 構成する関連を正規順に並べ替える
    pub(crate) fn finalize(&mut self) {
        self.associations.sort();
        self.associations.dedup();
    }
}

impl Ord for WeakAssociationForeignKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.associations.cmp(&other.associations))
    }
}

impl PartialOrd for WeakAssociationForeignKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for WeakAssociationForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.associations.iter().map(|a| a.to_string()).collect();
        write!(f, "{} [{}]", self.name, pairs.join(", "))
    }
}

/// 弱い関連の解析結果
///
/// 1回の解析で得られた弱い関連外部キーの唯一の所有者です。
/// 要素は合成名、構成する関連の順に正規順で並びます。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeakAssociations {
    foreign_keys: Vec<WeakAssociationForeignKey>,
}

impl WeakAssociations {
    /// 空の解析結果を作成
    pub fn empty() -> Self {
        Self::default()
    }

    /// 弱い関連外部キーの集合から正規順の解析結果を作成
    ///
    /// 各要素は名前が互いに異なり、各組はちょうど1つの名前に割り当てられている必要があります。
    /// このとき要素同士の組の集合は互いに素になり、同一の組の集合を持つ要素は生じません。
    pub(crate) fn from_unordered(
        foreign_keys: impl IntoIterator<Item = WeakAssociationForeignKey>,
    ) -> Self {
        let mut foreign_keys: Vec<WeakAssociationForeignKey> = foreign_keys
            .into_iter()
            .map(|mut fk| {
                fk.finalize();
                fk
            })
            .collect();
        foreign_keys.sort();

        Self { foreign_keys }
    }

    /// 要素数
    pub fn len(&self) -> usize {
        self.foreign_keys.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.foreign_keys.is_empty()
    }

    /// 正規順に列挙
    pub fn iter(&self) -> std::slice::Iter<'_, WeakAssociationForeignKey> {
        self.foreign_keys.iter()
    }

    /// 合成名で検索
    pub fn get(&self, name: &str) -> Option<&WeakAssociationForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.name == name)
    }

    /// テーブルに付与された弱い関連外部キーを取得
    ///
    /// テーブル側が保持する名前参照をこの解析結果に対して解決します。
    pub fn for_table(&self, table: &Table) -> Vec<&WeakAssociationForeignKey> {
        table
            .weak_associations
            .iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    /// 全ての関連を列挙
    pub fn associations(&self) -> impl Iterator<Item = &WeakAssociation> {
        self.foreign_keys.iter().flat_map(|fk| fk.associations.iter())
    }
}

impl<'a> IntoIterator for &'a WeakAssociations {
    type Item = &'a WeakAssociationForeignKey;
    type IntoIter = std::slice::Iter<'a, WeakAssociationForeignKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.foreign_keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(table: &str, column: &str) -> ColumnRef {
        ColumnRef::new(table.to_string(), column.to_string())
    }

    fn fk(name: &str, pairs: &[((&str, &str), (&str, &str))]) -> WeakAssociationForeignKey {
        let mut fk = WeakAssociationForeignKey::new(name.to_string());
        for ((pt, pc), (ft, fc)) in pairs {
            fk.add(WeakAssociation::new(col(pt, pc), col(ft, fc)));
        }
        fk
    }

    #[test]
    fn test_add_ignores_duplicate_pair() {
        let mut weak_fk = fk("fk_books_author_id_authors", &[(("authors", "id"), ("books", "author_id"))]);
        weak_fk.add(WeakAssociation::new(col("authors", "id"), col("books", "author_id")));
        assert_eq!(weak_fk.len(), 1);
    }

    #[test]
    fn test_ordering_by_name_then_pairs() {
        let a = fk("fk_a", &[(("t2", "id"), ("t1", "t2_id"))]);
        let b = fk("fk_a", &[(("t3", "id"), ("t1", "t3_id"))]);
        let c = fk("fk_b", &[(("t0", "id"), ("t1", "t0_id"))]);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_from_unordered_sorts_by_name() {
        let result = WeakAssociations::from_unordered(vec![
            fk("fk_z", &[(("t2", "id"), ("t1", "t2_id"))]),
            fk("fk_a", &[(("t3", "id"), ("t1", "t3_id"))]),
            fk("fk_m", &[(("t4", "id"), ("t1", "t4_id"))]),
        ]);

        let names: Vec<&str> = result.iter().map(|fk| fk.name.as_str()).collect();
        assert_eq!(names, vec!["fk_a", "fk_m", "fk_z"]);
    }

    #[test]
    fn test_finalize_orders_pairs() {
        let result = WeakAssociations::from_unordered(vec![fk(
            "fk_merged",
            &[
                (("items", "id"), ("orders", "line_item_id")),
                (("items", "id"), ("order_line", "item_id")),
            ],
        )]);

        let merged = result.get("fk_merged").unwrap();
        assert_eq!(merged.associations[0].foreign_key_column.table, "order_line");
        assert_eq!(merged.associations[1].foreign_key_column.table, "orders");
    }

    #[test]
    fn test_for_table_resolves_attached_names() {
        let result = WeakAssociations::from_unordered(vec![fk(
            "fk_books_author_id_authors",
            &[(("authors", "id"), ("books", "author_id"))],
        )]);
        let mut table = Table::new("books".to_string());
        table.weak_associations.insert("fk_books_author_id_authors".to_string());
        table.weak_associations.insert("fk_missing".to_string());

        let attached = result.for_table(&table);
        assert_eq!(attached.len(), 1);
        assert!(attached[0].involves_table("books"));
        assert!(attached[0].involves_table("authors"));
    }

    #[test]
    fn test_display() {
        let weak_fk = fk("fk_books_author_id_authors", &[(("authors", "id"), ("books", "author_id"))]);
        assert_eq!(
            weak_fk.to_string(),
            "fk_books_author_id_authors [authors.id <- books.author_id]"
        );
    }
}
