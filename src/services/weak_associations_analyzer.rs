// 弱い関連解析サービス
//
// スキーマ全体を走査し、命名規則から宣言されていない外部キー様の関連を推定します。
// - 索引（カラムマッチキー、テーブルマッチキー、宣言済み外部キー）の構築
// - テーブルごとの親側候補カラムの展開と検証
// - 合成名による重複排除とマージ
// - 両端のテーブルへの結果の付与

use crate::core::config::AnalyzerConfig;
use crate::core::error::{AnalysisError, ErrorLocation};
use crate::core::schema::{ColumnRef, Constraint, Schema};
use crate::core::weak_association::{
    WeakAssociation, WeakAssociationForeignKey, WeakAssociations,
};
use crate::services::association_validator::AssociationValidator;
use crate::services::candidate_keys::CandidateKeySelector;
use crate::services::column_match_index::ColumnMatchIndex;
use crate::services::declared_foreign_keys::DeclaredForeignKeySet;
use crate::services::foreign_key_namer::{ConventionalForeignKeyNamer, ForeignKeyNamer};
use crate::services::match_key::MatchKeyDeriver;
use crate::services::table_match_index::TableMatchIndex;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info, trace};

/// 弱い関連解析サービス
///
/// 1回の `analyze` 呼び出しで索引を構築し、全テーブルの候補を評価します。
/// スキーマを `&mut` で受け取るため、同じスキーマに対する解析は直列化されます。
pub struct WeakAssociationsAnalyzer<N = ConventionalForeignKeyNamer> {
    config: AnalyzerConfig,
    deriver: MatchKeyDeriver,
    namer: N,
}

impl WeakAssociationsAnalyzer<ConventionalForeignKeyNamer> {
    /// 既定の命名規則でWeakAssociationsAnalyzerを作成
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_namer(config, ConventionalForeignKeyNamer)
    }
}

impl Default for WeakAssociationsAnalyzer<ConventionalForeignKeyNamer> {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl<N: ForeignKeyNamer> WeakAssociationsAnalyzer<N> {
    /// 命名規則を指定してWeakAssociationsAnalyzerを作成
    pub fn with_namer(config: AnalyzerConfig, namer: N) -> Self {
        Self {
            config,
            deriver: MatchKeyDeriver::new(),
            namer,
        }
    }

    /// 解析設定を取得
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// スキーマ全体の弱い関連を解析
    ///
    /// 見つかった弱い関連外部キーの名前は、親側・子側の両テーブルの
    /// `weak_associations` に付与されます。
    ///
    /// # Arguments
    ///
    /// * `schema` - 完全に読み込まれたスキーマ
    ///
    /// # Returns
    ///
    /// 正規順に並んだ弱い関連外部キー（テーブルが2未満の場合は空）
    ///
    /// # Errors
    ///
    /// 制約やインデックスが存在しないカラム・テーブルを参照している場合、
    /// 索引を構築する前に `AnalysisError` を返します。
    pub fn analyze(&self, schema: &mut Schema) -> Result<WeakAssociations, AnalysisError> {
        check_schema(schema)?;

        if schema.table_count() < 2 {
            debug!(tables = schema.table_count(), "Too few tables for weak associations");
            return Ok(WeakAssociations::empty());
        }

        info!(tables = schema.table_count(), "Finding weak associations");

        let declared = DeclaredForeignKeySet::build(schema);
        let column_index = ColumnMatchIndex::build(schema, &self.deriver);
        let table_index =
            TableMatchIndex::build(schema, &self.deriver, self.config.max_table_prefixes);
        trace!(column_match_keys = %column_index, "Column match keys");
        trace!(table_match_keys = %table_index, "Table match keys");

        let proposals = self.propose(schema, &declared, &column_index, &table_index);

        let mut found: HashMap<String, WeakAssociationForeignKey> = HashMap::new();
        for association in proposals {
            let name = self
                .namer
                .name_for(&association.primary_key_column, &association.foreign_key_column);
            debug!(name = %name, association = %association, "Found weak association");

            let tables = [
                association.primary_key_column.table.clone(),
                association.foreign_key_column.table.clone(),
            ];
            found
                .entry(name.clone())
                .or_insert_with(|| WeakAssociationForeignKey::new(name.clone()))
                .add(association);

            // 両端のテーブルへ名前で付与（同じ名前の再付与は何もしない）
            for table_name in &tables {
                if let Some(table) = schema.tables.get_mut(table_name) {
                    table.weak_associations.insert(name.clone());
                }
            }
        }

        let result = WeakAssociations::from_unordered(found.into_values());
        info!(weak_associations = result.len(), "Finished weak association analysis");

        Ok(result)
    }

    /// 全テーブルの候補カラムから妥当な関連を発見順に列挙
    fn propose(
        &self,
        schema: &Schema,
        declared: &DeclaredForeignKeySet,
        column_index: &ColumnMatchIndex,
        table_index: &TableMatchIndex,
    ) -> Vec<WeakAssociation> {
        let selector = CandidateKeySelector::new(self.config.use_unique_keys);
        let validator = AssociationValidator::new(schema, declared, &self.config);
        let mut proposals = Vec::new();

        for table in schema.tables.values() {
            let candidates = selector.candidate_columns(table);
            trace!(table = %table.full_name(), candidates = candidates.len(), "Table candidate keys");

            for pk_column in candidates {
                let mut match_keys: BTreeSet<String> = BTreeSet::new();
                if table.is_part_of_primary_key(&pk_column.column) {
                    match_keys.extend(table_index.table_match_keys(table));
                }
                match_keys.extend(column_index.keys_for(&pk_column));

                let fk_columns: BTreeSet<ColumnRef> = match_keys
                    .iter()
                    .flat_map(|key| column_index.columns_matching(key))
                    .collect();

                for fk_column in fk_columns {
                    if fk_column == pk_column {
                        continue;
                    }
                    if validator.is_valid(&pk_column, &fk_column) {
                        proposals.push(WeakAssociation::new(pk_column.clone(), fk_column));
                    }
                }
            }
        }

        keep_one_direction(proposals)
    }
}

/// 両方向に提案された組は、親側が正規順で先のもののみ残す
///
/// キー同士の 1:1 対応（例: 両テーブルの主キーが `account_id`）では
/// (a, b) と (b, a) が両方提案されます。片方向のみの提案はそのまま残します。
fn keep_one_direction(proposals: Vec<WeakAssociation>) -> Vec<WeakAssociation> {
    let proposed: HashSet<(ColumnRef, ColumnRef)> = proposals
        .iter()
        .map(|a| (a.primary_key_column.clone(), a.foreign_key_column.clone()))
        .collect();

    proposals
        .into_iter()
        .filter(|a| {
            let reverse = (a.foreign_key_column.clone(), a.primary_key_column.clone());
            if !proposed.contains(&reverse) {
                return true;
            }
            let keep = a.primary_key_column < a.foreign_key_column;
            if !keep {
                trace!(association = %a, "Dropping reverse direction of 1:1 match");
            }
            keep
        })
        .collect()
}

/// 解析の事前条件を検証
///
/// 制約・インデックスが参照するカラムとテーブルが全て存在し、
/// 外部キーのカラム数が一致していることを確認します。
fn check_schema(schema: &Schema) -> Result<(), AnalysisError> {
    for (table_name, table) in &schema.tables {
        let unknown_column = |constraint: &str, column: &str| AnalysisError::UnknownColumn {
            message: format!(
                "column '{}' does not exist in table '{}'",
                column, table_name
            ),
            constraint: constraint.to_string(),
            location: Some(ErrorLocation::with_column(
                table_name.clone(),
                column.to_string(),
            )),
        };

        for index in &table.indexes {
            if let Some(column) = index.columns.iter().find(|c| table.get_column(c).is_none()) {
                return Err(unknown_column(&format!("index '{}'", index.name), column.as_str()));
            }
        }

        for constraint in &table.constraints {
            if let Some(column) = constraint
                .columns()
                .iter()
                .find(|c| table.get_column(c).is_none())
            {
                return Err(unknown_column(constraint.kind(), column.as_str()));
            }

            let Constraint::FOREIGN_KEY {
                columns,
                referenced_table,
                referenced_columns,
            } = constraint
            else {
                continue;
            };

            if columns.len() != referenced_columns.len() {
                return Err(AnalysisError::ForeignKeyArity {
                    columns: columns.len(),
                    referenced_columns: referenced_columns.len(),
                    location: Some(ErrorLocation::with_table(table_name.clone())),
                });
            }

            let parent = schema
                .resolve_table_name(table, referenced_table)
                .and_then(|name| schema.get_table(&name))
                .ok_or_else(|| AnalysisError::UnknownTable {
                    referenced_table: referenced_table.clone(),
                    location: Some(ErrorLocation::with_table(table_name.clone())),
                })?;

            if let Some(column) = referenced_columns
                .iter()
                .find(|c| parent.get_column(c).is_none())
            {
                return Err(AnalysisError::UnknownColumn {
                    message: format!(
                        "referenced column '{}' does not exist in table '{}'",
                        column,
                        parent.full_name()
                    ),
                    constraint: constraint.kind().to_string(),
                    location: Some(ErrorLocation::with_column(
                        parent.full_name(),
                        column.clone(),
                    )),
                });
            }
        }
    }

    Ok(())
}
