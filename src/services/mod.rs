// Services Layer
// 弱い関連の解析とスキーマ読み込みを実行するサービス層

pub mod association_validator;
pub mod candidate_keys;
pub mod column_match_index;
pub mod declared_foreign_keys;
pub mod foreign_key_namer;
pub mod match_key;
pub mod schema_parser;
pub mod table_match_index;
pub mod weak_associations_analyzer;
