// Core Domain
// スキーマモデル、弱い関連モデル、型の互換性、設定とエラーの定義

pub mod config;
pub mod error;
pub mod naming;
pub mod schema;
pub mod type_category;
pub mod weak_association;
