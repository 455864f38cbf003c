// schema-assocライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメインモデル（スキーマ、弱い関連、設定、エラー）
// - services: 解析サービス（マッチキー、索引、検証、弱い関連の解析、スキーマ読み込み）

pub mod cli;
pub mod core;
pub mod services;
