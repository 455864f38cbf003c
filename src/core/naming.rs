// 命名ポリシー
//
// 設定ファイル名、ログターゲット、生成する名前の単一ソースを提供します。

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = ".schema-assoc.yaml";

/// ログフィルタのターゲット名（クレート名）
pub const LOG_TARGET: &str = "schema_assoc";

/// 弱い関連名のプレフィックス
pub const FOREIGN_KEY_PREFIX: &str = "fk";
