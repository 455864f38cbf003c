// マッチキー導出サービス
//
// カラム名やテーブル名などの識別子を正規化し、命名規則の比較に使う
// マッチキーの集合を導出します。

use regex::Regex;
use std::collections::BTreeSet;

/// 識別子末尾のIDサフィックス
const ID_SUFFIX: &str = "id";

/// 末尾が `id` でもIDサフィックスを持たない単語
const WORDS_ENDING_IN_ID: &[&str] = &[
    "uuid", "guid", "paid", "valid", "invalid", "grid", "hybrid", "void", "fluid", "solid",
];

/// 単数形への変換で特別扱いする不規則名詞
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("mice", "mouse"),
];

/// マッチキー導出サービス
///
/// 識別子を単語に分割し、大文字小文字・区切り文字・単複の揺れを吸収したキーを生成します。
/// 2つの識別子は、導出されたキー集合が交わる場合に命名上一致するとみなされます。
#[derive(Debug, Clone)]
pub struct MatchKeyDeriver {
    separator: Regex,
}

impl MatchKeyDeriver {
    /// 新しいMatchKeyDeriverを作成
    pub fn new() -> Self {
        Self {
            // 英数字以外はすべて区切り文字として扱う
            separator: Regex::new(r"[^A-Za-z0-9]+").expect("separator pattern is valid"),
        }
    }

    /// 識別子を小文字の単語列に分割
    ///
    /// 区切り文字と camelCase の境界（小文字・数字の直後の大文字）で分割します。
    /// すべて大文字の塊はそのまま1単語として扱います。
    pub fn split_words(&self, identifier: &str) -> Vec<String> {
        let mut words = Vec::new();

        for chunk in self.separator.split(identifier).filter(|c| !c.is_empty()) {
            let mut current = String::new();
            let mut previous: Option<char> = None;

            for ch in chunk.chars() {
                let boundary = matches!(previous, Some(p) if (p.is_ascii_lowercase() || p.is_ascii_digit()) && ch.is_ascii_uppercase());
                if boundary && !current.is_empty() {
                    words.push(current.to_ascii_lowercase());
                    current = String::new();
                }
                current.push(ch);
                previous = Some(ch);
            }

            if !current.is_empty() {
                words.push(current.to_ascii_lowercase());
            }
        }

        words
    }

    /// カラム名からマッチキーを導出
    ///
    /// 末尾のIDサフィックス（`_id`、`Id`、`ID`）を取り除きます。
    /// サフィックスを取り除いた場合は参照カラムらしい名前とみなし、
    /// 末尾側の単語列（`line_item_id` → `lineitem`, `item`）もキーに含めます。
    /// `id` のみのカラムはキーを持ちません。
    pub fn column_keys(&self, column_name: &str) -> BTreeSet<String> {
        let mut words = self.split_words(column_name);
        let stripped = strip_id_suffix(&mut words);

        let mut keys = BTreeSet::new();
        if words.is_empty() {
            return keys;
        }

        if stripped {
            for start in 0..words.len() {
                keys.extend(singular_forms(&words[start..].concat()));
            }
        } else {
            keys.extend(singular_forms(&words.concat()));
        }

        keys
    }

    /// テーブル名からマッチキーを導出
    ///
    /// テーブル名全体に加え、指定された共通プレフィックス（単語列）を取り除いた名前もキーにします。
    pub fn table_keys(&self, table_name: &str, prefixes: &[Vec<String>]) -> BTreeSet<String> {
        let words = self.split_words(table_name);
        let mut keys = BTreeSet::new();
        if words.is_empty() {
            return keys;
        }

        keys.extend(singular_forms(&words.concat()));

        for prefix in prefixes {
            if prefix.len() < words.len() && words.starts_with(prefix) {
                keys.extend(singular_forms(&words[prefix.len()..].concat()));
            }
        }

        keys
    }
}

impl Default for MatchKeyDeriver {
    fn default() -> Self {
        Self::new()
    }
}

/// 末尾のIDサフィックスを取り除く
///
/// 取り除いた場合は true を返します。
fn strip_id_suffix(words: &mut Vec<String>) -> bool {
    let Some(last) = words.last_mut() else {
        return false;
    };

    if last.as_str() == ID_SUFFIX {
        words.pop();
        return true;
    }

    if last.len() > ID_SUFFIX.len()
        && last.ends_with(ID_SUFFIX)
        && !WORDS_ENDING_IN_ID.contains(&last.as_str())
    {
        last.truncate(last.len() - ID_SUFFIX.len());
        return true;
    }

    false
}

/// 単数形の候補を列挙
///
/// `-ies` で終わる語は `-y`（`categories` → `category`）と
/// `-ie`（`movies` → `movie`）のどちらの単数形もあり得るため、両方を返します。
pub fn singular_forms(word: &str) -> Vec<String> {
    let singular = singularize(word);
    let mut forms = vec![singular.clone()];

    if word.len() > 3 && word.ends_with("ies") {
        let ie_form = word[..word.len() - 1].to_string();
        if ie_form != singular {
            forms.push(ie_form);
        }
    }

    forms
}

/// 英語の複数形を単数形に変換
///
/// 命名規則の比較に十分な簡易規則のみを扱います。
pub fn singularize(word: &str) -> String {
    for (plural, singular) in IRREGULAR_PLURALS {
        if let Some(stem) = word.strip_suffix(plural) {
            return format!("{}{}", stem, singular);
        }
    }

    if word.len() <= 3 {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{}y", stem);
    }

    for suffix in ["sses", "xes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}
