//! 昆虫レコード
//!
//! バックエンドが返すレコードは不透明な扱いとし、既知の項目だけを
//! 型付きで読む。未知の項目は `extra` に保持する。

use crate::category::Category;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 昆虫レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ru: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_lat: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitat: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub size_min: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub size_max: Option<f64>,

    /// 一覧表示モードでクライアント側が付与するカテゴリ（サーバー値は読まない）
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub insect_type: Option<Category>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InsectRecord {
    /// カテゴリを付与したコピー
    pub fn tagged(mut self, category: Category) -> Self {
        // サーバー由来の値は flatten 側に残るので捨てる
        self.extra.remove("insect_type");
        self.insect_type = Some(category);
        self
    }

    /// テキスト検索の対象5項目（欠損は空文字）
    pub fn searchable_fields(&self) -> [&str; 5] {
        [
            self.name_ru.as_deref().unwrap_or(""),
            self.name_lat.as_deref().unwrap_or(""),
            self.color.as_deref().unwrap_or(""),
            self.habitat.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or(""),
        ]
    }
}

/// 数値または数値文字列を受け付ける（それ以外は欠損扱い）
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
