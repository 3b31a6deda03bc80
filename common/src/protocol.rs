//! バックエンドとのJSON形式
//!
//! サーバーはエラー時に `{"error": "..."}` だけを返すことがあるため、
//! `success` は欠けていれば false とみなす。

use crate::category::Category;
use crate::error::{FetchError, Result};
use crate::options::OptionsPayload;
use crate::params::ParamMap;
use crate::record::InsectRecord;
use serde::{Deserialize, Serialize};

/// 詳細不明のエラー
pub const UNKNOWN_ERROR: &str = "Неизвестная ошибка";

/// `POST /api/search` のボディ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "type")]
    pub category: Category,
    pub params: ParamMap,
}

/// `/api/search` と `/api/all/{category}` のレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub results: Option<Vec<InsectRecord>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `/api/filter-options/{category}` のレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub options: Option<OptionsPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 成否だけのレスポンス（専門家依頼、ログアウト）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

fn application_error(error: Option<String>) -> FetchError {
    FetchError::Application(error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()))
}

impl RecordsResponse {
    /// 成功ならレコード（欠けていれば空）、失敗ならアプリケーションエラー
    pub fn into_records(self) -> std::result::Result<Vec<InsectRecord>, FetchError> {
        if self.success {
            Ok(self.results.unwrap_or_default())
        } else {
            Err(application_error(self.error))
        }
    }
}

impl OptionsResponse {
    pub fn into_options(self) -> std::result::Result<OptionsPayload, FetchError> {
        match (self.success, self.options) {
            (true, Some(options)) => Ok(options),
            (true, None) => Err(FetchError::Application("options missing".to_string())),
            (false, _) => Err(application_error(self.error)),
        }
    }
}

impl StatusResponse {
    pub fn into_result(self) -> std::result::Result<(), FetchError> {
        self.into_result_or(UNKNOWN_ERROR)
    }

    /// エラー文言が無いときの既定文言を指定する
    pub fn into_result_or(self, default: &str) -> std::result::Result<(), FetchError> {
        if self.success {
            Ok(())
        } else {
            Err(FetchError::Application(self.error.unwrap_or_else(|| default.to_string())))
        }
    }
}

/// 専門家への問い合わせ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertRequest {
    pub description: String,
    pub location: String,
    pub observation_date: String,
    pub additional_data: String,
}

/// 専門家依頼が拒否されたときの既定文言
pub const EXPERT_REQUEST_FAILED: &str = "Ошибка при отправке запроса";

/// 説明未入力時のメッセージ
pub const DESCRIPTION_REQUIRED: &str = "Описание насекомого обязательно";

impl ExpertRequest {
    /// 送信前チェック（説明は必須）
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(crate::error::Error::Validation(DESCRIPTION_REQUIRED.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_body() {
        let mut params = ParamMap::new();
        params.insert("body_length_min".into(), json!(20));
        let request = SearchRequest { category: Category::Dragonfly, params };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({ "type": "dragonfly", "params": { "body_length_min": 20 } }));
    }

    #[test]
    fn test_records_success_without_results() {
        let response: RecordsResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(response.into_records().unwrap(), vec![]);
    }

    #[test]
    fn test_records_failure_message() {
        let response: RecordsResponse =
            serde_json::from_str(r#"{"success": false, "error": "База недоступна"}"#).unwrap();
        assert_eq!(
            response.into_records(),
            Err(FetchError::Application("База недоступна".to_string()))
        );
    }

    #[test]
    fn test_error_only_body() {
        // 400/500 応答は success を含まない
        let response: RecordsResponse =
            serde_json::from_str(r#"{"error": "Неверный тип насекомого"}"#).unwrap();
        assert_eq!(
            response.into_records(),
            Err(FetchError::Application("Неверный тип насекомого".to_string()))
        );

        let response: StatusResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(response.into_result(), Err(FetchError::Application(UNKNOWN_ERROR.to_string())));
    }

    #[test]
    fn test_options_response() {
        let response: OptionsResponse =
            serde_json::from_str(r#"{"success": true, "options": {"colors": ["синий"]}}"#).unwrap();
        let options = response.into_options().unwrap();
        assert_eq!(options.get("colors"), Some(&json!(["синий"])));
    }

    #[test]
    fn test_expert_request_validation() {
        let empty = ExpertRequest {
            description: "   ".into(),
            ..Default::default()
        };
        let err = empty.validate().unwrap_err();
        assert_eq!(format!("{}", err), format!("Validation error: {}", DESCRIPTION_REQUIRED));

        let ok = ExpertRequest {
            description: "Зеленый жук на липе".into(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_expert_request_body() {
        let request = ExpertRequest {
            description: "Бабочка".into(),
            location: "Казань".into(),
            observation_date: "2024-06-01".into(),
            additional_data: String::new(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "description": "Бабочка",
                "location": "Казань",
                "observation_date": "2024-06-01",
                "additional_data": ""
            })
        );
    }
}
