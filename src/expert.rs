//! 専門家への問い合わせとログアウト

use crate::api::CatalogApi;
use crate::error::{InsectSearchError, Result};
use chrono::NaiveDate;
use insect_search_common::{ExpertRequest, FetchError};
use tracing::warn;

pub const SUBMITTED: &str = "Запрос успешно отправлен эксперту!";
pub const CONNECTION_FAILED: &str = "Ошибка соединения с сервером";

/// 入力から依頼を作る（説明必須、日付は ГГГГ-ММ-ДД）
pub fn build_request(
    description: &str,
    location: Option<&str>,
    observation_date: Option<&str>,
    additional_data: Option<&str>,
) -> Result<ExpertRequest> {
    let observation_date = match observation_date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| InsectSearchError::InvalidDate(date.to_string()))?;
            date.to_string()
        }
        None => String::new(),
    };

    let request = ExpertRequest {
        description: description.trim().to_string(),
        location: location.unwrap_or_default().trim().to_string(),
        observation_date,
        additional_data: additional_data.unwrap_or_default().trim().to_string(),
    };
    request.validate()?;
    Ok(request)
}

/// 依頼を送信し、ユーザー向けの結果文言を返す
///
/// `Ok` は成功文言、`Err` は表示すべきエラー文言。
pub async fn submit<A: CatalogApi + ?Sized>(
    api: &A,
    request: &ExpertRequest,
) -> std::result::Result<&'static str, String> {
    match api.submit_expert_request(request).await {
        Ok(()) => Ok(SUBMITTED),
        Err(FetchError::Application(msg)) => Err(msg),
        Err(FetchError::Transport(msg)) => {
            warn!(error = %msg, "専門家依頼の送信に失敗");
            Err(CONNECTION_FAILED.to_string())
        }
    }
}

/// ログアウト（失敗はログのみ）
pub async fn logout<A: CatalogApi + ?Sized>(api: &A) -> bool {
    match api.logout().await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "ログアウトに失敗");
            false
        }
    }
}
