//! HTTP実装（reqwest）

use super::{CatalogApi, FetchResult};
use crate::error::Result;
use async_trait::async_trait;
use insect_search_common::protocol::{OptionsResponse, RecordsResponse, StatusResponse, EXPERT_REQUEST_FAILED};
use insect_search_common::{Category, ExpertRequest, FetchError, InsectRecord, OptionsPayload, SearchRequest};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTPバックエンド
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<&serde_json::Value>) -> FetchResult<T> {
        debug!(path, "POST");
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(transport)?;
        read_json(response).await
    }
}

fn transport(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.to_string())
}

/// レスポンスをJSONとして読む
///
/// エラー応答（4xx/5xx）も `{"error": ...}` を返すので、まずボディを解釈する。
/// 解釈できなければ通信エラー扱い。
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> FetchResult<T> {
    let status = response.status();
    let text = response.text().await.map_err(transport)?;

    serde_json::from_str::<T>(&text).map_err(|e| {
        if status.is_success() {
            FetchError::Transport(format!("некорректный ответ сервера: {}", e))
        } else {
            FetchError::Transport(format!("HTTP {}", status))
        }
    })
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn filter_options(&self, category: Category) -> FetchResult<OptionsPayload> {
        let response: OptionsResponse = self
            .get(&format!("/api/filter-options/{}", category))
            .await?;
        response.into_options()
    }

    async fn all_insects(&self, category: Category) -> FetchResult<Vec<InsectRecord>> {
        let response: RecordsResponse = self.get(&format!("/api/all/{}", category)).await?;
        response.into_records()
    }

    async fn search(&self, request: &SearchRequest) -> FetchResult<Vec<InsectRecord>> {
        let body = serde_json::to_value(request)
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let response: RecordsResponse = self.post("/api/search", Some(&body)).await?;
        response.into_records()
    }

    async fn submit_expert_request(&self, request: &ExpertRequest) -> FetchResult<()> {
        let body = serde_json::to_value(request)
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let response: StatusResponse = self.post("/api/expert-request", Some(&body)).await?;
        response.into_result_or(EXPERT_REQUEST_FAILED)
    }

    async fn logout(&self) -> FetchResult<()> {
        let response: StatusResponse = self.post("/logout", None).await?;
        response.into_result()
    }
}
