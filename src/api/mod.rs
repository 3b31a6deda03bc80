//! バックエンドAPI
//!
//! [`CatalogApi`] がバックエンドとの境界。実装は HTTP 版の [`HttpCatalog`]、
//! テストでは同じトレイトのメモリ実装を使う。

mod http;

pub use http::HttpCatalog;

use async_trait::async_trait;
use insect_search_common::{Category, ExpertRequest, FetchError, InsectRecord, OptionsPayload, SearchRequest};

pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /api/filter-options/{category}`
    async fn filter_options(&self, category: Category) -> FetchResult<OptionsPayload>;

    /// `GET /api/all/{category}`
    async fn all_insects(&self, category: Category) -> FetchResult<Vec<InsectRecord>>;

    /// `POST /api/search`
    async fn search(&self, request: &SearchRequest) -> FetchResult<Vec<InsectRecord>>;

    /// `POST /api/expert-request`
    async fn submit_expert_request(&self, request: &ExpertRequest) -> FetchResult<()>;

    /// `POST /logout`
    async fn logout(&self) -> FetchResult<()>;
}
