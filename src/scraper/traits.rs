use crate::model::{CatalogRequest, FetchError};
use serde_json::Value;

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the raw catalog entries of the storefront's promotions feed.
    async fn fetch(&self, req: &CatalogRequest) -> Result<Vec<Value>, FetchError>;
}
