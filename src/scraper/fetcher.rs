use crate::model::{CatalogRequest, FetchError};
use crate::parser::catalog_elements;
use crate::scraper::traits::Fetcher;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{info, warn};

pub struct CatalogFetcher {
    client: Client,
    endpoint: String,
}

impl CatalogFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) EpicSniperBot/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(e.to_string())
    }
}

#[async_trait::async_trait]
impl Fetcher for CatalogFetcher {
    async fn fetch(&self, req: &CatalogRequest) -> Result<Vec<Value>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("locale", req.locale.as_str()),
                ("country", req.country.as_str()),
                ("allowCountries", req.country.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.text().await.map_err(transport_error)?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        match catalog_elements(&payload) {
            Some(entries) => Ok(entries.to_vec()),
            None => Err(FetchError::MissingElements(body)),
        }
    }
}

/// Fetches catalog entries, turning every failure into an empty list.
/// Payloads that arrived but could not be used are saved under `debug_dir`.
pub async fn fetch_entries(
    fetcher: &dyn Fetcher,
    req: &CatalogRequest,
    debug_dir: &Path,
) -> Vec<Value> {
    match fetcher.fetch(req).await {
        Ok(entries) => {
            info!("Fetched {} catalog entries", entries.len());
            entries
        }
        Err(FetchError::MissingElements(body)) => {
            warn!("Catalog payload has no entry list");
            log_and_save_payload(debug_dir, &body);
            Vec::new()
        }
        Err(e) => {
            warn!("Catalog fetch failed: {}", e);
            Vec::new()
        }
    }
}

static DUMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Logs and saves the provided payload for debugging purposes.
fn log_and_save_payload(folder: &Path, body: &str) {
    if let Err(e) = fs::create_dir_all(folder) {
        warn!("Failed to create debug folder: {}", e);
        return;
    }
    let filename = folder.join(format!(
        "debug-{}-{}.json",
        Utc::now().format("%Y%m%dT%H%M%S%3f"),
        DUMP_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    if let Err(e) = fs::write(&filename, body) {
        warn!("Failed to write debug payload: {}", e);
    } else {
        info!("Saved debug payload: {}", filename.display());
    }
}
