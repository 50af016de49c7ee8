use crate::model::{CatalogRequest, ConfigError};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub locale: String,
    pub country: String,
    pub store_url_base: String,
    pub webhook_base_url: String,
    /// Name of the environment variable holding the webhook key.
    pub webhook_key_env: String,
    pub notification_title: String,
    pub cache_path: PathBuf,
    pub debug_dir: PathBuf,
    pub fetch_timeout_seconds: u64,
    pub notify_timeout_seconds: u64,
    /// Run once when unset.
    pub check_interval_seconds: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://store-site-backend-static.ak.epicgames.com/freeGamesPromotions".into(),
            locale: "en-US".into(),
            country: "US".into(),
            store_url_base: "https://store.epicgames.com/p".into(),
            webhook_base_url: "https://sctapi.ftqq.com".into(),
            webhook_key_env: "SERVER_CHAN_KEY".into(),
            notification_title: "Epic Games: new free games".into(),
            cache_path: "games_cache.json".into(),
            debug_dir: "logs/payload".into(),
            fetch_timeout_seconds: 15,
            notify_timeout_seconds: 10,
            check_interval_seconds: None,
        }
    }
}

impl AppConfig {
    pub fn catalog_request(&self) -> CatalogRequest {
        CatalogRequest {
            locale: self.locale.clone(),
            country: self.country.clone(),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout_seconds)
    }
}

/// Loads the config file. A missing file means defaults; a broken one is an error.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&content)?;
    if config.check_interval_seconds == Some(0) {
        return Err(ConfigError::Invalid(
            "check_interval_seconds must be at least 1 (omit it to run once)".into(),
        ));
    }
    Ok(config)
}

/// Looks up the webhook key through `lookup` (normally `std::env::var`).
pub fn resolve_webhook_key(
    config: &AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    lookup(&config.webhook_key_env)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ConfigError::MissingEnv(config.webhook_key_env.clone()))
}
