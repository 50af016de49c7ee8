// Core structs: ClassifiedRecord, Classification, error enums
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized view of one free promotion. `date` is "free until" for current
/// records and "free from" for upcoming ones, always `YYYY-MM-DD` in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub title: String,
    pub url: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub current: Vec<ClassifiedRecord>,
    pub upcoming: Vec<ClassifiedRecord>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.upcoming.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogRequest {
    pub locale: String,
    pub country: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("body is not valid JSON: {0}")]
    Decode(String),
    #[error("payload has no data.Catalog.searchStore.elements array")]
    MissingElements(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{path}: expected {expected}")]
    WrongType { path: String, expected: &'static str },
    #[error("{path}: unparsable date {value:?}")]
    BadDate { path: String, value: String },
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    ApiError(String),
    #[error("webhook unreachable")]
    Unreachable,
    #[error("webhook rejected message (code {code}): {message}")]
    Rejected { code: i64, message: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("environment variable {0} is not set")]
    MissingEnv(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}
