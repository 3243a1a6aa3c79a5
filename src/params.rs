use std::collections::HashMap;

use reqwest::Url;
use thiserror::Error;

use crate::models::{AskRequest, CrawlRequest, IndexRequest};

pub const DEFAULT_MAX_PAGES: i64 = 20;
pub const DEFAULT_MAX_DEPTH: i64 = 2;
pub const DEFAULT_CRAWL_DELAY_MS: f64 = 0.5;
pub const DEFAULT_CHUNK_SIZE: i64 = 500;
pub const DEFAULT_CHUNK_OVERLAP: i64 = 50;
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
pub const DEFAULT_TOP_K: i64 = 3;

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("{field} is not a valid absolute URL: {value:?}")]
    InvalidUrl { field: &'static str, value: String },
}

/// Raw user input for one operation: field name -> untyped text, the shape
/// an HTML form or CLI flag set produces. Absent and empty behave the same.
#[derive(Debug, Clone, Default)]
pub struct RawParams(HashMap<String, String>);

impl RawParams {
    pub fn new() -> RawParams {
        RawParams(HashMap::new())
    }

    pub fn set(mut self, key: &str, value: impl Into<String>) -> RawParams {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Build a crawl request, defaulting every malformed or absent numeric field.
/// `start_url` is the only field that can fail resolution.
pub fn resolve_crawl(raw: &RawParams) -> Result<CrawlRequest, ParamError> {
    let start_url = required_string(raw, "start_url")?;
    if Url::parse(&start_url).is_err() {
        return Err(ParamError::InvalidUrl {
            field: "start_url",
            value: start_url,
        });
    }
    Ok(CrawlRequest {
        start_url,
        max_pages: int_or(raw, "max_pages", DEFAULT_MAX_PAGES),
        max_depth: int_or(raw, "max_depth", DEFAULT_MAX_DEPTH),
        crawl_delay_ms: float_or(raw, "crawl_delay_ms", DEFAULT_CRAWL_DELAY_MS),
    })
}

/// Build an index request. Every field has a default, so this cannot fail.
/// An overlap that is not smaller than the chunk size is treated like any
/// other malformed value and falls back to the default.
pub fn resolve_index(raw: &RawParams) -> IndexRequest {
    let chunk_size = int_or(raw, "chunk_size", DEFAULT_CHUNK_SIZE);
    let mut chunk_overlap = int_or(raw, "chunk_overlap", DEFAULT_CHUNK_OVERLAP);
    if chunk_overlap >= chunk_size {
        chunk_overlap = DEFAULT_CHUNK_OVERLAP;
    }
    IndexRequest {
        chunk_size,
        chunk_overlap,
        embedding_model: string_or(raw, "embedding_model", DEFAULT_EMBEDDING_MODEL),
    }
}

/// Build an ask request. `question` is required, `top_k` defaults.
pub fn resolve_ask(raw: &RawParams) -> Result<AskRequest, ParamError> {
    Ok(AskRequest {
        question: required_string(raw, "question")?,
        top_k: int_or(raw, "top_k", DEFAULT_TOP_K),
    })
}

fn required_string(raw: &RawParams, key: &'static str) -> Result<String, ParamError> {
    match raw.get(key) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ParamError::MissingField(key)),
    }
}

fn string_or(raw: &RawParams, key: &str, default: &str) -> String {
    match raw.get(key) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

fn int_or(raw: &RawParams, key: &str, default: i64) -> i64 {
    raw.get(key)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

fn float_or(raw: &RawParams, key: &str, default: f64) -> f64 {
    raw.get(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(default)
}
