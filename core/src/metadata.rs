//! Best-effort title lookups against the TMDb API.

use std::time::Duration;

use serde_json::Value;
use urlencoding::encode;

use crate::models::ContentType;

pub const DEFAULT_METADATA_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_METADATA_LANGUAGE: &str = "es-ES";

#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, language: impl Into<String>, timeout: Duration) -> Self {
        let http = build_client(reqwest::Client::builder().timeout(timeout));
        Self::with_client(http, base_url, language)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>, language: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { http, base_url, language: language.into() }
    }

    fn title_url(&self, id: &str, content_type: ContentType, api_key: &str) -> String {
        format!(
            "{}/{}/{}?api_key={}&language={}",
            self.base_url,
            content_type.path_segment(),
            encode(id),
            encode(api_key),
            encode(&self.language)
        )
    }

    /// Resolves a display title. Returns `None` without a request when the
    /// id or key is empty, and on any transport or response error.
    pub async fn lookup_title(&self, id: &str, content_type: ContentType, api_key: &str) -> Option<String> {
        let id = id.trim();
        let api_key = api_key.trim();
        if id.is_empty() || api_key.is_empty() {
            return None;
        }
        match self.fetch_title(id, content_type, api_key).await {
            Ok(title) => title,
            Err(e) => {
                log::warn!("title lookup for {} {} failed: {}", content_type.as_str(), id, e);
                None
            }
        }
    }

    async fn fetch_title(&self, id: &str, content_type: ContentType, api_key: &str) -> Result<Option<String>, reqwest::Error> {
        let res = self
            .http
            .get(self.title_url(id, content_type, api_key))
            .send()
            .await?
            .error_for_status()?;
        let json = res.json::<Value>().await?;
        let title = extract_title(&json, content_type);
        if title.is_none() {
            log::debug!("no title in metadata for {} {}", content_type.as_str(), id);
        }
        Ok(title)
    }
}

/// Builds `builder`, falling back to a default client when the
/// configuration is rejected.
pub fn build_client(builder: reqwest::ClientBuilder) -> reqwest::Client {
    builder.build().unwrap_or_else(|e| {
        log::warn!("http client config rejected, using defaults: {}", e);
        reqwest::Client::new()
    })
}

/// Movies carry `title`, series carry `name`; either is accepted as a
/// fallback for the other.
pub fn extract_title(json: &Value, content_type: ContentType) -> Option<String> {
    let fields = match content_type {
        ContentType::Movie => ["title", "name"],
        ContentType::Series => ["name", "title"],
    };
    fields
        .iter()
        .filter_map(|f| json.get(*f).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
