use std::time::Duration;

use once_cell::sync::Lazy;
use ureq::ResponseExt;

use crate::error::{Result, SeoAioError};

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (compatible; seoaio/0.1)";

/// Shared HTTP agent for connection pooling
static HTTP_AGENT: Lazy<ureq::Agent> = Lazy::new(|| {
    ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
        .build()
        .into()
});

/// Content fetched from a page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Final URL after redirects
    pub url: String,
    /// Raw HTML content
    pub html: String,
}

/// Add `https://` when the URL has no scheme
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Fetch a page over HTTP
pub fn fetch(url: &str) -> Result<PageContent> {
    let url = normalize_url(url);
    url::Url::parse(&url)?;

    tracing::debug!(%url, "fetching page");

    let response = HTTP_AGENT
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| match e {
            ureq::Error::Timeout(_) => SeoAioError::FetchError {
                url: url.clone(),
                reason: format!("timed out after {}s", DEFAULT_TIMEOUT_SECS),
            },
            other => SeoAioError::HttpError(other),
        })?;

    let final_url = response.get_uri().to_string();
    let html = response.into_body().read_to_string()?;

    tracing::debug!(url = %final_url, bytes = html.len(), "fetched page");

    Ok(PageContent { url: final_url, html })
}
