//! Page fetching. One shared client, fixed default user-agent, no retries.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::ScrapeError;

/// The user-agent the quote providers expect; without it some pages answer 403.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Builds the shared client with the default headers applied.
pub fn client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    Client::builder()
        .default_headers(headers)
        .build()
        .context("failed to build HTTP client")
}

/// Fetches one page and returns its body as text. Any non-success status or
/// transport error becomes a [`ScrapeError::FetchFailure`]; the caller skips
/// the source.
pub async fn page_text(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::bad_url(url, e))?;
    debug!(%parsed, "fetching");

    let response = client
        .get(parsed.clone())
        .send()
        .await
        .map_err(|e| ScrapeError::fetch(parsed.as_str(), e))?
        .error_for_status()
        .map_err(|e| ScrapeError::fetch(parsed.as_str(), e))?;

    response
        .text()
        .await
        .map_err(|e| ScrapeError::fetch(parsed.as_str(), e))
}
