use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::config::HttpConfig;
use crate::error::{AppError, Result};

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// Factory for the shared HTTP client.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    let client = Client::builder()
        .timeout(config.timeout())
        .redirect(Policy::limited(config.max_redirects))
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Accepts absolute `http`/`https` URLs only.
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| AppError::invalid_url(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::invalid_url(format!(
            "{raw}: unsupported scheme '{other}'"
        ))),
    }
}

/// Markup and timing of one successful fetch.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub requested_url: String,
    /// URL after redirects.
    pub final_url: String,
    pub status: u16,
    pub html: String,
    pub load_time_ms: u64,
}

#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self::with_client(create_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GETs `url` and reads the body. Load time covers request and body.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let target = validate_url(url)?;
        let started = Instant::now();

        let response = self.client.get(target).send().await?;
        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let html = response.text().await?;
        let load_time_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(
            "Fetched {} ({} bytes, {} ms)",
            final_url,
            html.len(),
            load_time_ms
        );

        Ok(FetchedPage {
            requested_url: url.to_string(),
            final_url,
            status: status.as_u16(),
            html,
            load_time_ms,
        })
    }

    /// Body of `url` as text, for sitemap documents.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        Ok(self.fetch(url).await?.html)
    }
}
