//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building HTTP clients with timeout, user agent and proxy settings
//! - GET requests for numbered listing pages
//! - Retry logic for failed requests
//! - Error classification

use crate::config::ScraperConfig;
use crate::scrape::retry::RetryPolicy;
use async_trait::async_trait;
use reqwest::{Client, Proxy};
use std::time::Duration;
use thiserror::Error;

/// Why a page could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timeout for {url}")]
    Timeout { url: String },

    #[error("connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("request failed for {url}: {message}")]
    Request { url: String, message: String },
}

impl FetchError {
    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            Self::Timeout { url }
        } else if error.is_connect() {
            Self::Connect {
                url,
                message: error.to_string(),
            }
        } else if let Some(status) = error.status() {
            Self::Status {
                url,
                status: status.as_u16(),
            }
        } else {
            Self::Request {
                url,
                message: error.to_string(),
            }
        }
    }
}

/// Anything that can hand back the raw markup of a listing page
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the markup of page `page` (numbered from 1)
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// When `proxy` is given it is used for both HTTP and HTTPS traffic.
///
/// # Example
///
/// ```no_run
/// use shelfwatch::config::ScraperConfig;
/// use shelfwatch::scrape::build_http_client;
///
/// let client = build_http_client(&ScraperConfig::default(), Some("http://127.0.0.1:3128")).unwrap();
/// ```
pub fn build_http_client(
    config: &ScraperConfig,
    proxy: Option<&str>,
) -> Result<Client, reqwest::Error> {
    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| format!("shelfwatch/{}", env!("CARGO_PKG_VERSION")));

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy)?);
    }

    builder.build()
}

/// Builds the URL of one listing page
///
/// The base is treated as a directory: `https://shop/page` and
/// `https://shop/page/` both give `https://shop/page/3/` for page 3.
pub fn page_url(base_url: &str, page: u32) -> String {
    format!("{}/{}/", base_url.trim_end_matches('/'), page)
}

/// Listing-page fetcher over HTTP with a fixed retry policy
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpFetcher {
    /// Creates a fetcher from scraper settings and an optional proxy
    pub fn new(config: &ScraperConfig, proxy: Option<&str>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, proxy)?,
            base_url: config.base_url.clone(),
            retry: RetryPolicy::from_config(config),
        })
    }

    /// URL this fetcher requests for `page`
    pub fn url_for(&self, page: u32) -> String {
        page_url(&self.base_url, page)
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String, FetchError> {
        let url = self.url_for(page);
        tracing::debug!("Fetching page {}: {}", page, url);

        self.retry
            .run(&format!("GET {}", url), |_| self.fetch_once(&url))
            .await
    }
}
