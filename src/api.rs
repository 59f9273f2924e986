//! Token-gated "start scrape" operation
//!
//! This is the single entry point callers use to trigger a run. The token
//! is checked before anything else happens, so a rejected call has no side
//! effects and reveals nothing beyond the rejection itself.

use crate::cache::open_cache;
use crate::config::{validate_proxy, Config};
use crate::notify::open_notifier;
use crate::scrape::Coordinator;
use crate::storage::open_storage;
use crate::ShelfwatchError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Parameters of one scrape invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeRequest {
    /// Last page to scrape, counting from 1
    pub page_limit: u32,

    /// Outbound proxy for this run, overriding the configured one
    #[serde(default)]
    pub proxy: Option<String>,
}

impl ScrapeRequest {
    pub fn new(page_limit: u32) -> Self {
        Self {
            page_limit,
            proxy: None,
        }
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    fn validate(&self) -> Result<(), ShelfwatchError> {
        if self.page_limit == 0 {
            return Err(ShelfwatchError::InvalidRequest(
                "page_limit must be a positive integer".to_string(),
            ));
        }

        if let Some(proxy) = &self.proxy {
            validate_proxy(proxy).map_err(|e| ShelfwatchError::InvalidRequest(e.to_string()))?;
        }

        Ok(())
    }
}

/// What a successful trigger returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeResponse {
    pub message: String,
}

/// Authorizes callers and runs scrapes on their behalf
pub struct ScrapeService {
    token_digest: String,
    coordinator: Coordinator,
}

impl ScrapeService {
    /// Creates a service accepting exactly `token`
    pub fn new(token: &str, coordinator: Coordinator) -> Self {
        Self {
            token_digest: digest(token),
            coordinator,
        }
    }

    /// Wires up storage, cache and notification backends from configuration
    pub fn from_config(config: &Config) -> Result<Self, ShelfwatchError> {
        let storage = open_storage(&config.storage)?;
        let cache = open_cache(&config.cache)?;
        let notifier = open_notifier(&config.notification);

        let coordinator = Coordinator::new(config.scraper.clone(), storage, cache, notifier);
        Ok(Self::new(&config.auth.token, coordinator))
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Checks a caller-supplied token
    ///
    /// Both sides are hashed first so the comparison always covers two
    /// equal-length digests, whatever the caller sent.
    pub fn authorize(&self, token: &str) -> Result<(), ShelfwatchError> {
        if digest(token) == self.token_digest {
            Ok(())
        } else {
            tracing::warn!("Rejected scrape request with an invalid token");
            Err(ShelfwatchError::Unauthorized)
        }
    }

    /// Runs one scrape for an authorized caller
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeResponse)` - Summary of scraped and updated counts
    /// * `Err(ShelfwatchError::Unauthorized)` - Token mismatch, nothing was done
    /// * `Err(ShelfwatchError::InvalidRequest)` - Bad page limit or proxy
    /// * `Err(_)` - Storage, cache, or HTTP client failure during the run
    pub async fn start_scrape(
        &self,
        token: &str,
        request: ScrapeRequest,
    ) -> Result<ScrapeResponse, ShelfwatchError> {
        self.authorize(token)?;
        request.validate()?;

        let summary = self
            .coordinator
            .run(request.page_limit, request.proxy.as_deref())
            .await?;

        Ok(ScrapeResponse {
            message: summary.message(),
        })
    }
}

fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
