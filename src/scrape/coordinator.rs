//! Scrape coordinator - main scrape orchestration logic
//!
//! This module ties one scrape run together:
//! - Paginating the listing and extracting products
//! - Reading the previously stored dataset
//! - Deciding which products changed price using the change cache
//! - Persisting the dataset when anything changed
//! - Announcing the run summary

use crate::cache::ChangeCache;
use crate::config::ScraperConfig;
use crate::model::{ProductRecord, UpdateSummary};
use crate::notify::Notifier;
use crate::scrape::fetcher::{HttpFetcher, PageSource};
use crate::scrape::paginator::Paginator;
use crate::storage::Storage;
use crate::ShelfwatchError;
use std::sync::Arc;
use std::time::Instant;

/// Main scrape coordinator structure
pub struct Coordinator {
    scraper: ScraperConfig,
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ChangeCache>,
    notifier: Arc<dyn Notifier>,
}

impl Coordinator {
    /// Creates a coordinator over the given collaborators
    pub fn new(
        scraper: ScraperConfig,
        storage: Arc<dyn Storage>,
        cache: Arc<dyn ChangeCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            scraper,
            storage,
            cache,
            notifier,
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn cache(&self) -> &Arc<dyn ChangeCache> {
        &self.cache
    }

    /// Scrapes pages `1..=page_limit` over HTTP
    ///
    /// `proxy` overrides the configured default proxy for this run only.
    ///
    /// # Returns
    ///
    /// * `Ok(UpdateSummary)` - Run finished; individual page failures are not errors
    /// * `Err(ShelfwatchError)` - HTTP client setup, cache, or storage failed
    pub async fn run(
        &self,
        page_limit: u32,
        proxy: Option<&str>,
    ) -> Result<UpdateSummary, ShelfwatchError> {
        let proxy = proxy.or(self.scraper.proxy.as_deref());
        if proxy.is_some() {
            tracing::info!("Routing page requests through the configured proxy");
        }

        let fetcher = HttpFetcher::new(&self.scraper, proxy)?;
        self.run_with_source(page_limit, &fetcher).await
    }

    /// Runs a scrape against any page source
    pub async fn run_with_source(
        &self,
        page_limit: u32,
        source: &dyn PageSource,
    ) -> Result<UpdateSummary, ShelfwatchError> {
        tracing::info!("Starting scrape of {} pages", page_limit);
        let start_time = Instant::now();

        let products = Paginator::new(source)
            .with_concurrency(self.scraper.max_concurrent_pages as usize)
            .scrape(page_limit)
            .await;

        // The stored dataset is read for visibility only; change detection
        // is driven by the cache.
        let existing = self.storage.load()?;
        tracing::debug!("Previously stored dataset holds {} records", existing.len());

        let updated_count = self.apply_price_changes(&products)?;

        if updated_count > 0 {
            self.storage.save(&products)?;
            tracing::info!("Saved {} records", products.len());
        }

        let summary = UpdateSummary {
            total_scraped: products.len(),
            updated_count,
        };
        self.notifier.send(&summary.message());

        tracing::info!(
            "Scrape completed: {} products, {} updated in {:?}",
            summary.total_scraped,
            summary.updated_count,
            start_time.elapsed()
        );

        Ok(summary)
    }

    /// Writes new and changed prices to the cache, returning how many changed
    fn apply_price_changes(&self, products: &[ProductRecord]) -> Result<usize, ShelfwatchError> {
        let mut updated_count = 0;

        for product in products {
            let key = product.cache_key();
            if self.cache.record_price(&key, &product.price)? {
                tracing::debug!("Price changed for {:?}: {}", product.title, product.price);
                updated_count += 1;
            }
        }

        Ok(updated_count)
    }
}
