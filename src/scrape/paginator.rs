//! Walks the listing pages and collects their products
//!
//! Pages can be fetched a few at a time, but results are always assembled
//! in page order, then document order within a page.

use crate::model::ProductRecord;
use crate::scrape::extractor::extract_products;
use crate::scrape::fetcher::PageSource;
use futures::stream::{self, StreamExt};

/// Drives a [`PageSource`] across a page range
pub struct Paginator<'a> {
    source: &'a dyn PageSource,
    max_concurrent_pages: usize,
}

impl<'a> Paginator<'a> {
    /// Creates a sequential paginator over `source`
    pub fn new(source: &'a dyn PageSource) -> Self {
        Self {
            source,
            max_concurrent_pages: 1,
        }
    }

    /// Allows up to `limit` pages in flight at once
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrent_pages = limit.max(1);
        self
    }

    /// Scrapes pages `1..=page_limit`
    ///
    /// A page that cannot be fetched contributes no records; the remaining
    /// pages are still scraped.
    pub async fn scrape(&self, page_limit: u32) -> Vec<ProductRecord> {
        let pages: Vec<Vec<ProductRecord>> = stream::iter(1..=page_limit)
            .map(|page| self.scrape_page(page))
            .buffered(self.max_concurrent_pages)
            .collect()
            .await;

        pages.into_iter().flatten().collect()
    }

    async fn scrape_page(&self, page: u32) -> Vec<ProductRecord> {
        match self.source.fetch_page(page).await {
            Ok(html) => {
                let products = extract_products(&html);
                tracing::debug!("Page {}: {} products", page, products.len());
                products
            }
            Err(e) => {
                tracing::error!("Giving up on page {}: {}", page, e);
                Vec::new()
            }
        }
    }
}
