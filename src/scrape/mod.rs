//! Scrape module for listing-page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with a fixed retry policy and optional proxy
//! - Product extraction from listing markup
//! - Pagination across a page range
//! - Overall run coordination and change detection

mod coordinator;
mod extractor;
mod fetcher;
mod paginator;
mod retry;

pub use coordinator::Coordinator;
pub use extractor::extract_products;
pub use fetcher::{build_http_client, page_url, FetchError, HttpFetcher, PageSource};
pub use paginator::Paginator;
pub use retry::RetryPolicy;
