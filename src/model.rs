//! Product records and run summaries
//!
//! The serialized field names match the dataset files written by earlier
//! versions of the scraper, so a stored file can be loaded unchanged.

use serde::{Deserialize, Serialize};

/// Literal stored when a price box holds neither a sale nor a regular price
pub const PRICE_UNAVAILABLE: &str = "N/A";

/// One product as it appeared on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product title, empty when the heading link is missing
    #[serde(rename = "product_title")]
    pub title: String,

    /// Price exactly as rendered, currency symbol included
    #[serde(rename = "product_price")]
    pub price: String,

    /// Lazy-load image source, absent when the thumbnail chain is missing
    #[serde(rename = "path_to_image")]
    pub image_url: Option<String>,
}

impl ProductRecord {
    /// Key under which this product's last seen price is cached
    pub fn cache_key(&self) -> String {
        format!("{}_price", self.title)
    }
}

/// Counts reported at the end of a scrape run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateSummary {
    pub total_scraped: usize,
    pub updated_count: usize,
}

impl UpdateSummary {
    /// Human-readable summary used for notifications and trigger responses
    pub fn message(&self) -> String {
        format!(
            "Scraped {} products. Updated {} products.",
            self.total_scraped, self.updated_count
        )
    }
}
