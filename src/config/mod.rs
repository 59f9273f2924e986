//! Configuration for Shelfwatch
//!
//! Settings come from one TOML file with `[scraper]`, `[auth]`, `[storage]`,
//! `[cache]` and `[notification]` tables. Everything except the access token
//! has a default; values are checked right after parsing.
//!
//! # Example
//!
//! ```no_run
//! use shelfwatch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelfwatch.toml")).unwrap();
//! println!("Listing pages under: {}", config.scraper.base_url);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use types::{
    AuthConfig, CacheBackend, CacheConfig, Config, NotificationConfig, NotificationSink,
    ScraperConfig, StorageBackend, StorageConfig,
};
pub use validation::validate_proxy;
