use crate::config::types::{
    AuthConfig, CacheBackend, CacheConfig, Config, ScraperConfig, StorageBackend, StorageConfig,
};
use crate::ConfigError;
use url::Url;

const MAX_ATTEMPTS_LIMIT: u32 = 10;
const MAX_CONCURRENT_PAGES_LIMIT: u32 = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_auth_config(&config.auth)?;
    validate_storage_config(&config.storage)?;
    validate_cache_config(&config.cache)?;
    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.max_attempts < 1 || config.max_attempts > MAX_ATTEMPTS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be between 1 and {}, got {}",
            MAX_ATTEMPTS_LIMIT, config.max_attempts
        )));
    }

    if config.max_concurrent_pages < 1 || config.max_concurrent_pages > MAX_CONCURRENT_PAGES_LIMIT
    {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-pages must be between 1 and {}, got {}",
            MAX_CONCURRENT_PAGES_LIMIT, config.max_concurrent_pages
        )));
    }

    if let Some(proxy) = &config.proxy {
        validate_proxy(proxy)?;
    }

    Ok(())
}

/// Proxy schemes the HTTP client can route through
const PROXY_SCHEMES: &[&str] = &["http", "https", "socks5", "socks5h"];

/// Validates a proxy URI (shared with per-request overrides)
///
/// `host:port` without a scheme parses as a URL whose scheme is the host,
/// so the scheme is checked explicitly.
pub fn validate_proxy(proxy: &str) -> Result<(), ConfigError> {
    let url = Url::parse(proxy)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid proxy '{}': {}", proxy, e)))?;

    if !PROXY_SCHEMES.contains(&url.scheme()) {
        return Err(ConfigError::InvalidUrl(format!(
            "Invalid proxy '{}': scheme must be one of {}",
            proxy,
            PROXY_SCHEMES.join(", ")
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Invalid proxy '{}': missing host",
            proxy
        )));
    }

    Ok(())
}

fn validate_auth_config(config: &AuthConfig) -> Result<(), ConfigError> {
    if config.token.is_empty() {
        return Err(ConfigError::Validation(
            "auth token cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.backend == StorageBackend::Json && is_blank(config.path.as_deref()) {
        return Err(ConfigError::Validation(
            "storage path is required for the json backend".to_string(),
        ));
    }
    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.backend == CacheBackend::Sqlite && is_blank(config.path.as_deref()) {
        return Err(ConfigError::Validation(
            "cache path is required for the sqlite backend".to_string(),
        ));
    }
    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
