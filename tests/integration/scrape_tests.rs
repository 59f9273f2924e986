//! Integration tests for the scraper
//!
//! These tests use wiremock to create mock listing servers and test
//! the full scrape cycle end-to-end.

use shelfwatch::api::{ScrapeRequest, ScrapeService};
use shelfwatch::cache::{ChangeCache, MemoryCache};
use shelfwatch::config::{parse_config, ScraperConfig};
use shelfwatch::model::ProductRecord;
use shelfwatch::notify::MemoryNotifier;
use shelfwatch::scrape::{Coordinator, FetchError, HttpFetcher, PageSource};
use shelfwatch::storage::{Storage, StorageResult};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "secure_token_123";

/// Storage double that remembers every save
#[derive(Default)]
struct RecordingStorage {
    saves: Mutex<Vec<Vec<ProductRecord>>>,
}

impl Storage for RecordingStorage {
    fn save(&self, records: &[ProductRecord]) -> StorageResult<()> {
        self.saves.lock().unwrap().push(records.to_vec());
        Ok(())
    }

    fn load(&self) -> StorageResult<Vec<ProductRecord>> {
        Ok(self.saves.lock().unwrap().last().cloned().unwrap_or_default())
    }
}

/// Scraper settings pointed at the mock server, with no retry pause
fn scraper_config(server: &MockServer) -> ScraperConfig {
    ScraperConfig {
        base_url: format!("{}/shop/page/", server.uri()),
        timeout_secs: 5,
        retry_delay_secs: 0,
        ..ScraperConfig::default()
    }
}

/// Renders one listing page the way the shop theme does
fn listing_page(products: &[(&str, &str)]) -> String {
    let items: String = products
        .iter()
        .map(|(title, price)| {
            format!(
                r#"<li class="product type-product instock has-post-thumbnail">
                  <div class="product-inner clearfix">
                    <div class="mf-product-thumbnail">
                      <a href="/product/{slug}/"><img src="data:image/svg+xml," data-lazy-src="https://cdn.example.com/{slug}.jpg"></a>
                    </div>
                    <div class="mf-product-details">
                      <div class="mf-product-content">
                        <h2 class="woo-loop-product__title"><a href="/product/{slug}/">{title}</a></h2>
                      </div>
                      <div class="mf-product-price-box">
                        <span class="price"><span class="woocommerce-Price-amount amount"><bdi><span class="woocommerce-Price-currencySymbol">₹</span>{price}</bdi></span></span>
                      </div>
                    </div>
                  </div>
                </li>"#,
                slug = title.to_lowercase().replace(' ', "-"),
                title = title,
                price = price
            )
        })
        .collect();

    format!(
        r#"<html><head><title>Shop</title></head><body>
           <div id="mf-shop-content" class="mf-shop-content"><ul class="products columns-4">{}</ul></div>
           </body></html>"#,
        items
    )
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/shop/page/{}/", page)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_with_failing_second_page() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        listing_page(&[
            ("Dental Mirror", "150.00"),
            ("Probe Set", "420.00"),
            ("Cotton Rolls", "99.00"),
        ]),
    )
    .await;

    // Page 2 is down for every attempt
    Mock::given(method("GET"))
        .and(path("/shop/page/2/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let storage = Arc::new(RecordingStorage::default());
    let cache = Arc::new(MemoryCache::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let coordinator = Coordinator::new(
        scraper_config(&mock_server),
        storage.clone(),
        cache.clone(),
        notifier.clone(),
    );
    let service = ScrapeService::new(TOKEN, coordinator);

    let response = service
        .start_scrape(TOKEN, ScrapeRequest::new(2))
        .await
        .expect("Scrape failed");

    assert_eq!(response.message, "Scraped 3 products. Updated 3 products.");

    let saves = storage.saves.lock().unwrap();
    assert_eq!(saves.len(), 1, "dataset should be saved exactly once");
    assert_eq!(saves[0].len(), 3);
    assert_eq!(saves[0][0].title, "Dental Mirror");
    assert_eq!(saves[0][0].price, "₹150.00");
    assert_eq!(
        saves[0][0].image_url.as_deref(),
        Some("https://cdn.example.com/dental-mirror.jpg")
    );

    assert_eq!(
        notifier.messages(),
        vec!["Scraped 3 products. Updated 3 products."]
    );
    assert_eq!(
        cache.get("Probe Set_price").unwrap().as_deref(),
        Some("₹420.00")
    );
}

#[tokio::test]
async fn test_unauthorized_request_never_fetches() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, listing_page(&[("Gloves", "10.00")])).await;

    let storage = Arc::new(RecordingStorage::default());
    let notifier = Arc::new(MemoryNotifier::new());
    let coordinator = Coordinator::new(
        scraper_config(&mock_server),
        storage.clone(),
        Arc::new(MemoryCache::new()),
        notifier.clone(),
    );
    let service = ScrapeService::new(TOKEN, coordinator);

    let err = service
        .start_scrape("not-the-token", ScrapeRequest::new(1))
        .await
        .expect_err("bad token must be rejected");

    assert!(err.is_unauthorized());
    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert!(requests.is_empty());
    assert!(storage.saves.lock().unwrap().is_empty());
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_file_backends_across_runs() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        1,
        listing_page(&[("Bib", "5.00"), ("Tray", "35.00")]),
    )
    .await;
    mount_page(
        &mock_server,
        2,
        "<html><body><p>No products were found.</p></body></html>".to_string(),
    )
    .await;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let data_path = dir.path().join("scraped_data.json");
    let cache_path = dir.path().join("price_cache.db");

    let config = parse_config(&format!(
        r#"
[scraper]
base-url = "{}/shop/page/"
retry-delay-secs = 0

[auth]
token = "{}"

[storage]
backend = "json"
path = "{}"

[cache]
backend = "sqlite"
path = "{}"

[notification]
sink = "memory"
"#,
        mock_server.uri(),
        TOKEN,
        data_path.display(),
        cache_path.display()
    ))
    .expect("Failed to parse config");

    let service = ScrapeService::from_config(&config).expect("Failed to build service");

    let first = service
        .start_scrape(TOKEN, ScrapeRequest::new(2))
        .await
        .expect("First scrape failed");
    assert_eq!(first.message, "Scraped 2 products. Updated 2 products.");

    let stored = std::fs::read_to_string(&data_path).expect("dataset file written");
    let json: serde_json::Value = serde_json::from_str(&stored).expect("valid JSON");
    assert_eq!(json[0]["product_title"], "Bib");
    assert_eq!(json[1]["product_price"], "₹35.00");

    // Same prices again: nothing is updated
    let second = service
        .start_scrape(TOKEN, ScrapeRequest::new(2))
        .await
        .expect("Second scrape failed");
    assert_eq!(second.message, "Scraped 2 products. Updated 0 products.");

    // A fresh service over the same files still remembers the prices
    let reopened = ScrapeService::from_config(&config).expect("Failed to reopen service");
    assert_eq!(
        reopened.coordinator().cache().entry_count().unwrap(),
        2
    );
    assert_eq!(
        reopened.coordinator().storage().load().unwrap().len(),
        2
    );
}

#[tokio::test]
async fn test_fetcher_returns_page_markup() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop/page/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>page three</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&scraper_config(&mock_server), None).unwrap();
    let body = fetcher.fetch_page(3).await.expect("fetch failed");

    assert_eq!(body, "<html>page three</html>");
}

#[tokio::test]
async fn test_fetcher_retries_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop/page/1/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&scraper_config(&mock_server), None).unwrap();
    let err = fetcher.fetch_page(1).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_fetcher_recovers_on_later_attempt() {
    let mock_server = MockServer::start().await;

    // First request fails, then the mock is exhausted and the next one wins
    Mock::given(method("GET"))
        .and(path("/shop/page/1/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 1, listing_page(&[("Floss", "12.00")])).await;

    let fetcher = HttpFetcher::new(&scraper_config(&mock_server), None).unwrap();
    let body = fetcher.fetch_page(1).await.expect("second attempt should succeed");

    assert!(body.contains("Floss"));
}

#[tokio::test]
async fn test_fetcher_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shop/page/1/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let config = ScraperConfig {
        timeout_secs: 1,
        max_attempts: 1,
        ..scraper_config(&mock_server)
    };
    let fetcher = HttpFetcher::new(&config, None).unwrap();
    let err = fetcher.fetch_page(1).await.unwrap_err();

    assert!(matches!(err, FetchError::Timeout { .. }));
}

#[tokio::test]
async fn test_concurrent_pages_keep_page_order() {
    let mock_server = MockServer::start().await;

    // Earlier pages answer slower than later ones
    for (page, delay_ms, title) in [(1, 300, "One"), (2, 150, "Two"), (3, 0, "Three")] {
        Mock::given(method("GET"))
            .and(path(format!("/shop/page/{}/", page)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_page(&[(title, "1.00")]))
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&mock_server)
            .await;
    }

    let config = ScraperConfig {
        max_concurrent_pages: 3,
        ..scraper_config(&mock_server)
    };
    let storage = Arc::new(RecordingStorage::default());
    let coordinator = Coordinator::new(
        config,
        storage.clone(),
        Arc::new(MemoryCache::new()),
        Arc::new(MemoryNotifier::new()),
    );

    let summary = coordinator.run(3, None).await.expect("Scrape failed");
    assert_eq!(summary.total_scraped, 3);

    let saves = storage.saves.lock().unwrap();
    let titles: Vec<&str> = saves[0].iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two", "Three"]);
}

/// Settings whose listing host only resolves through a proxy
fn proxied_config(configured_proxy: &str) -> ScraperConfig {
    ScraperConfig {
        base_url: "http://shop.invalid/shop/page/".to_string(),
        timeout_secs: 5,
        max_attempts: 1,
        retry_delay_secs: 0,
        proxy: Some(configured_proxy.to_string()),
        ..ScraperConfig::default()
    }
}

async fn mount_proxied_page(proxy: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/shop/page/1/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing_page(&[("Scaler", "75.00")])),
        )
        .expect(1)
        .mount(proxy)
        .await;
}

#[tokio::test]
async fn test_request_proxy_overrides_configured_proxy() {
    let proxy = MockServer::start().await;
    mount_proxied_page(&proxy).await;

    // nothing listens on the configured proxy
    let coordinator = Coordinator::new(
        proxied_config("http://127.0.0.1:9"),
        Arc::new(RecordingStorage::default()),
        Arc::new(MemoryCache::new()),
        Arc::new(MemoryNotifier::new()),
    );

    let summary = coordinator
        .run(1, Some(&proxy.uri()))
        .await
        .expect("Scrape failed");
    assert_eq!(summary.total_scraped, 1);

    let requests = proxy.received_requests().await.unwrap();
    let urls: Vec<String> = requests.iter().map(|r| r.url.to_string()).collect();
    assert_eq!(urls, vec!["http://shop.invalid/shop/page/1/"]);
}

#[tokio::test]
async fn test_configured_proxy_used_without_override() {
    let proxy = MockServer::start().await;
    mount_proxied_page(&proxy).await;

    let coordinator = Coordinator::new(
        proxied_config(&proxy.uri()),
        Arc::new(RecordingStorage::default()),
        Arc::new(MemoryCache::new()),
        Arc::new(MemoryNotifier::new()),
    );

    let summary = coordinator.run(1, None).await.expect("Scrape failed");
    assert_eq!(summary.total_scraped, 1);

    let requests = proxy.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.host_str(), Some("shop.invalid"));
}
