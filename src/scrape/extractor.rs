//! Product extraction from listing-page markup
//!
//! The listing markup follows one fixed WooCommerce theme layout:
//!
//! ```text
//! div#mf-shop-content
//!   ul
//!     li.product ...
//!       div.product-inner
//!         div.mf-product-thumbnail > a > img[data-lazy-src]
//!         div.mf-product-details
//!           div.mf-product-content > h2 > a          (title)
//!           div.mf-product-price-box
//!             ins                                    (sale price)
//!             span.woocommerce-Price-amount.amount   (regular price)
//! ```
//!
//! Every step down this tree is optional. A missing node empties the field
//! it leads to and nothing else.

use crate::model::{ProductRecord, PRICE_UNAVAILABLE};
use scraper::{ElementRef, Html, Selector};

/// Marker identifying list items that hold a product
const ITEM_CLASS_MARKER: &str = "product";

/// Extracts every product on a listing page, in document order
///
/// Returns an empty list when the page has no product container, which is
/// what a page past the end of the listing looks like.
///
/// # Example
///
/// ```
/// use shelfwatch::scrape::extract_products;
///
/// let html = r#"<div id="mf-shop-content"><ul><li class="product">
///     <div class="product-inner"><div class="mf-product-details">
///       <div class="mf-product-content"><h2><a>Mirror</a></h2></div>
///       <div class="mf-product-price-box"><ins>$4.00</ins></div>
///     </div></div></li></ul></div>"#;
/// let products = extract_products(html);
/// assert_eq!(products[0].title, "Mirror");
/// assert_eq!(products[0].price, "$4.00");
/// ```
pub fn extract_products(html: &str) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);

    let Some(container) = select_first_in_document(&document, "div#mf-shop-content") else {
        return Vec::new();
    };

    let Ok(item_selector) = Selector::parse("ul li") else {
        return Vec::new();
    };

    container
        .select(&item_selector)
        .filter(is_product_item)
        .filter_map(extract_item)
        .collect()
}

/// Item nodes are matched by substring so compound class lists still match
fn is_product_item(item: &ElementRef<'_>) -> bool {
    item.value()
        .attr("class")
        .is_some_and(|class| class.contains(ITEM_CLASS_MARKER))
}

/// Builds the record for one item
///
/// Items without the inner product wrapper are not listings (category
/// tiles, placeholders) and produce no record.
fn extract_item(item: ElementRef<'_>) -> Option<ProductRecord> {
    let inner = select_first(item, "div.product-inner")?;
    let details = select_first(inner, "div.mf-product-details");

    Some(ProductRecord {
        title: details.and_then(extract_title).unwrap_or_default(),
        price: details.and_then(extract_price).unwrap_or_default(),
        image_url: extract_image_url(inner),
    })
}

fn extract_title(details: ElementRef<'_>) -> Option<String> {
    let content = select_first(details, "div.mf-product-content")?;
    let heading = select_first(content, "h2")?;
    let link = select_first(heading, "a")?;
    Some(flat_text(link))
}

/// Sale price first, then the regular amount, then the "N/A" sentinel
///
/// Returns `None` only when the price box itself is missing.
fn extract_price(details: ElementRef<'_>) -> Option<String> {
    let price_box = select_first(details, "div.mf-product-price-box")?;

    let price = select_first(price_box, "ins")
        .or_else(|| select_first(price_box, "span.woocommerce-Price-amount.amount"))
        .map(flat_text)
        .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string());

    Some(price)
}

fn extract_image_url(inner: ElementRef<'_>) -> Option<String> {
    let thumbnail = select_first(inner, "div.mf-product-thumbnail")?;
    let link = select_first(thumbnail, "a")?;
    let image = select_first(link, "img")?;
    image.value().attr("data-lazy-src").map(str::to_string)
}

/// Text of every descendant fragment, each trimmed, joined without separators
///
/// Prices are split across nested spans (`<bdi><span>$</span>9.99</bdi>`),
/// so joining trimmed fragments directly gives `$9.99`.
fn flat_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

fn select_first_in_document<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}
