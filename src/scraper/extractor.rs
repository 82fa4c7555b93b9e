//! Field extraction from product detail pages
//!
//! This module turns raw page HTML into a fixed-shape [`ProductRecord`].
//! Every field has its own independent extraction rule; a rule that finds
//! nothing falls back to that field's documented default instead of failing
//! the record. Extraction is a pure function of the page content and never
//! raises on malformed markup.

use crate::asin::Asin;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Default rating when the rating element is absent
pub const NO_RATING: &str = "No rating yet";

/// Default review count when the review-count element is absent
pub const NO_REVIEWS: &str = "No reviews yet";

/// Status marker placed in the fitment slot when the fetch itself failed
pub const NOT_FOUND: &str = "Not found";

/// One row of the final report: ten fields, always populated
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub name: String,
    pub asin: String,
    pub rating: String,
    pub price: String,
    pub product_url: String,
    pub image_count: usize,
    pub review_count: String,
    pub breadcrumbs: String,
    pub best_seller_rank: String,
    pub make_sure_fits: String,
}

impl ProductRecord {
    /// True when this record marks a total fetch failure
    pub fn is_not_found(&self) -> bool {
        self.make_sure_fits == NOT_FOUND
    }
}

/// Extracts a product record from page HTML
///
/// Each field is looked up independently; missing structure degrades that
/// field to its default without affecting the others. Running this twice on
/// the same content yields the same record.
///
/// # Arguments
///
/// * `html` - Raw page content, possibly malformed or partial
/// * `asin` - The identifier this page was fetched for
/// * `product_url` - The canonical detail-page URL
pub fn extract_product(html: &str, asin: &Asin, product_url: &str) -> ProductRecord {
    let document = Html::parse_document(html);

    ProductRecord {
        name: extract_name(&document).unwrap_or_default(),
        asin: asin.as_str().to_string(),
        rating: extract_rating(&document).unwrap_or_else(|| NO_RATING.to_string()),
        price: extract_price(&document).unwrap_or_default(),
        product_url: product_url.to_string(),
        image_count: count_images(&document),
        review_count: extract_review_count(&document).unwrap_or_else(|| NO_REVIEWS.to_string()),
        breadcrumbs: extract_breadcrumbs(&document).unwrap_or_default(),
        best_seller_rank: extract_best_seller_rank(&document).unwrap_or_default(),
        make_sure_fits: if has_fitment_widget(&document) {
            "Yes".to_string()
        } else {
            "No".to_string()
        },
    }
}

/// Builds the degraded record used when no content was fetched at all
///
/// Every field takes its failure default except the identifier and URL; the
/// fitment slot carries the "Not found" status marker.
pub fn not_found_record(asin: &Asin, product_url: &str) -> ProductRecord {
    ProductRecord {
        name: String::new(),
        asin: asin.as_str().to_string(),
        rating: NO_RATING.to_string(),
        price: String::new(),
        product_url: product_url.to_string(),
        image_count: 0,
        review_count: NO_REVIEWS.to_string(),
        breadcrumbs: String::new(),
        best_seller_rank: String::new(),
        make_sure_fits: NOT_FOUND.to_string(),
    }
}

/// Returns the trimmed text of the first match of `selector`, if any
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_name(document: &Html) -> Option<String> {
    first_text(document, "span#productTitle")
}

fn extract_rating(document: &Html) -> Option<String> {
    first_text(document, "span[data-hook='rating-out-of-text']")
}

fn extract_price(document: &Html) -> Option<String> {
    first_text(
        document,
        "div.a-section.a-spacing-none.aok-align-center.aok-relative span.aok-offscreen",
    )
}

/// Counts distinct image URLs on the page
///
/// Thumbnail-strip images expose their URL under one of three attributes
/// (checked in priority order) and the main image under one of two. The
/// same URL reachable through different attributes counts once.
fn count_images(document: &Html) -> usize {
    let mut image_urls: HashSet<String> = HashSet::new();

    if let Ok(thumb_selector) = Selector::parse("#altImages img") {
        for img in document.select(&thumb_selector) {
            let url = img
                .value()
                .attr("src")
                .or_else(|| img.value().attr("data-src"))
                .or_else(|| img.value().attr("data-image-src"));
            if let Some(url) = url {
                image_urls.insert(url.to_string());
            }
        }
    }

    if let Ok(main_selector) = Selector::parse("#landingImage") {
        if let Some(img) = document.select(&main_selector).next() {
            let url = img
                .value()
                .attr("src")
                .or_else(|| img.value().attr("data-old-hires"));
            if let Some(url) = url {
                image_urls.insert(url.to_string());
            }
        }
    }

    image_urls.len()
}

/// Extracts the review count: first token of the element text, commas stripped
fn extract_review_count(document: &Html) -> Option<String> {
    let text = first_text(document, "span[data-hook='total-review-count']")?;
    text.split_whitespace()
        .next()
        .map(|token| token.replace(',', ""))
}

/// Joins the breadcrumb trail with " > "
fn extract_breadcrumbs(document: &Html) -> Option<String> {
    let selector =
        Selector::parse("#wayfinding-breadcrumbs_feature_div ul.a-unordered-list li a").ok()?;

    let crumbs: Vec<String> = document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect();

    if crumbs.is_empty() {
        None
    } else {
        Some(crumbs.join(" > "))
    }
}

/// Extracts the best-seller rank digit group
///
/// Two detail-table containers are scanned in priority order. Within a
/// container, the first child whose text mentions the rank label is
/// searched for a "#" followed by a digit group (thousands separators
/// kept). The first container that yields a match wins.
fn extract_best_seller_rank(document: &Html) -> Option<String> {
    let rank_pattern = Regex::new(r"#([\d,]+)").ok()?;

    for container in [
        "#productDetails_detailBullets_sections1 tr",
        "#detailBulletsWrapper_feature_div",
    ] {
        let selector = match Selector::parse(container) {
            Ok(s) => s,
            Err(_) => continue,
        };

        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            if !text.contains("Best Sellers Rank") {
                continue;
            }

            if let Some(captures) = rank_pattern.captures(&text) {
                return Some(captures[1].to_string());
            }
        }
    }

    None
}

fn has_fitment_widget(document: &Html) -> bool {
    Selector::parse("#automotive-pf-primary-view-default-make-sure-this-fits")
        .ok()
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asin() -> Asin {
        Asin::parse("B07X1234YZ").unwrap()
    }

    fn url() -> String {
        "https://www.amazon.com/dp/B07X1234YZ".to_string()
    }

    fn extract(html: &str) -> ProductRecord {
        extract_product(html, &asin(), &url())
    }

    #[test]
    fn test_extract_name() {
        let html = r#"<span id="productTitle">  Cordless Drill Kit  </span>"#;
        assert_eq!(extract(html).name, "Cordless Drill Kit");
    }

    #[test]
    fn test_name_default_empty() {
        assert_eq!(extract("<html></html>").name, "");
    }

    #[test]
    fn test_extract_rating() {
        let html = r#"<span data-hook="rating-out-of-text">4.6 out of 5</span>"#;
        assert_eq!(extract(html).rating, "4.6 out of 5");
    }

    #[test]
    fn test_rating_default() {
        assert_eq!(extract("<html></html>").rating, NO_RATING);
    }

    #[test]
    fn test_extract_price() {
        let html = r#"<div class="a-section a-spacing-none aok-align-center aok-relative">
            <span class="aok-offscreen">$59.99</span></div>"#;
        assert_eq!(extract(html).price, "$59.99");
    }

    #[test]
    fn test_price_default_empty() {
        assert_eq!(extract("<html></html>").price, "");
    }

    #[test]
    fn test_image_count_thumbnails_and_main() {
        let html = r#"
            <div id="altImages">
                <img src="https://img.test/1.jpg">
                <img data-src="https://img.test/2.jpg">
                <img data-image-src="https://img.test/3.jpg">
            </div>
            <img id="landingImage" src="https://img.test/main.jpg">
        "#;
        assert_eq!(extract(html).image_count, 4);
    }

    #[test]
    fn test_image_count_deduplicates_across_attributes() {
        // Same URL via src and data-src counts once.
        let html = r#"
            <div id="altImages">
                <img src="https://img.test/same.jpg">
                <img data-src="https://img.test/same.jpg">
            </div>
        "#;
        assert_eq!(extract(html).image_count, 1);
    }

    #[test]
    fn test_image_count_main_image_overlaps_thumbnail() {
        let html = r#"
            <div id="altImages"><img src="https://img.test/hero.jpg"></div>
            <img id="landingImage" data-old-hires="https://img.test/hero.jpg">
        "#;
        assert_eq!(extract(html).image_count, 1);
    }

    #[test]
    fn test_image_count_src_priority_over_data_src() {
        let html = r#"
            <div id="altImages">
                <img src="https://img.test/a.jpg" data-src="https://img.test/b.jpg">
            </div>
        "#;
        assert_eq!(extract(html).image_count, 1);
    }

    #[test]
    fn test_image_count_default_zero() {
        assert_eq!(extract("<html></html>").image_count, 0);
    }

    #[test]
    fn test_extract_review_count_strips_separators() {
        let html = r#"<span data-hook="total-review-count">12,345 ratings</span>"#;
        assert_eq!(extract(html).review_count, "12345");
    }

    #[test]
    fn test_review_count_default() {
        assert_eq!(extract("<html></html>").review_count, NO_REVIEWS);
    }

    #[test]
    fn test_extract_breadcrumbs() {
        let html = r#"
            <div id="wayfinding-breadcrumbs_feature_div">
                <ul class="a-unordered-list">
                    <li><a> Tools </a></li>
                    <li><a>Power Tools</a></li>
                    <li><a>Drills</a></li>
                </ul>
            </div>
        "#;
        assert_eq!(extract(html).breadcrumbs, "Tools > Power Tools > Drills");
    }

    #[test]
    fn test_breadcrumbs_default_empty() {
        assert_eq!(extract("<html></html>").breadcrumbs, "");
    }

    #[test]
    fn test_rank_from_detail_table() {
        let html = r#"
            <table id="productDetails_detailBullets_sections1">
                <tr><td>Weight</td><td>2 pounds</td></tr>
                <tr><td>Best Sellers Rank</td><td>#1,234 in Power Tools</td></tr>
            </table>
        "#;
        assert_eq!(extract(html).best_seller_rank, "1,234");
    }

    #[test]
    fn test_rank_from_detail_bullets_fallback() {
        let html = r#"
            <div id="detailBulletsWrapper_feature_div">
                Best Sellers Rank: #567 in Tools
            </div>
        "#;
        assert_eq!(extract(html).best_seller_rank, "567");
    }

    #[test]
    fn test_rank_first_container_wins() {
        let html = r#"
            <table id="productDetails_detailBullets_sections1">
                <tr><td>Best Sellers Rank #111 in A</td></tr>
            </table>
            <div id="detailBulletsWrapper_feature_div">
                Best Sellers Rank: #222 in B
            </div>
        "#;
        assert_eq!(extract(html).best_seller_rank, "111");
    }

    #[test]
    fn test_rank_requires_label() {
        let html = r#"
            <div id="detailBulletsWrapper_feature_div">Item model number #42</div>
        "#;
        assert_eq!(extract(html).best_seller_rank, "");
    }

    #[test]
    fn test_rank_default_empty() {
        assert_eq!(extract("<html></html>").best_seller_rank, "");
    }

    #[test]
    fn test_fitment_widget_present() {
        let html = r#"<div id="automotive-pf-primary-view-default-make-sure-this-fits"></div>"#;
        assert_eq!(extract(html).make_sure_fits, "Yes");
    }

    #[test]
    fn test_fitment_widget_absent() {
        assert_eq!(extract("<html></html>").make_sure_fits, "No");
    }

    #[test]
    fn test_malformed_html_never_panics() {
        let record = extract("<div><span id=\"productTitle\">Broken<div></span>");
        assert_eq!(record.asin, "B07X1234YZ");
        assert_eq!(record.product_url, url());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = r#"
            <span id="productTitle">Widget</span>
            <span data-hook="rating-out-of-text">4.2 out of 5</span>
            <div id="altImages"><img src="https://img.test/1.jpg"></div>
        "#;
        let first = extract(html);
        let second = extract(html);
        assert_eq!(first, second);
    }

    #[test]
    fn test_partial_page_mixes_values_and_defaults() {
        let html = r#"<span id="productTitle">Widget</span>"#;
        let record = extract(html);

        assert_eq!(record.name, "Widget");
        assert_eq!(record.rating, NO_RATING);
        assert_eq!(record.price, "");
        assert_eq!(record.review_count, NO_REVIEWS);
        assert_eq!(record.make_sure_fits, "No");
        assert!(!record.is_not_found());
    }

    #[test]
    fn test_not_found_record_shape() {
        let record = not_found_record(&asin(), &url());

        assert_eq!(record.name, "");
        assert_eq!(record.asin, "B07X1234YZ");
        assert_eq!(record.rating, NO_RATING);
        assert_eq!(record.price, "");
        assert_eq!(record.product_url, url());
        assert_eq!(record.image_count, 0);
        assert_eq!(record.review_count, NO_REVIEWS);
        assert_eq!(record.breadcrumbs, "");
        assert_eq!(record.best_seller_rank, "");
        assert_eq!(record.make_sure_fits, NOT_FOUND);
        assert!(record.is_not_found());
    }
}
