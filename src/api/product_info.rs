//! Open Food Facts client: resolves a scanned barcode to a product name.
//!
//! Called before registering a newly scanned item whose name is unknown. A
//! miss is an expected outcome, not a transport failure: it maps to
//! [`TrackerError::ProductInfoNotFound`] so the caller can offer manual
//! entry instead.

use serde::Deserialize;

use crate::error::{Result, TrackerError};

/// Open Food Facts API base URL
const OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org";

/// Product lookup response (only the name field is requested)
#[derive(Debug, Deserialize)]
struct ProductInfoResponse {
    #[serde(default)]
    product: Option<ProductInfo>,
}

#[derive(Debug, Deserialize)]
struct ProductInfo {
    #[serde(default)]
    product_name: Option<String>,
}

/// Look up a product name by barcode (blocking).
pub fn fetch_product_name(barcode: &str) -> Result<String> {
    fetch_product_name_from(OPEN_FOOD_FACTS_URL, barcode)
}

/// Look up a product name by barcode against an explicit base URL (blocking).
pub fn fetch_product_name_from(base_url: &str, barcode: &str) -> Result<String> {
    let url = lookup_url(base_url, barcode);
    log::info!("Looking up barcode {}", barcode);

    let response = reqwest::blocking::Client::new()
        .get(&url)
        .header("User-Agent", "price_tracker/1.0")
        .send()?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(TrackerError::ProductInfoNotFound(barcode.to_string()));
    }
    if !response.status().is_success() {
        return Err(TrackerError::HttpStatus(response.status()));
    }

    name_from_response(response.json::<ProductInfoResponse>()?, barcode)
}

/// Look up a product name by barcode (async).
pub async fn fetch_product_name_async(barcode: &str) -> Result<String> {
    fetch_product_name_from_async(OPEN_FOOD_FACTS_URL, barcode).await
}

/// Look up a product name by barcode against an explicit base URL (async).
pub async fn fetch_product_name_from_async(base_url: &str, barcode: &str) -> Result<String> {
    let url = lookup_url(base_url, barcode);
    log::info!("Looking up barcode {}", barcode);

    let response = reqwest::Client::new()
        .get(&url)
        .header("User-Agent", "price_tracker/1.0")
        .send()
        .await?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(TrackerError::ProductInfoNotFound(barcode.to_string()));
    }
    if !response.status().is_success() {
        return Err(TrackerError::HttpStatus(response.status()));
    }

    name_from_response(response.json::<ProductInfoResponse>().await?, barcode)
}

fn lookup_url(base_url: &str, barcode: &str) -> String {
    format!(
        "{}/api/v2/product/{}?fields=product_name",
        base_url,
        urlencoding::encode(barcode)
    )
}

/// A present but empty `product_name` counts as "no info available".
fn name_from_response(body: ProductInfoResponse, barcode: &str) -> Result<String> {
    body.product
        .and_then(|p| p.product_name)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| TrackerError::ProductInfoNotFound(barcode.to_string()))
}

#[cfg(test)]
#[path = "product_info_tests.rs"]
mod tests;
