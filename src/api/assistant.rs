//! Assistant backend client: AI-backed shopping-list analysis and
//! alternative-product suggestions.
//!
//! The model invocation lives behind the backend; this client only speaks
//! its JSON contract. It implements [`MatchingDelegate`] so the resolver can
//! treat it interchangeably with the local matcher.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{Result, TrackerError};
use crate::models::{AlternativeProduct, Product};
use crate::shopping_list::{MatchingDelegate, Resolution};

/// Analysis request: the whole list plus a catalog snapshot, one batched call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeListRequest<'a> {
    shopping_list: &'a [String],
    products: &'a [Product],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionsRequest<'a> {
    product_name: &'a str,
}

/// Client for the assistant endpoints of the tracker backend.
pub struct AssistantClient {
    base_url: String,
    client: reqwest::Client,
}

impl AssistantClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Analyze a shopping list against the product snapshot.
    ///
    /// Returns one resolution per input item in input order; the caller
    /// (see [`crate::shopping_list::resolve_with`]) validates the length.
    pub async fn analyze_list(
        &self,
        items: &[String],
        products: &[Product],
    ) -> Result<Vec<Resolution>> {
        let url = format!("{}/analyze-list", self.base_url);
        log::info!("Analyzing shopping list of {} items", items.len());

        let response = self
            .client
            .post(&url)
            .header("User-Agent", "price_tracker/1.0")
            .json(&AnalyzeListRequest {
                shopping_list: items,
                products,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TrackerError::HttpStatus(response.status()));
        }

        Ok(response.json::<Vec<Resolution>>().await?)
    }

    /// Fetch alternative-product suggestions for a product name.
    pub async fn suggest_alternatives(&self, product_name: &str) -> Result<Vec<AlternativeProduct>> {
        let url = format!("{}/suggestions", self.base_url);
        log::info!("Fetching alternatives for {:?}", product_name);

        let response = self
            .client
            .post(&url)
            .header("User-Agent", "price_tracker/1.0")
            .json(&SuggestionsRequest { product_name })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TrackerError::HttpStatus(response.status()));
        }

        Ok(response.json::<Vec<AlternativeProduct>>().await?)
    }
}

impl MatchingDelegate for AssistantClient {
    async fn match_items(&self, items: &[String], catalog: &Catalog) -> Result<Vec<Resolution>> {
        self.analyze_list(items, catalog.products()).await
    }
}

#[cfg(test)]
#[path = "assistant_tests.rs"]
mod tests;
