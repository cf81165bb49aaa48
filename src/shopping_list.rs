//! Shopping-list resolution: matching free-text items against the catalog.
//!
//! Two strategies share one output shape. The delegated strategy hands the
//! whole list plus a catalog snapshot to an external matcher in a single
//! batched call; the local strategy is a deterministic substring matcher
//! that needs no network and backs every delegate failure.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::aggregate;
use crate::catalog::Catalog;
use crate::error::Result;

/// Whether a list item was matched against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "FOUND")]
    Found,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
}

/// Outcome of matching one shopping-list item.
///
/// On [`MatchStatus::NotFound`] only `item_name` and `status` are populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub item_name: String,
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_supermarket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowest_price: Option<f64>,
}

impl Resolution {
    fn not_found(item: &str) -> Self {
        Self {
            item_name: item.to_string(),
            status: MatchStatus::NotFound,
            matched_product_name: None,
            best_supermarket: None,
            lowest_price: None,
        }
    }
}

/// An external matcher that resolves a whole list in one batched call.
///
/// Implementations may be remote and fallible; the resolver treats every
/// failure as recoverable and re-resolves locally.
#[allow(async_fn_in_trait)]
pub trait MatchingDelegate {
    async fn match_items(&self, items: &[String], catalog: &Catalog) -> Result<Vec<Resolution>>;
}

/// The deterministic local strategy packaged as a delegate, for deployments
/// with no external matcher configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMatcher;

impl MatchingDelegate for LocalMatcher {
    async fn match_items(&self, items: &[String], catalog: &Catalog) -> Result<Vec<Resolution>> {
        Ok(resolve_local(items, catalog))
    }
}

/// Resolves every item with the local substring strategy.
///
/// An item matches a product when either normalized name contains the other.
/// Among matches the product with the smallest name-length difference wins;
/// ties go to the first product in catalog order. Items are independent: the
/// same product may satisfy several of them.
pub fn resolve_local(items: &[String], catalog: &Catalog) -> Vec<Resolution> {
    items
        .iter()
        .map(|item| resolve_one(item, catalog))
        .collect()
}

fn resolve_one(item: &str, catalog: &Catalog) -> Resolution {
    let needle = item.trim().to_lowercase();
    if needle.is_empty() {
        return Resolution::not_found(item);
    }

    let best_match = catalog
        .iter()
        .filter(|product| {
            let name = product.name.trim().to_lowercase();
            name.contains(&needle) || needle.contains(&name)
        })
        .min_by_key(|product| {
            product
                .name
                .trim()
                .to_lowercase()
                .chars()
                .count()
                .abs_diff(needle.chars().count())
        });

    match best_match {
        Some(product) => {
            // History is non-empty by catalog invariant
            let best = match aggregate::best_store_for(&product.price_history) {
                Some(best) => best,
                None => return Resolution::not_found(item),
            };
            Resolution {
                item_name: item.to_string(),
                status: MatchStatus::Found,
                matched_product_name: Some(product.name.clone()),
                best_supermarket: Some(best.supermarket),
                lowest_price: Some(best.price),
            }
        }
        None => Resolution::not_found(item),
    }
}

/// Resolves the list through `delegate`, degrading to the local strategy.
///
/// The delegate is skipped outright for an empty list or an empty catalog.
/// A transport error, a reply of the wrong length, or no reply within
/// `timeout` all discard the delegate's answer and re-resolve every item
/// locally — a partial delegate result is never propagated.
pub async fn resolve_with<D: MatchingDelegate>(
    delegate: &D,
    items: &[String],
    catalog: &Catalog,
    timeout: Duration,
) -> Vec<Resolution> {
    if items.is_empty() || catalog.is_empty() {
        return resolve_local(items, catalog);
    }

    match tokio::time::timeout(timeout, delegate.match_items(items, catalog)).await {
        Ok(Ok(resolutions)) if resolutions.len() == items.len() => resolutions,
        Ok(Ok(resolutions)) => {
            log::warn!(
                "Delegate returned {} resolutions for {} items, using local matching",
                resolutions.len(),
                items.len()
            );
            resolve_local(items, catalog)
        }
        Ok(Err(e)) => {
            log::warn!("Delegate failed ({}), using local matching", e);
            resolve_local(items, catalog)
        }
        Err(_) => {
            log::warn!("Delegate timed out after {:?}, using local matching", timeout);
            resolve_local(items, catalog)
        }
    }
}

#[cfg(test)]
#[path = "shopping_list_tests.rs"]
mod tests;
