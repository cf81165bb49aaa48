//! Supermarket price tracker core.
//!
//! Records price observations per product (scanned barcode or manual entry),
//! derives lowest/latest/highest views over each product's history, and
//! matches free-text shopping lists against the catalog to find the cheapest
//! known store per item — via an external assistant delegate when configured,
//! with a deterministic local fallback.

pub mod aggregate;
pub mod api;
pub mod catalog;
pub mod error;
pub mod identifier;
pub mod models;
pub mod shopping_list;
pub mod storage;

// Re-export commonly used items
pub use aggregate::{best_store_for, highest, latest, lowest, BestPrice};
pub use api::assistant::AssistantClient;
pub use api::product_info::{
    fetch_product_name, fetch_product_name_async, fetch_product_name_from,
    fetch_product_name_from_async,
};
pub use catalog::Catalog;
pub use error::{Result, TrackerError};
pub use identifier::{identifier_for, normalized_name, MANUAL_PREFIX};
pub use models::{AlternativeProduct, Observation, PriceEntry, Product};
pub use shopping_list::{
    resolve_local, resolve_with, LocalMatcher, MatchStatus, MatchingDelegate, Resolution,
};
pub use storage::{CatalogStore, JsonStore, SqliteStore};
