//! Core value types: price observations, products, and their wire shapes.
//!
//! Field names follow the JSON format the consuming application already
//! stores: products serialize with `barcode` and `priceHistory` keys, and
//! dates travel as RFC 3339 strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One observed price for a product at a store.
///
/// Entries are immutable after creation; the catalog only ever appends or
/// deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Opaque unique token, unique within a product's history
    pub id: String,
    pub supermarket: String,
    pub price: f64,
    /// Observation timestamp; consumers sort by this when chronology matters
    pub date: DateTime<Utc>,
}

impl PriceEntry {
    /// Creates an entry dated now with a fresh unique id.
    pub fn new(supermarket: &str, price: f64) -> Self {
        Self::with_date(supermarket, price, Utc::now())
    }

    /// Creates an entry with an explicit observation date.
    pub fn with_date(supermarket: &str, price: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: new_entry_id(),
            supermarket: supermarket.to_string(),
            price,
            date,
        }
    }
}

/// Generates an entry id: millisecond timestamp plus a random suffix, so
/// entries created in the same instant still get distinct ids.
fn new_entry_id() -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4().simple())
}

/// One tracked catalog item with its accumulated price history.
///
/// `identifier` is the stable lookup and merge key (see [`crate::identifier`]);
/// it serializes as `barcode` to match the stored JSON format, which predates
/// manual entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "barcode")]
    pub identifier: String,
    pub name: String,
    /// Append-only; insertion order is not guaranteed to be chronological
    #[serde(rename = "priceHistory")]
    pub price_history: Vec<PriceEntry>,
}

/// One user-submitted price observation, before it is keyed and merged.
#[derive(Debug, Clone)]
pub struct Observation {
    /// Present for scanned products, absent for manual entries
    pub barcode: Option<String>,
    pub name: String,
    pub supermarket: String,
    pub price: f64,
}

/// An alternative-product suggestion from the assistant service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeProduct {
    pub name: String,
    pub reason: String,
}
