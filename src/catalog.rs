//! The product catalog: an insertion-ordered collection of products keyed by
//! identifier.
//!
//! Every mutating operation returns a fresh snapshot and leaves the receiver
//! untouched, so a rejected observation can never leak partial state and a
//! caller holding the previous snapshot keeps a consistent view. Persisting
//! a snapshot is the caller's job (see [`crate::storage`]).

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::identifier::identifier_for;
use crate::models::{Observation, PriceEntry, Product};

/// An in-memory catalog snapshot.
///
/// Serializes as a plain JSON array of products, the same shape the
/// persistence providers store. Iteration order is insertion order, which
/// the shopping-list resolver relies on for deterministic tie-breaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from already-keyed products, e.g. a loaded snapshot.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Looks up a product by identifier.
    pub fn find(&self, identifier: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.identifier == identifier)
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of tracked products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate over all products.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Merges one observation into the catalog, returning the new snapshot.
    ///
    /// Creates the product on first sight of its identifier, otherwise
    /// appends to its history. For scanned products a strictly longer
    /// incoming name replaces the stored one (longer names carry more
    /// detail); manual entries never rename, because there the name is the
    /// identity itself.
    ///
    /// Fails with [`TrackerError::Validation`] on a non-positive or
    /// non-finite price, or a blank name or supermarket. A rejected
    /// observation changes nothing.
    pub fn upsert(&self, observation: &Observation) -> Result<Catalog> {
        let name = observation.name.trim();
        let supermarket = observation.supermarket.trim();
        if name.is_empty() {
            return Err(TrackerError::Validation(
                "product name must not be empty".to_string(),
            ));
        }
        if supermarket.is_empty() {
            return Err(TrackerError::Validation(
                "supermarket must not be empty".to_string(),
            ));
        }
        if !observation.price.is_finite() || observation.price <= 0.0 {
            return Err(TrackerError::Validation(format!(
                "price must be a positive amount, got {}",
                observation.price
            )));
        }

        let scanned = observation
            .barcode
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty());
        let identifier = identifier_for(observation.barcode.as_deref(), name);
        let entry = PriceEntry::new(supermarket, observation.price);

        let mut next = self.clone();
        match next.products.iter_mut().find(|p| p.identifier == identifier) {
            Some(product) => {
                if scanned && name.chars().count() > product.name.chars().count() {
                    log::debug!("Refining name {:?} -> {:?}", product.name, name);
                    product.name = name.to_string();
                }
                product.price_history.push(entry);
            }
            None => {
                log::debug!("New product {} ({:?})", identifier, name);
                next.products.push(Product {
                    identifier,
                    name: name.to_string(),
                    price_history: vec![entry],
                });
            }
        }
        Ok(next)
    }

    /// Removes one price entry, returning the new snapshot.
    ///
    /// Unknown identifiers and unknown entry ids are silent no-ops — the
    /// caller's view may be stale. A product whose history becomes empty is
    /// removed from the catalog entirely.
    pub fn delete_entry(&self, identifier: &str, entry_id: &str) -> Catalog {
        let mut next = self.clone();
        if let Some(index) = next.products.iter().position(|p| p.identifier == identifier) {
            let product = &mut next.products[index];
            product.price_history.retain(|entry| entry.id != entry_id);
            if product.price_history.is_empty() {
                log::debug!("Removing product {} (history empty)", identifier);
                next.products.remove(index);
            }
        }
        next
    }
}
