//! Derived views over a product's price history.
//!
//! All functions are pure and total: they accept any slice and return `None`
//! only for an empty one, which a catalog-owned history never is.

use crate::models::PriceEntry;

/// The cheapest known place to buy a product.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPrice {
    pub supermarket: String,
    pub price: f64,
}

/// Entry with the maximal date; ties go to the latest inserted.
pub fn latest(history: &[PriceEntry]) -> Option<&PriceEntry> {
    history.iter().max_by_key(|entry| entry.date)
}

/// Entry with the minimal price; ties go to the earliest date.
pub fn lowest(history: &[PriceEntry]) -> Option<&PriceEntry> {
    history
        .iter()
        .min_by(|a, b| a.price.total_cmp(&b.price).then_with(|| a.date.cmp(&b.date)))
}

/// Entry with the maximal price; ties go to the earliest date.
pub fn highest(history: &[PriceEntry]) -> Option<&PriceEntry> {
    history
        .iter()
        .max_by(|a, b| a.price.total_cmp(&b.price).then_with(|| b.date.cmp(&a.date)))
}

/// The store and price a shopping list should report, i.e. [`lowest`]
/// projected to store + price.
pub fn best_store_for(history: &[PriceEntry]) -> Option<BestPrice> {
    lowest(history).map(|entry| BestPrice {
        supermarket: entry.supermarket.clone(),
        price: entry.price,
    })
}
