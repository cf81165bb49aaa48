//! Product identity: the single place a storage key is derived from an
//! observation.
//!
//! Scanned products are keyed by their barcode verbatim. Manual entries are
//! keyed by normalized name under a marker prefix, so re-entering the same
//! product name merges into the existing history instead of forking a new
//! product.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker prefix for identifiers derived from a manual entry's name
pub const MANUAL_PREFIX: &str = "manual:";

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Derives the stable identifier for an observation.
///
/// A present, non-blank barcode wins regardless of name; otherwise the
/// identifier is `manual:` plus the normalized name.
pub fn identifier_for(barcode: Option<&str>, name: &str) -> String {
    match barcode {
        Some(code) if !code.trim().is_empty() => code.to_string(),
        _ => format!("{}{}", MANUAL_PREFIX, normalized_name(name)),
    }
}

/// Normalizes a product name for identity comparison: trimmed, lowercased,
/// runs of whitespace collapsed to a single `-`.
pub fn normalized_name(name: &str) -> String {
    WHITESPACE
        .replace_all(name.trim().to_lowercase().as_str(), "-")
        .into_owned()
}
