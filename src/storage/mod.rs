//! Persistence providers for catalog snapshots.
//!
//! The catalog is loaded wholesale, mutated as a value, and saved wholesale;
//! providers are interchangeable behind [`CatalogStore`]. Serializing writes
//! (one in-flight mutation at a time) is the caller's responsibility.

pub mod json_store;
pub mod sqlite_store;

use crate::catalog::Catalog;
use crate::error::Result;

/// A whole-catalog persistence provider.
pub trait CatalogStore {
    /// Load the full catalog; an absent backing store yields an empty one.
    fn load(&self) -> Result<Catalog>;
    /// Atomically replace the stored catalog with this snapshot.
    fn save(&self, catalog: &Catalog) -> Result<()>;
}

// Re-exports for public API convenience
pub use json_store::JsonStore;
pub use sqlite_store::SqliteStore;
