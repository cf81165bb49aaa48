//! File-based catalog store: one pretty-printed JSON array per catalog.
//!
//! The file format is the application's existing product export: an array of
//! products with `barcode`, `name`, and `priceHistory` keys. A missing file
//! is an empty catalog, so a fresh install needs no setup step.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::storage::CatalogStore;

/// Catalog persistence in a single JSON file.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location: `<data dir>/price_tracker/products.json`.
    pub fn at_default_path() -> Self {
        Self::new(default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Returns the default products file path.
fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("price_tracker")
        .join("products.json")
}

impl CatalogStore for JsonStore {
    fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            log::debug!("No catalog file at {}, starting empty", self.path.display());
            return Ok(Catalog::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        let catalog: Catalog = serde_json::from_str(&contents)?;
        log::info!(
            "Loaded {} products from {}",
            catalog.len(),
            self.path.display()
        );
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(catalog)?;
        fs::write(&self.path, contents)?;
        log::info!(
            "Saved {} products to {}",
            catalog.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_catalog() -> Catalog {
        Catalog::default()
            .upsert(&Observation {
                barcode: Some("123".to_string()),
                name: "Organic Whole Milk".to_string(),
                supermarket: "FreshMart".to_string(),
                price: 3.49,
            })
            .unwrap()
            .upsert(&Observation {
                barcode: None,
                name: "Fresh Bread".to_string(),
                supermarket: "MegaGrocer".to_string(),
                price: 1.79,
            })
            .unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("products.json"));

        let catalog = store.load().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("products.json"));
        let catalog = sample_catalog();

        store.save(&catalog).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, catalog);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested").join("deeper").join("products.json"));

        store.save(&sample_catalog()).unwrap();
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn save_replaces_previous_contents_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("products.json"));

        store.save(&sample_catalog()).unwrap();
        store.save(&Catalog::default()).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn loads_the_existing_application_format() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{
                    "barcode": "4006381333931",
                    "name": "Organic Whole Milk",
                    "priceHistory": [
                        {{ "id": "1700000000000-ab", "supermarket": "FreshMart", "price": 3.49, "date": "2026-01-05T09:30:00Z" }},
                        {{ "id": "1700000000001-cd", "supermarket": "MegaGrocer", "price": 2.99, "date": "2026-02-01T18:00:00Z" }}
                    ]
                }}
            ]"#
        )
        .unwrap();

        let store = JsonStore::new(file.path());
        let catalog = store.load().unwrap();

        let product = catalog.find("4006381333931").unwrap();
        assert_eq!(product.name, "Organic Whole Milk");
        assert_eq!(product.price_history.len(), 2);
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let store = JsonStore::new(file.path());
        assert!(matches!(
            store.load(),
            Err(crate::error::TrackerError::Parse(_))
        ));
    }
}
