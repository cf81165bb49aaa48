//! SQLite-backed catalog store.
//!
//! Same wholesale load/save contract as the JSON store: `save` replaces the
//! whole catalog inside one transaction. Explicit `position` columns keep
//! catalog order and history insertion order stable across a round trip;
//! both orders carry meaning (resolver tie-breaks, latest-entry tie-breaks).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{PriceEntry, Product};
use crate::storage::CatalogStore;

/// Catalog persistence in a local SQLite database.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location: `<data dir>/price_tracker/products.db`.
    pub fn at_default_path() -> Self {
        Self::new(default_db_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the database and initialises the schema.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.path)?;
        init_schema(&conn)?;
        Ok(conn)
    }
}

/// Returns the default database path.
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("price_tracker")
        .join("products.db")
}

/// Creates the tables if they do not already exist.
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS products (
            identifier TEXT NOT NULL PRIMARY KEY,
            name       TEXT NOT NULL,
            position   INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS price_entries (
            id          TEXT NOT NULL PRIMARY KEY,
            identifier  TEXT NOT NULL,
            supermarket TEXT NOT NULL,
            price       REAL NOT NULL,
            date        TEXT NOT NULL,
            position    INTEGER NOT NULL,
            FOREIGN KEY (identifier) REFERENCES products(identifier)
        );

        CREATE INDEX IF NOT EXISTS idx_price_entries_identifier
            ON price_entries(identifier);",
    )
}

/// Loads the full catalog from an open connection.
fn load_conn(conn: &Connection) -> rusqlite::Result<Catalog> {
    let mut product_stmt =
        conn.prepare("SELECT identifier, name FROM products ORDER BY position")?;
    let mut entry_stmt = conn.prepare(
        "SELECT id, supermarket, price, date FROM price_entries
         WHERE identifier = ?1 ORDER BY position",
    )?;

    let keyed: Vec<(String, String)> = product_stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut products = Vec::with_capacity(keyed.len());
    for (identifier, name) in keyed {
        let price_history: Vec<PriceEntry> = entry_stmt
            .query_map(params![identifier], |row| {
                let date_str: String = row.get(3)?;
                let date = parse_date(&date_str, 3)?;
                Ok(PriceEntry {
                    id: row.get(0)?,
                    supermarket: row.get(1)?,
                    price: row.get(2)?,
                    date,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        products.push(Product {
            identifier,
            name,
            price_history,
        });
    }
    Ok(Catalog::from_products(products))
}

/// Replaces the stored catalog with `catalog` inside one transaction.
fn save_conn(conn: &mut Connection, catalog: &Catalog) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM price_entries", [])?;
    tx.execute("DELETE FROM products", [])?;
    {
        let mut product_stmt = tx.prepare_cached(
            "INSERT INTO products (identifier, name, position) VALUES (?1, ?2, ?3)",
        )?;
        let mut entry_stmt = tx.prepare_cached(
            "INSERT INTO price_entries (id, identifier, supermarket, price, date, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;

        for (product_pos, product) in catalog.iter().enumerate() {
            product_stmt.execute(params![
                product.identifier,
                product.name,
                product_pos as i64
            ])?;
            for (entry_pos, entry) in product.price_history.iter().enumerate() {
                entry_stmt.execute(params![
                    entry.id,
                    product.identifier,
                    entry.supermarket,
                    entry.price,
                    entry.date.to_rfc3339(),
                    entry_pos as i64,
                ])?;
            }
        }
    }
    tx.commit()
}

/// Parses a stored RFC 3339 date, mapping failure to a column conversion error.
fn parse_date(date_str: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date_str)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
        })
}

impl CatalogStore for SqliteStore {
    fn load(&self) -> Result<Catalog> {
        let conn = self.open()?;
        let catalog = load_conn(&conn)?;
        log::info!(
            "Loaded {} products from {}",
            catalog.len(),
            self.path.display()
        );
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        let mut conn = self.open()?;
        save_conn(&mut conn, catalog)?;
        log::info!(
            "Saved {} products to {}",
            catalog.len(),
            self.path.display()
        );
        Ok(())
    }
}
