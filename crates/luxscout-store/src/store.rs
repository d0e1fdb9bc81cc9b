use chrono::Utc;
use luxscout_core::models::SelectedProduct;
use luxscout_core::{SelectionStore, WishlistStore};
use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Store error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Persistence manager using SQLite
///
/// SQLite was chosen because:
/// - Zero-config embedded database
/// - Battle-tested and reliable
/// - Doesn't require a separate process
///
/// Wishlist rows are bare product ids; enquiry selections are stored as
/// JSON blobs keyed by selection id, so the schema never chases the model.
pub struct StoreManager {
    conn: Connection,
}

impl StoreManager {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory store, handy for tests
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS wishlist (
                product_id TEXT PRIMARY KEY,
                added_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS selections (
                selection_id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                added_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    // --- wishlist ---

    pub fn wishlist_add(&self, product_id: &str) -> Result<()> {
        debug!("Persisting wishlist entry {}", product_id);
        self.conn.execute(
            "INSERT OR IGNORE INTO wishlist (product_id, added_at) VALUES (?1, ?2)",
            rusqlite::params![product_id, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    pub fn wishlist_remove(&self, product_id: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM wishlist WHERE product_id = ?1",
            rusqlite::params![product_id],
        )?;
        Ok(())
    }

    pub fn wishlist_clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM wishlist", [])?;
        Ok(())
    }

    /// Wishlisted product ids in the order they were added
    pub fn wishlist_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT product_id FROM wishlist ORDER BY added_at, rowid")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    /// Rebuild an in-memory wishlist store from disk
    pub fn load_wishlist(&self, store: &mut WishlistStore) -> Result<()> {
        for id in self.wishlist_ids()? {
            store.add(&id);
        }
        Ok(())
    }

    // --- enquiry selections ---

    pub fn selection_save(&self, selection: &SelectedProduct) -> Result<()> {
        debug!("Persisting selection {}", selection.selection_id);
        let data = serde_json::to_string(selection)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO selections (selection_id, data, added_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![selection.selection_id, data, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    pub fn selection_remove(&self, selection_id: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM selections WHERE selection_id = ?1",
            rusqlite::params![selection_id],
        )?;
        Ok(())
    }

    pub fn selections_clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM selections", [])?;
        Ok(())
    }

    /// All persisted enquiry lines in the order they were added
    pub fn selections(&self) -> Result<Vec<SelectedProduct>> {
        let mut stmt = self
            .conn
            .prepare("SELECT data FROM selections ORDER BY added_at, rowid")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut selections = Vec::new();
        for row in rows {
            selections.push(serde_json::from_str(&row?)?);
        }
        Ok(selections)
    }

    /// Rebuild an in-memory selection store from disk
    pub fn load_selections(&self, store: &mut SelectionStore) -> Result<()> {
        for selection in self.selections()? {
            store.hydrate(selection);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_selection(id: &str) -> SelectedProduct {
        SelectedProduct {
            selection_id: id.to_string(),
            product_id: "led-bulb-classic".to_string(),
            product_name: "Classic LED Bulb".to_string(),
            wattage: 9,
            color_temperature: "Warm White".to_string(),
            application_type: "Indoor".to_string(),
            quantity: 3,
            notes: Some("kitchen counter".to_string()),
        }
    }

    #[test]
    fn test_wishlist_round_trip() {
        let store = StoreManager::in_memory().unwrap();
        store.wishlist_add("flood-light-pro").unwrap();
        store.wishlist_add("t8-tube-light").unwrap();
        store.wishlist_add("flood-light-pro").unwrap(); // duplicate, ignored

        assert_eq!(store.wishlist_ids().unwrap(), vec!["flood-light-pro", "t8-tube-light"]);

        store.wishlist_remove("flood-light-pro").unwrap();
        assert_eq!(store.wishlist_ids().unwrap(), vec!["t8-tube-light"]);

        store.wishlist_clear().unwrap();
        assert!(store.wishlist_ids().unwrap().is_empty());
    }

    #[test]
    fn test_selection_round_trip() {
        let store = StoreManager::in_memory().unwrap();
        let selection = sample_selection("sel-1");
        store.selection_save(&selection).unwrap();

        let loaded = store.selections().unwrap();
        assert_eq!(loaded, vec![selection]);

        store.selection_remove("sel-1").unwrap();
        assert!(store.selections().unwrap().is_empty());
    }

    #[test]
    fn test_selection_save_replaces_existing() {
        let store = StoreManager::in_memory().unwrap();
        let mut selection = sample_selection("sel-1");
        store.selection_save(&selection).unwrap();

        selection.quantity = 10;
        store.selection_save(&selection).unwrap();

        let loaded = store.selections().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].quantity, 10);
    }
}
