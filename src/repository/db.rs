//! Store Initialization
//!
//! Opens the SQLite database and creates the items table, or settles on the
//! flat-file fallback. The choice is made once per store and never revisited.

use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainResult, Item};
use super::fallback_store::FallbackItemStore;
use super::local_storage::LocalStorage;
use super::sqlite_store::SqliteItemStore;
use super::traits::{Backend, RecordStore};

/// Where each backend keeps its data
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite database file (`:memory:` for an in-memory database)
    pub db_path: PathBuf,
    /// Key-value file used by the fallback backend
    pub fallback_path: PathBuf,
    /// When false the SQLite backend is treated as unavailable
    pub sqlite_enabled: bool,
}

/// Handle to the initialized store
///
/// Built once by the entry point and cloned into every caller.
#[derive(Clone)]
pub struct ItemStore {
    inner: Arc<dyn RecordStore<Item>>,
}

impl ItemStore {
    /// Wrap an already-built backend
    pub fn new(store: impl RecordStore<Item> + 'static) -> Self {
        Self { inner: Arc::new(store) }
    }

    pub fn backend(&self) -> Backend {
        self.inner.backend()
    }

    pub async fn insert(&self, item: &Item) -> DomainResult<String> {
        self.inner.insert(item).await
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Item>> {
        self.inner.list_all().await
    }

    pub async fn clear_all(&self) -> DomainResult<()> {
        self.inner.clear_all().await
    }
}

/// Pick a backend and prepare it
///
/// Any SQLite failure here is logged and answered with the fallback backend.
pub async fn init_store(config: &StoreConfig) -> ItemStore {
    if !config.sqlite_enabled {
        log::info!("SQLite disabled by configuration, using fallback storage");
        return fallback(config);
    }

    match open_sqlite(config) {
        Ok(conn) => {
            log::info!("SQLite store ready at {}", config.db_path.display());
            ItemStore::new(SqliteItemStore::new(Arc::new(Mutex::new(conn))))
        }
        Err(e) => {
            log::warn!("SQLite unavailable, using fallback storage: {}", e);
            fallback(config)
        }
    }
}

fn fallback(config: &StoreConfig) -> ItemStore {
    log::info!("Fallback store at {}", config.fallback_path.display());
    ItemStore::new(FallbackItemStore::new(LocalStorage::new(config.fallback_path.clone())))
}

fn open_sqlite(config: &StoreConfig) -> Result<Connection, String> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
    }

    let conn = Connection::open(&config.db_path)
        .map_err(|e| format!("Failed to open db: {}", e))?;

    run_migrations(&conn).map_err(|e| format!("Failed to create table: {}", e))?;

    Ok(conn)
}

/// Create the items table if it is missing
pub(crate) fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            category TEXT,
            item TEXT,
            date TEXT,
            cycle TEXT,
            price TEXT,
            notes TEXT,
            reminder TEXT
        )",
        [],
    )?;
    Ok(())
}
