//! Application configuration
//!
//! Resolves where data and logs live and which storage backends may be used.

use std::fmt;
use std::path::PathBuf;

use crate::repository::StoreConfig;

const APP_DIR_NAME: &str = "expiry-tracker";
const DB_FILE_NAME: &str = "expiryDB.sqlite";
const FALLBACK_FILE_NAME: &str = "local_storage.json";

/// Which backends the store may pick from
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// SQLite when it opens, otherwise the fallback
    #[default]
    Auto,
    /// Always the fallback
    Fallback,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::Auto => f.write_str("auto"),
            StorageMode::Fallback => f.write_str("fallback"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage: StorageMode,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Fill in defaults for anything not given
    pub fn new(data_dir: Option<PathBuf>, storage: StorageMode, log_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let log_dir = log_dir.unwrap_or_else(|| data_dir.join("logs"));
        Self { data_dir, storage, log_dir }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn fallback_path(&self) -> PathBuf {
        self.data_dir.join(FALLBACK_FILE_NAME)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            db_path: self.db_path(),
            fallback_path: self.fallback_path(),
            sqlite_enabled: self.storage == StorageMode::Auto,
        }
    }
}

/// Platform data directory, or the working directory when there is none
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
