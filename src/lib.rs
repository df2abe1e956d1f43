//! Expiry Tracker Backend
//!
//! Layered architecture:
//! - domain: Item entity, validation and id generation
//! - repository: Record store contract with SQLite and flat-file backends
//! - commands: Save / delete-all / list handlers producing status text
//! - view: HTML and text rendering of the item list

pub mod config;
pub mod domain;
pub mod repository;
pub mod commands;
pub mod view;

use config::AppConfig;
use repository::{init_store, ItemStore};

/// Application state shared across commands
#[derive(Clone)]
pub struct AppState {
    pub store: ItemStore,
    pub config: AppConfig,
}

impl AppState {
    /// Run once when the process is ready: picks the storage backend
    pub async fn on_ready(config: AppConfig) -> Self {
        log::info!("App ready, initializing store");
        let store = init_store(&config.store_config()).await;
        Self { store, config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageMode;
    use crate::repository::Backend;

    #[tokio::test]
    async fn test_on_ready_picks_sqlite_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new(Some(dir.path().to_path_buf()), StorageMode::Auto, None);

        let state = AppState::on_ready(config).await;
        assert_eq!(state.store.backend(), Backend::Sqlite);
        assert!(state.config.db_path().exists());
    }

    #[tokio::test]
    async fn test_on_ready_honours_fallback_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new(Some(dir.path().to_path_buf()), StorageMode::Fallback, None);

        let state = AppState::on_ready(config).await;
        assert_eq!(state.store.backend(), Backend::Fallback);
        assert!(!state.config.db_path().exists());
    }
}
