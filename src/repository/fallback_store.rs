//! Fallback Item Store
//!
//! Keeps the whole item array as one JSON value under a fixed key in
//! `LocalStorage`. Each call reads the full array, changes it in memory and
//! writes it back.
//!
//! There is no locking between calls: two handles writing at the same time
//! can lose one of the updates. Callers that need read-your-write ordering
//! must not overlap writes.

use async_trait::async_trait;

use crate::domain::{DomainError, DomainResult, Entity, Item};
use super::local_storage::LocalStorage;
use super::traits::{next_free_id, Backend, RecordStore};

/// Key the item array is stored under
pub const FALLBACK_KEY: &str = "myExpiry_items";

pub struct FallbackItemStore {
    storage: LocalStorage,
}

impl FallbackItemStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    fn read(&self) -> DomainResult<Vec<Item>> {
        match self.storage.get_item(FALLBACK_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| DomainError::Internal(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn write(&self, items: &[Item]) -> DomainResult<()> {
        let raw = serde_json::to_string(items).map_err(|e| DomainError::Internal(e.to_string()))?;
        self.storage.set_item(FALLBACK_KEY, &raw)
    }
}

#[async_trait]
impl RecordStore<Item> for FallbackItemStore {
    async fn insert(&self, entity: &Item) -> DomainResult<String> {
        let mut items = self.read()?;

        let mut item = entity.clone();
        if !item.has_id() {
            item.id = next_free_id(|candidate| Ok(items.iter().any(|i| i.id() == candidate)))?;
        }
        let id = item.id.clone();

        match items.iter_mut().find(|i| i.id() == item.id()) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }

        self.write(&items)?;
        Ok(id)
    }

    async fn list_all(&self) -> DomainResult<Vec<Item>> {
        self.read()
    }

    async fn clear_all(&self) -> DomainResult<()> {
        self.write(&[])
    }

    fn backend(&self) -> Backend {
        Backend::Fallback
    }
}
