//! SQLite Item Store
//!
//! Transactional backend. Every insert runs in its own transaction so a
//! failed write leaves nothing behind.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Item};
use super::traits::{next_free_id, Backend, RecordStore};

/// SQLite implementation of the item store
pub struct SqliteItemStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteItemStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RecordStore<Item> for SqliteItemStore {
    async fn insert(&self, entity: &Item) -> DomainResult<String> {
        let mut conn = self.conn.lock().await;
        insert_item(&mut conn, entity)
    }

    async fn list_all(&self) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT id, category, item, date, cycle, price, notes, reminder FROM items")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let rows = stmt
            .query_map([], row_to_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row.map_err(|e| DomainError::Internal(e.to_string()))?);
        }
        Ok(items)
    }

    async fn clear_all(&self) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        conn.execute("DELETE FROM items", [])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }

    fn backend(&self) -> Backend {
        Backend::Sqlite
    }
}

fn insert_item(conn: &mut Connection, entity: &Item) -> DomainResult<String> {
    let tx = conn
        .transaction()
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let id = if entity.has_id() {
        entity.id.clone()
    } else {
        next_free_id(|candidate| {
            tx.query_row("SELECT 1 FROM items WHERE id = ?", params![candidate], |_| Ok(()))
                .optional()
                .map(|found| found.is_some())
                .map_err(|e| DomainError::Internal(e.to_string()))
        })?
    };

    tx.execute(
        "INSERT OR REPLACE INTO items (id, category, item, date, cycle, price, notes, reminder) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            id,
            entity.category,
            entity.item,
            entity.date,
            entity.cycle,
            entity.price,
            entity.notes,
            entity.reminder
        ],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(id)
}

/// Convert a database row to Item. NULL columns read back as empty text.
fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    Ok(Item {
        id: row.get(0)?,
        category: text(1)?,
        item: text(2)?,
        date: text(3)?,
        cycle: text(4)?,
        price: text(5)?,
        notes: text(6)?,
        reminder: text(7)?,
    })
}
