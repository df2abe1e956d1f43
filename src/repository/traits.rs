//! Repository Layer - Core Traits
//!
//! Defines the store contract shared by every backend.

use async_trait::async_trait;
use crate::domain::{generate_id, DomainResult, Entity};

/// Which persistence backend a store writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Embedded SQLite database
    Sqlite,
    /// Whole-array JSON document in a key-value file
    Fallback,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert / list / clear contract over one logical table
///
/// Errors are reported through the returned future, never by panicking.
/// Nothing is retried.
#[async_trait]
pub trait RecordStore<T: Entity>: Send + Sync {
    /// Persist with upsert semantics keyed by id, assigning one if empty.
    /// Resolves with the final id.
    async fn insert(&self, entity: &T) -> DomainResult<T::Id>;

    /// Every stored entity; empty when nothing is stored
    async fn list_all(&self) -> DomainResult<Vec<T>>;

    /// Delete every entity
    async fn clear_all(&self) -> DomainResult<()>;

    fn backend(&self) -> Backend;
}

/// Generate ids until one is not already taken
pub(crate) fn next_free_id<F>(mut taken: F) -> DomainResult<String>
where
    F: FnMut(&str) -> DomainResult<bool>,
{
    loop {
        let id = generate_id();
        if !taken(&id)? {
            return Ok(id);
        }
    }
}
