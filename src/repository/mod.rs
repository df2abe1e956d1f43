//! Repository Layer
//!
//! Record store abstraction and its two backends.

mod traits;
mod db;
mod sqlite_store;
mod local_storage;
mod fallback_store;


pub use traits::{Backend, RecordStore};
pub use db::{init_store, ItemStore, StoreConfig};
pub use sqlite_store::SqliteItemStore;
pub use local_storage::LocalStorage;
pub use fallback_store::{FallbackItemStore, FALLBACK_KEY};
