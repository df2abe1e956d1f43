//! Domain Layer
//!
//! Contains the domain entity and core abstractions.
//! No storage code lives here; only serde, chrono and rand are used.

mod entity;
mod item;

pub use entity::{Entity, DomainError, DomainResult};
pub use item::{generate_id, validate_form, Item, ItemDraft, REQUIRED_FIELDS_MESSAGE};
