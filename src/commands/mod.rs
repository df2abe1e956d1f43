//! Commands Layer
//!
//! Handlers that sit between the user-facing surfaces and the item store.
//! They turn store results into the status text shown to the user.

mod item_cmd;

pub use item_cmd::*;
