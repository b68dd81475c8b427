//! Inventory domain module.
//!
//! Item cards with field-level validation and a write-off transition, plus
//! the in-memory catalog that assigns their identifiers. No IO happens here;
//! a driver supplies parsed values and renders what comes back.

pub mod catalog;
pub mod item;

pub use catalog::{Catalog, ItemChanges, ItemField, UpdateReport};
pub use item::{ItemCard, ItemStatus, NewItem};
