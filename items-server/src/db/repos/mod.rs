//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One statement per operation, no multi-statement transactions
//! - Not-found is decided by the statement's result, not a prior lookup

pub mod items;

pub use items::{DbError, Item, ItemStore, PgItemStore};
