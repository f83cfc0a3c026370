//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default), built once and passed in
//! - One parameterized statement per request
//! - Rely on `RETURNING` to detect missing rows, no check-then-write

pub mod memory;
pub mod pool;
pub mod repos;

pub use memory::MemoryItemStore;
pub use pool::{create_pool, probe, DbConfig};
pub use repos::*;
