//! items-server: CRUD HTTP API over a PostgreSQL `items` table
//!
//! Five routes under `/api/items`, each backed by exactly one
//! parameterized statement against a shared connection pool.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbConfig, DbError, Item, ItemStore, MemoryItemStore, PgItemStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
