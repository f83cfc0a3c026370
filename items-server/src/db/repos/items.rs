//! Item repository
//!
//! One parameterized statement per operation. Missing rows are detected
//! from the statement's own result (`RETURNING`), never with a
//! check-then-write.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::models::{ItemFields, ItemId};

/// Item record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("item id space exhausted")]
    IdExhausted,
}

impl DbError {
    fn item_not_found(id: ItemId) -> Self {
        Self::NotFound {
            resource: "Item",
            id: id.to_string(),
        }
    }
}

/// Storage boundary used by the HTTP handlers.
///
/// Each method maps to exactly one statement against the backing store.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items, ascending by id.
    async fn list(&self) -> Result<Vec<Item>, DbError>;

    async fn get(&self, id: ItemId) -> Result<Item, DbError>;

    /// Insert and return the row with its generated id.
    async fn create(&self, fields: ItemFields) -> Result<Item, DbError>;

    /// Replace name and description of an existing row.
    async fn update(&self, id: ItemId, fields: ItemFields) -> Result<Item, DbError>;

    async fn delete(&self, id: ItemId) -> Result<(), DbError>;
}

/// PostgreSQL-backed item store
#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn list(&self) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, name, description FROM items ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn get(&self, id: ItemId) -> Result<Item, DbError> {
        sqlx::query_as::<_, Item>("SELECT id, name, description FROM items WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::item_not_found(id))
    }

    async fn create(&self, fields: ItemFields) -> Result<Item, DbError> {
        let (name, description) = fields.into_parts();

        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    async fn update(&self, id: ItemId, fields: ItemFields) -> Result<Item, DbError> {
        let (name, description) = fields.into_parts();

        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = $1, description = $2
            WHERE id = $3
            RETURNING id, name, description
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::item_not_found(id))
    }

    async fn delete(&self, id: ItemId) -> Result<(), DbError> {
        sqlx::query_scalar::<_, i32>("DELETE FROM items WHERE id = $1 RETURNING id")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| DbError::item_not_found(id))
    }
}
