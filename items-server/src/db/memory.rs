//! In-process item store
//!
//! Same contract as [`PgItemStore`](super::PgItemStore): ids start at 1,
//! are never reused, and listing is ascending by id. Used by tests and by
//! `itemsd serve --memory`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repos::{DbError, Item, ItemStore};
use crate::models::{ItemFields, ItemId};

#[derive(Debug)]
struct Inner {
    next_id: i32,
    rows: BTreeMap<i32, Item>,
}

/// Item store kept in memory for the life of the process
#[derive(Debug)]
pub struct MemoryItemStore {
    inner: RwLock<Inner>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: ItemId) -> DbError {
    DbError::NotFound {
        resource: "Item",
        id: id.to_string(),
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, DbError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: ItemId) -> Result<Item, DbError> {
        self.inner
            .read()
            .await
            .rows
            .get(&id.get())
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, fields: ItemFields) -> Result<Item, DbError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id = id.checked_add(1).ok_or(DbError::IdExhausted)?;

        let (name, description) = fields.into_parts();
        let item = Item {
            id,
            name,
            description,
        };
        inner.rows.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: ItemId, fields: ItemFields) -> Result<Item, DbError> {
        let mut inner = self.inner.write().await;
        let row = inner.rows.get_mut(&id.get()).ok_or_else(|| not_found(id))?;

        let (name, description) = fields.into_parts();
        row.name = name;
        row.description = description;
        Ok(row.clone())
    }

    async fn delete(&self, id: ItemId) -> Result<(), DbError> {
        self.inner
            .write()
            .await
            .rows
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
