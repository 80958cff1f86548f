//! Item Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Item CRUD operations.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::DeletePolicy;
use crate::domain::{normalize_name, DomainError, DomainResult, EntityKind, Item, ItemId};
use super::super::links::{delete_owner, like_pattern};
use super::super::traits::{Repository, SearchableRepository};

/// SQLite implementation of Item repository
pub struct ItemRepository {
    conn: Arc<Mutex<Connection>>,
    delete_policy: DeletePolicy,
}

impl ItemRepository {
    pub fn new(conn: Arc<Mutex<Connection>>, delete_policy: DeletePolicy) -> Self {
        Self { conn, delete_policy }
    }
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        let name = normalize_name(&entity.name)?;
        let now = chrono::Utc::now().timestamp_millis();
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO items (name, price, store_id, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![name, entity.price, entity.store_id, now],
        )?;

        Ok(Item {
            id: conn.last_insert_rowid(),
            name,
            price: entity.price,
            store_id: entity.store_id,
            created_at: Some(now),
        })
    }

    async fn find_by_id(&self, id: ItemId) -> DomainResult<Option<Item>> {
        let conn = self.conn.lock().await;

        find_item(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;

        let mut stmt =
            conn.prepare("SELECT id, name, price, store_id, created_at FROM items ORDER BY id")?;
        let items = stmt
            .query_map([], row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    async fn update(&self, entity: &Item) -> DomainResult<Item> {
        let name = normalize_name(&entity.name)?;
        let conn = self.conn.lock().await;

        let affected = conn.execute(
            "UPDATE items SET name = ?1, price = ?2, store_id = ?3 WHERE id = ?4",
            params![name, entity.price, entity.store_id, entity.id],
        )?;
        if affected == 0 {
            return Err(DomainError::not_found(EntityKind::Item, entity.id));
        }

        // created_at is owned by storage, so hand back the stored row
        find_item(&conn, entity.id)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Item, entity.id))
    }

    async fn delete(&self, id: ItemId) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        delete_owner(&mut conn, EntityKind::Item, id, self.delete_policy)
    }
}

#[async_trait]
impl SearchableRepository<Item> for ItemRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT id, name, price, store_id, created_at FROM items
             WHERE name LIKE ?1 ESCAPE '\\'
             ORDER BY id",
        )?;
        let items = stmt
            .query_map(params![like_pattern(query)], row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }
}

fn find_item(conn: &Connection, id: ItemId) -> DomainResult<Option<Item>> {
    let item = conn
        .query_row(
            "SELECT id, name, price, store_id, created_at FROM items WHERE id = ?1",
            params![id],
            row_to_item,
        )
        .optional()?;
    Ok(item)
}

/// Convert a database row to Item
pub(crate) fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        store_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}
