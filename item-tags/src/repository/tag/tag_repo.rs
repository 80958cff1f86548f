//! Tag Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Tag CRUD operations.
//! Item-tag links live in `item_tag`.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::DeletePolicy;
use crate::domain::{normalize_name, DomainError, DomainResult, EntityKind, StoreId, Tag, TagId};
use super::super::links::{delete_owner, like_pattern};
use super::super::traits::{Repository, SearchableRepository};

/// SQLite implementation of Tag repository
pub struct TagRepository {
    conn: Arc<Mutex<Connection>>,
    delete_policy: DeletePolicy,
}

impl TagRepository {
    pub fn new(conn: Arc<Mutex<Connection>>, delete_policy: DeletePolicy) -> Self {
        Self { conn, delete_policy }
    }

    /// Tags belonging to one store, sorted by name
    pub async fn list_by_store(&self, store_id: StoreId) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT id, name, color, store_id, created_at FROM tags
             WHERE store_id = ?1
             ORDER BY name COLLATE NOCASE, id",
        )?;
        let tags = stmt
            .query_map(params![store_id], row_to_tag)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }
}

#[async_trait]
impl Repository<Tag> for TagRepository {
    async fn create(&self, entity: &Tag) -> DomainResult<Tag> {
        let name = normalize_name(&entity.name)?;
        let now = chrono::Utc::now().timestamp_millis();
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO tags (name, color, store_id, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![name, entity.color, entity.store_id, now],
        )?;

        Ok(Tag {
            id: conn.last_insert_rowid(),
            name,
            color: entity.color.clone(),
            store_id: entity.store_id,
            created_at: Some(now),
        })
    }

    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        let conn = self.conn.lock().await;

        find_tag(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT id, name, color, store_id, created_at FROM tags
             ORDER BY name COLLATE NOCASE, id",
        )?;
        let tags = stmt
            .query_map([], row_to_tag)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }

    async fn update(&self, entity: &Tag) -> DomainResult<Tag> {
        let name = normalize_name(&entity.name)?;
        let conn = self.conn.lock().await;

        let affected = conn.execute(
            "UPDATE tags SET name = ?1, color = ?2, store_id = ?3 WHERE id = ?4",
            params![name, entity.color, entity.store_id, entity.id],
        )?;
        if affected == 0 {
            return Err(DomainError::not_found(EntityKind::Tag, entity.id));
        }

        find_tag(&conn, entity.id)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Tag, entity.id))
    }

    async fn delete(&self, id: TagId) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        delete_owner(&mut conn, EntityKind::Tag, id, self.delete_policy)
    }
}

#[async_trait]
impl SearchableRepository<Tag> for TagRepository {
    async fn search(&self, query: &str) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT id, name, color, store_id, created_at FROM tags
             WHERE name LIKE ?1 ESCAPE '\\'
             ORDER BY name COLLATE NOCASE, id",
        )?;
        let tags = stmt
            .query_map(params![like_pattern(query)], row_to_tag)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tags)
    }
}

fn find_tag(conn: &Connection, id: TagId) -> DomainResult<Option<Tag>> {
    let tag = conn
        .query_row(
            "SELECT id, name, color, store_id, created_at FROM tags WHERE id = ?1",
            params![id],
            row_to_tag,
        )
        .optional()?;
    Ok(tag)
}

/// Convert a database row to Tag
pub(crate) fn row_to_tag(row: &rusqlite::Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        store_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}
