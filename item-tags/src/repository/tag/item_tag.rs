//! Item-Tag Relationship Operations
//!
//! Operations for managing the many-to-many relationship between items and tags.
//! Each link is one row of `items_tags` with its own surrogate id.

use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::StoreConfig;
use crate::domain::{
    AssociationId, DomainError, DomainResult, EntityKind, Item, ItemId, ItemTagAssociation, Tag,
    TagId,
};
use super::super::item::row_to_item;
use super::super::links::{collect_ids, owner_store};
use super::super::traits::AssociationRepository;
use super::tag_repo::row_to_tag;

/// SQLite implementation of the association store
pub struct ItemTagRepository {
    conn: Arc<Mutex<Connection>>,
    enforce_references: bool,
    unique_pairs: bool,
}

impl ItemTagRepository {
    pub fn new(conn: Arc<Mutex<Connection>>, config: &StoreConfig) -> Self {
        Self {
            conn,
            enforce_references: config.enforce_references,
            unique_pairs: config.unique_pairs,
        }
    }

    /// Check references, honour pair uniqueness and insert. Caller owns the transaction.
    fn link(
        &self,
        conn: &Connection,
        item_id: ItemId,
        tag_id: TagId,
    ) -> DomainResult<AssociationId> {
        if self.enforce_references {
            let item_store = owner_store(conn, EntityKind::Item, item_id)?
                .ok_or(DomainError::Reference { kind: EntityKind::Item, id: item_id })?;
            let tag_store = owner_store(conn, EntityKind::Tag, tag_id)?
                .ok_or(DomainError::Reference { kind: EntityKind::Tag, id: tag_id })?;

            // Tags are scoped to a store; unscoped rows link freely
            if let (Some(item_store), Some(tag_store)) = (item_store, tag_store) {
                if item_store != tag_store {
                    return Err(DomainError::Conflict(format!(
                        "item {} is in store {} but tag {} is in store {}",
                        item_id, item_store, tag_id, tag_store
                    )));
                }
            }
        }

        if self.unique_pairs {
            let existing: Option<AssociationId> = conn
                .query_row(
                    "SELECT id FROM items_tags
                     WHERE item_id = ?1 AND tag_id = ?2
                     ORDER BY id LIMIT 1",
                    params![item_id, tag_id],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(id) = existing {
                debug!("Item {} already linked to tag {} as record {}", item_id, tag_id, id);
                return Ok(id);
            }
        }

        conn.execute(
            "INSERT INTO items_tags (item_id, tag_id) VALUES (?1, ?2)",
            params![item_id, tag_id],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Linked item {} to tag {} as record {}", item_id, tag_id, id);
        Ok(id)
    }

    /// Link several tags to one item; either all links are stored or none are
    pub async fn link_many(
        &self,
        item_id: ItemId,
        tag_ids: &[TagId],
    ) -> DomainResult<Vec<AssociationId>> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let mut ids = Vec::with_capacity(tag_ids.len());
        for &tag_id in tag_ids {
            ids.push(self.link(&tx, item_id, tag_id)?);
        }

        tx.commit()?;
        Ok(ids)
    }

    /// Get all tags for an item, sorted by name
    pub async fn tags_for_item(&self, item_id: ItemId) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT t.id, t.name, t.color, t.store_id, t.created_at FROM tags t
             JOIN items_tags it ON t.id = it.tag_id
             WHERE it.item_id = ?1",
        )?;
        let mut tags = stmt
            .query_map(params![item_id], row_to_tag)?
            .collect::<Result<Vec<_>, _>>()?;

        tags.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        Ok(tags)
    }

    /// Get all items carrying a tag, sorted by name
    pub async fn items_for_tag(&self, tag_id: TagId) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare(
            "SELECT DISTINCT i.id, i.name, i.price, i.store_id, i.created_at FROM items i
             JOIN items_tags it ON i.id = it.item_id
             WHERE it.tag_id = ?1",
        )?;
        let mut items = stmt
            .query_map(params![tag_id], row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        items.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        Ok(items)
    }
}

#[async_trait]
impl AssociationRepository for ItemTagRepository {
    async fn create(&self, item_id: ItemId, tag_id: TagId) -> DomainResult<AssociationId> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let id = self.link(&tx, item_id, tag_id)?;
        tx.commit()?;
        Ok(id)
    }

    async fn delete(&self, id: AssociationId) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let affected = conn.execute("DELETE FROM items_tags WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(DomainError::NotFound(format!("association {}", id)));
        }
        debug!("Deleted association {}", id);
        Ok(())
    }

    async fn find_by_item(&self, item_id: ItemId) -> DomainResult<Vec<TagId>> {
        let conn = self.conn.lock().await;
        collect_ids(
            &conn,
            "SELECT tag_id FROM items_tags WHERE item_id = ?1 ORDER BY id",
            item_id,
        )
    }

    async fn find_by_tag(&self, tag_id: TagId) -> DomainResult<Vec<ItemId>> {
        let conn = self.conn.lock().await;
        collect_ids(
            &conn,
            "SELECT item_id FROM items_tags WHERE tag_id = ?1 ORDER BY id",
            tag_id,
        )
    }

    async fn find_by_id(&self, id: AssociationId) -> DomainResult<Option<ItemTagAssociation>> {
        let conn = self.conn.lock().await;

        let link = conn
            .query_row(
                "SELECT id, item_id, tag_id FROM items_tags WHERE id = ?1",
                params![id],
                row_to_association,
            )
            .optional()?;
        Ok(link)
    }

    async fn list(&self) -> DomainResult<Vec<ItemTagAssociation>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn.prepare("SELECT id, item_id, tag_id FROM items_tags ORDER BY id")?;
        let links = stmt
            .query_map([], row_to_association)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }

    async fn unlink(&self, item_id: ItemId, tag_id: TagId) -> DomainResult<usize> {
        let conn = self.conn.lock().await;

        let removed = conn.execute(
            "DELETE FROM items_tags WHERE item_id = ?1 AND tag_id = ?2",
            params![item_id, tag_id],
        )?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!(
                "link between item {} and tag {}",
                item_id, tag_id
            )));
        }
        debug!("Unlinked tag {} from item {} ({} record(s))", tag_id, item_id, removed);
        Ok(removed)
    }
}

fn row_to_association(row: &rusqlite::Row) -> rusqlite::Result<ItemTagAssociation> {
    Ok(ItemTagAssociation {
        id: row.get(0)?,
        item_id: row.get(1)?,
        tag_id: row.get(2)?,
    })
}
