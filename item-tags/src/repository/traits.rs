//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{
    AssociationId, DomainResult, Entity, ItemId, ItemTagAssociation, TagId,
};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Extension for repositories that support text search
#[async_trait]
pub trait SearchableRepository<T: Entity>: Repository<T> {
    /// Search entities by text query
    async fn search(&self, query: &str) -> DomainResult<Vec<T>>;
}

/// Store of item-tag links
///
/// Records are created and deleted, never updated: an association's
/// `id`, `item_id` and `tag_id` are fixed once stored.
#[async_trait]
pub trait AssociationRepository: Send + Sync {
    /// Link an item to a tag, returning the record id
    async fn create(&self, item_id: ItemId, tag_id: TagId) -> DomainResult<AssociationId>;

    /// Remove a record by id
    async fn delete(&self, id: AssociationId) -> DomainResult<()>;

    /// Tags linked to an item
    async fn find_by_item(&self, item_id: ItemId) -> DomainResult<Vec<TagId>>;

    /// Items linked to a tag
    async fn find_by_tag(&self, tag_id: TagId) -> DomainResult<Vec<ItemId>>;

    async fn find_by_id(&self, id: AssociationId) -> DomainResult<Option<ItemTagAssociation>>;

    async fn list(&self) -> DomainResult<Vec<ItemTagAssociation>>;

    /// Remove every record linking `item_id` to `tag_id`, returning how many went
    async fn unlink(&self, item_id: ItemId, tag_id: TagId) -> DomainResult<usize>;
}
