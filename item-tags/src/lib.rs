//! Item-Tag Association Store
//!
//! Layered architecture:
//! - domain: Core entities and errors
//! - repository: Data access abstractions and SQLite implementations
//! - config: Store settings
//! - logging: Optional subscriber setup for hosts
//!
//! ```no_run
//! use item_tags::{AssociationRepository, Item, Repository, Store, StoreConfig, Tag};
//!
//! # async fn demo() -> item_tags::DomainResult<()> {
//! let store = Store::open(StoreConfig::default())?;
//! let item = store.items().create(&Item::new(0, "Lamp")).await?;
//! let tag = store.tags().create(&Tag::new(0, "Lighting")).await?;
//! let link = store.item_tags().create(item.id, tag.id).await?;
//! assert_eq!(store.item_tags().find_by_item(item.id).await?, vec![tag.id]);
//! store.item_tags().delete(link).await?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

pub mod config;
pub mod domain;
pub mod logging;
pub mod repository;

pub use config::{DeletePolicy, StoreConfig};
pub use domain::{
    AssociationId, DomainError, DomainResult, Entity, EntityKind, Item, ItemId,
    ItemTagAssociation, StoreId, Tag, TagId,
};
pub use repository::{
    init_db, AssociationRepository, DbState, ItemRepository, ItemTagRepository, Repository,
    SearchableRepository, TagRepository,
};

/// An opened database with the three repositories sharing its connection
pub struct Store {
    db_state: DbState,
    config: StoreConfig,
    items: ItemRepository,
    tags: TagRepository,
    item_tags: ItemTagRepository,
}

impl Store {
    pub fn open(config: StoreConfig) -> DomainResult<Self> {
        let db_state = init_db(&config)?;

        Ok(Self {
            items: ItemRepository::new(db_state.connection(), config.delete_policy),
            tags: TagRepository::new(db_state.connection(), config.delete_policy),
            item_tags: ItemTagRepository::new(db_state.connection(), &config),
            db_state,
            config,
        })
    }

    pub fn items(&self) -> &ItemRepository {
        &self.items
    }

    pub fn tags(&self) -> &TagRepository {
        &self.tags
    }

    pub fn item_tags(&self) -> &ItemTagRepository {
        &self.item_tags
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn db_path(&self) -> &Path {
        self.db_state.db_path()
    }
}
