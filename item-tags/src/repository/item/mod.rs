//! Item Repository Module
//!
//! Owning store for items. Deleting an item applies the configured
//! [`DeletePolicy`](crate::config::DeletePolicy) to its tag links.

mod item_repo;

pub use item_repo::ItemRepository;
pub(crate) use item_repo::row_to_item;
