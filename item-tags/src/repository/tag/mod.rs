//! Tag Repository Module
//!
//! This module provides tag repository functionality split into specialized sub-modules:
//! - tag_repo: Core CRUD operations
//! - item_tag: the item-tag association store

mod item_tag;
mod tag_repo;

pub use item_tag::ItemTagRepository;
pub use tag_repo::TagRepository;
