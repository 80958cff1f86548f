//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod item;
mod links;
mod tag;
mod traits;


pub use traits::{AssociationRepository, Repository, SearchableRepository};
pub use db::{init_db, DbState};
pub use item::ItemRepository;
pub use tag::{ItemTagRepository, TagRepository};
