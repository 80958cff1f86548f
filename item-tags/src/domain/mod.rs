//! Domain Layer
//!
//! Contains all domain entities and core abstractions.

mod entity;
mod item;
mod item_tag;
mod tag;

pub use entity::{DomainError, DomainResult, Entity, EntityKind, StoreId};
pub use item::{Item, ItemId};
pub use item_tag::{AssociationId, ItemTagAssociation};
pub use tag::{Tag, TagId};

/// Trim a user-supplied name and reject it if nothing is left
pub(crate) fn normalize_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput("name must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
