//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Identifier of the store an item or tag belongs to. Stores are owned elsewhere.
pub type StoreId = i64;

/// The owning side an association points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Tag,
}

impl EntityKind {
    /// Table holding entities of this kind
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Item => "items",
            EntityKind::Tag => "tags",
        }
    }

    /// Foreign key column in `items_tags` referring to this kind
    pub fn link_column(&self) -> &'static str {
        match self {
            EntityKind::Item => "item_id",
            EntityKind::Tag => "tag_id",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Item => write!(f, "item"),
            EntityKind::Tag => write!(f, "tag"),
        }
    }
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A link names an item or tag that does not exist
    #[error("Reference error: {kind} {id} does not exist")]
    Reference { kind: EntityKind, id: i64 },

    /// Underlying SQLite failure, passed through untouched
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        DomainError::NotFound(format!("{} {}", kind, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_error_names_side() {
        let err = DomainError::Reference { kind: EntityKind::Item, id: 42 };
        assert_eq!(err.to_string(), "Reference error: item 42 does not exist");
    }

    #[test]
    fn test_storage_error_keeps_source() {
        let err: DomainError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, DomainError::Storage(rusqlite::Error::QueryReturnedNoRows)));
    }

    #[test]
    fn test_entity_kind_columns() {
        assert_eq!(EntityKind::Item.table(), "items");
        assert_eq!(EntityKind::Tag.link_column(), "tag_id");
        assert_eq!(DomainError::not_found(EntityKind::Tag, 3).to_string(), "Not found: tag 3");
    }
}
