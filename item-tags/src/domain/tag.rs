//! Tag Entity
//!
//! Tags can be attached to items for categorization and filtering.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, StoreId};

pub type TagId = i64;

/// A tag for categorizing items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: TagId,
    /// Tag name
    pub name: String,
    /// Color (hex, e.g., "#FF5733")
    pub color: Option<String>,
    /// Store the tag belongs to
    pub store_id: Option<StoreId>,
    pub created_at: Option<i64>,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: None,
            store_id: None,
            created_at: None,
        }
    }

    pub fn in_store(mut self, store_id: StoreId) -> Self {
        self.store_id = Some(store_id);
        self
    }

    pub fn with_color(id: TagId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::new(id, name)
        }
    }
}

impl Entity for Tag {
    type Id = TagId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_creation() {
        let tag = Tag::new(1, "Work");
        assert_eq!(tag.id(), 1);
        assert_eq!(tag.name, "Work");
        assert!(tag.color.is_none());
    }

    #[test]
    fn test_tag_with_color() {
        let tag = Tag::with_color(2, "Urgent", "#FF0000");
        assert_eq!(tag.color, Some("#FF0000".to_string()));
    }
}
