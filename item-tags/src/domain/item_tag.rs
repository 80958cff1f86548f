//! Item-Tag Association Entity
//!
//! One row of the `items_tags` join table: a single link between an item and a tag.

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::item::ItemId;
use super::tag::TagId;

pub type AssociationId = i64;

/// Join table entry for item-tag relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTagAssociation {
    /// Surrogate key assigned by storage, never changed afterwards
    pub id: AssociationId,
    pub item_id: ItemId,
    pub tag_id: TagId,
}

impl Entity for ItemTagAssociation {
    type Id = AssociationId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_association_serializes_flat() {
        let link = ItemTagAssociation { id: 100, item_id: 1, tag_id: 9 };
        let json = serde_json::to_value(link).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 100, "item_id": 1, "tag_id": 9 }));
        assert_eq!(link.id(), 100);
    }
}
