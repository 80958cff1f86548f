//! Item Entity
//!
//! Items are owned by the item store; associations only hold their id.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, StoreId};

pub type ItemId = i64;

/// A taggable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (0 until stored)
    pub id: ItemId,
    /// Display name
    pub name: String,
    pub price: Option<f64>,
    /// Store the item is sold in; tags can only be linked within the same store
    pub store_id: Option<StoreId>,
    /// Creation time in epoch milliseconds, set by the store
    pub created_at: Option<i64>,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price: None,
            store_id: None,
            created_at: None,
        }
    }

    pub fn in_store(mut self, store_id: StoreId) -> Self {
        self.store_id = Some(store_id);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
