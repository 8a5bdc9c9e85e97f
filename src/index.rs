use std::collections::{HashMap, HashSet};

use crate::error::{Error, ItemKey, Result};
use crate::types::{Basket, BasketId, ItemId, ItemName};

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// Dense ids for item labels, handed out from 1 in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct ItemIndexer {
    reverse_lookup: HashMap<String, ItemId>,
    inventory: Vec<String>,
}

impl ItemIndexer {
    pub fn new() -> Self {
        ItemIndexer {
            reverse_lookup: HashMap::with_capacity(APPROX_NUM_UNIQUE_ITEMS),
            inventory: Vec::with_capacity(APPROX_NUM_UNIQUE_ITEMS),
        }
    }

    pub fn assign(&mut self, label: ItemName) -> ItemId {
        if let Some(&id) = self.reverse_lookup.get(label) {
            return id;
        }
        self.inventory.push(label.to_owned());
        let id = self.inventory.len();
        self.reverse_lookup.insert(label.to_owned(), id);
        id
    }

    pub fn label_of(&self, id: ItemId) -> Result<ItemName> {
        id.checked_sub(1)
            .and_then(|idx| self.inventory.get(idx))
            .map(String::as_str)
            .ok_or(Error::UnknownItem(ItemKey::Id(id)))
    }

    pub fn id_of(&self, label: ItemName) -> Result<ItemId> {
        self.reverse_lookup
            .get(label)
            .copied()
            .ok_or_else(|| Error::UnknownItem(ItemKey::Label(label.to_owned())))
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }
}

/// Distinct ids in first-occurrence order.
pub fn deduplicate(items: &[ItemId]) -> Vec<ItemId> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().copied().filter(|&id| seen.insert(id)).collect()
}

/// Basket with its raw labels as read, before any ids are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBasket {
    pub id: BasketId,
    pub labels: Vec<String>,
}

impl Basket {
    pub fn new(raw: RawBasket, indexer: &mut ItemIndexer) -> Self {
        let ids: Vec<ItemId> = raw.labels.iter().map(|label| indexer.assign(label)).collect();
        Basket::from_ids(raw.id, raw.labels, &ids)
    }
}

/// Label every item across `raw_baskets` and build the deduplicated baskets.
pub fn index_baskets(raw_baskets: Vec<RawBasket>) -> (ItemIndexer, Vec<Basket>) {
    let mut indexer = ItemIndexer::new();
    let baskets = raw_baskets
        .into_iter()
        .map(|raw| Basket::new(raw, &mut indexer))
        .collect();
    (indexer, baskets)
}
