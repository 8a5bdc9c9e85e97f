use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result};

use itertools::Itertools;
use serde::Serialize;

use crate::index::deduplicate;

pub type ItemId = usize;
pub type ItemName<'l> = &'l str;
pub type BasketId = String;
pub type BucketId = usize;

pub type ItemCounts = HashMap<ItemId, u32>;
pub type PairCounts = HashMap<Pair, u32>;

/// Unordered 2-combination of item ids, always held as `(low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Pair {
    low: ItemId,
    high: ItemId,
}

impl Pair {
    /// # Panics
    ///
    /// Panics if `a == b`; a pair is always two distinct items.
    pub fn new(a: ItemId, b: ItemId) -> Self {
        assert_ne!(a, b, "a pair needs two distinct items");
        if a < b {
            Pair { low: a, high: b }
        } else {
            Pair { low: b, high: a }
        }
    }

    pub fn low(&self) -> ItemId {
        self.low
    }

    pub fn high(&self) -> ItemId {
        self.high
    }

    /// `(a * b) mod m`, the PCY bucket hash.
    pub fn bucket(&self, bucket_count: usize) -> BucketId {
        (self.low as u128 * self.high as u128 % bucket_count as u128) as BucketId
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashBucket {
    pub id: BucketId,
    pub count: u32,
}

/// One transaction: the labels as read plus the distinct item ids derived from them.
///
/// Only built through [`Basket::from_ids`], so `items` never holds an id twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket {
    id: BasketId,
    labels: Vec<String>,
    items: Vec<ItemId>,
}

impl Basket {
    /// `ids` may repeat; only the first occurrence of each is kept.
    pub fn from_ids(id: BasketId, labels: Vec<String>, ids: &[ItemId]) -> Self {
        Basket {
            id,
            labels,
            items: deduplicate(ids),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Distinct item ids in first-occurrence order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Every unordered pair of the basket's distinct items, canonicalised.
    pub fn pairs(&self) -> impl Iterator<Item = Pair> + '_ {
        self.items
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| Pair::new(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_canonical() {
        assert_eq!(Pair::new(3, 1), Pair::new(1, 3));
        let pair = Pair::new(9, 4);
        assert_eq!((pair.low(), pair.high()), (4, 9));
    }

    #[test]
    #[should_panic(expected = "two distinct items")]
    fn pair_of_one_item_is_rejected() {
        Pair::new(1, 1);
    }

    #[test]
    fn repeated_ids_are_collapsed_on_construction() {
        let basket = Basket::from_ids("T1".into(), vec![], &[1, 1, 2]);
        assert_eq!(basket.items(), &[1, 2]);
        let pairs: Vec<Pair> = basket.pairs().collect();
        assert_eq!(pairs, vec![Pair::new(1, 2)]);
    }

    #[test]
    fn bucket_hash_is_product_mod_bucket_count() {
        assert_eq!(Pair::new(1, 2).bucket(5), 2);
        assert_eq!(Pair::new(1, 3).bucket(5), 3);
        assert_eq!(Pair::new(2, 3).bucket(5), 1);
        assert_eq!(Pair::new(7, 11).bucket(53), 77 % 53);
    }

    #[test]
    fn bucket_hash_does_not_overflow() {
        let pair = Pair::new(usize::MAX - 1, usize::MAX);
        assert!(pair.bucket(53) < 53);
    }

    #[test]
    fn basket_pairs_cover_every_combination() {
        let basket = Basket::from_ids("T1".into(), vec![], &[3, 1, 2]);
        let mut pairs: Vec<Pair> = basket.pairs().collect();
        pairs.sort();
        assert_eq!(pairs, vec![Pair::new(1, 2), Pair::new(1, 3), Pair::new(2, 3)]);
    }

    #[test]
    fn single_item_basket_has_no_pairs() {
        let basket = Basket::from_ids("T1".into(), vec!["bread".into()], &[1]);
        assert_eq!(basket.pairs().count(), 0);
    }
}
