use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, info};

use crate::config::Comparison;
use crate::types::{Basket, ItemCounts};

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// Result of the pass-1 singleton scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingletonCounts {
    /// Number of baskets each item appears in.
    pub counts: ItemCounts,
    pub basket_count: usize,
}

/// Count, per item, the baskets whose distinct set contains it.
pub fn count_items(baskets: &[Basket]) -> SingletonCounts {
    let mut counts = HashMap::with_capacity(APPROX_NUM_UNIQUE_ITEMS);

    for basket in baskets {
        for &item in basket.items() {
            *counts.entry(item).or_insert(0) += 1;
        }
    }

    info!(
        baskets = baskets.len(),
        distinct_items = counts.len(),
        "counted singletons"
    );

    SingletonCounts {
        counts,
        basket_count: baskets.len(),
    }
}

/// Entries of `counts` admitted by `comparison` against `threshold`.
pub fn filter_support<K>(
    counts: &HashMap<K, u32>,
    threshold: u32,
    comparison: Comparison,
) -> HashMap<K, u32>
where
    K: Copy + Eq + Hash,
{
    let kept: HashMap<K, u32> = counts
        .iter()
        .filter(|(_, &count)| comparison.admits(count, threshold))
        .map(|(&key, &count)| (key, count))
        .collect();

    debug!(
        before = counts.len(),
        after = kept.len(),
        threshold,
        ?comparison,
        "applied support filter"
    );

    kept
}
