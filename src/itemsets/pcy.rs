use std::collections::HashMap;

use bitvec::prelude::*;
use tracing::{debug, info};

use crate::config::MiningConfig;
use crate::error::Result;
use crate::itemsets::count::SingletonCounts;
use crate::itemsets::PairPass;
use crate::types::{Basket, BucketId, HashBucket, ItemCounts, PairCounts};

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// Pair occurrences per hash bucket, one slot for every id in `[0, bucket_count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCounts {
    counts: Vec<u32>,
}

impl BucketCounts {
    fn new(bucket_count: usize) -> Self {
        BucketCounts {
            counts: vec![0; bucket_count],
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.counts.len()
    }

    pub fn get(&self, id: BucketId) -> Option<HashBucket> {
        self.counts
            .get(id)
            .map(|&count| HashBucket { id, count })
    }

    pub fn iter(&self) -> impl Iterator<Item = HashBucket> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(id, &count)| HashBucket { id, count })
    }

    fn increment(&mut self, id: BucketId) {
        self.counts[id] += 1;
    }
}

/// Result of the PCY pass-1 scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcyFirstPass {
    pub singletons: SingletonCounts,
    pub buckets: BucketCounts,
}

/// Count singletons and hash every pair into `config.bucket_count` buckets,
/// in a single scan over the baskets.
///
/// No item filtering happens here, so infrequent items still add to bucket
/// counts.
pub fn count_buckets(baskets: &[Basket], config: &MiningConfig) -> Result<PcyFirstPass> {
    config.validate()?;

    let bucket_count = config.bucket_count;
    let mut counts = HashMap::with_capacity(APPROX_NUM_UNIQUE_ITEMS);
    let mut buckets = BucketCounts::new(bucket_count);

    for basket in baskets {
        for &item in basket.items() {
            *counts.entry(item).or_insert(0) += 1;
        }
        basket
            .pairs()
            .for_each(|pair| buckets.increment(pair.bucket(bucket_count)));
    }

    info!(
        baskets = baskets.len(),
        distinct_items = counts.len(),
        bucket_count,
        non_empty_buckets = buckets.iter().filter(|b| b.count > 0).count(),
        "pcy pass 1 done"
    );

    Ok(PcyFirstPass {
        singletons: SingletonCounts {
            counts,
            basket_count: baskets.len(),
        },
        buckets,
    })
}

/// One flag per bucket, set when the bucket's count passes the support filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketBitmap {
    bits: BitVec<usize, Lsb0>,
}

impl BucketBitmap {
    pub fn build(buckets: &BucketCounts, config: &MiningConfig) -> Self {
        let mut bits = bitvec![usize, Lsb0; 0; buckets.bucket_count()];

        for bucket in buckets.iter() {
            bits.set(
                bucket.id,
                config
                    .bucket_comparison
                    .admits(bucket.count, config.support_threshold),
            );
        }

        debug!(
            frequent_buckets = bits.count_ones(),
            buckets = bits.len(),
            "built bucket bitmap"
        );

        BucketBitmap { bits }
    }

    pub fn is_frequent(&self, id: BucketId) -> bool {
        self.bits.get(id).map(|bit| *bit).unwrap_or(false)
    }

    pub fn frequent_buckets(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of buckets; also the modulus of the pair hash.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

/// Count pairs of frequent items whose hash bucket is flagged in `bitmap`.
pub fn count_hashed_pairs(
    baskets: &[Basket],
    frequent_items: &ItemCounts,
    bitmap: &BucketBitmap,
) -> PairCounts {
    let mut counts = PairCounts::new();
    // bitmaps only come from a validated pass 1
    let bucket_count = bitmap.len();
    if bucket_count == 0 {
        return counts;
    }

    for basket in baskets.iter().filter(|basket| basket.items().len() >= 2) {
        basket
            .pairs()
            .filter(|pair| {
                frequent_items.contains_key(&pair.low())
                    && frequent_items.contains_key(&pair.high())
            })
            .filter(|pair| bitmap.is_frequent(pair.bucket(bucket_count)))
            .for_each(|pair| *counts.entry(pair).or_insert(0) += 1);
    }

    counts
}

/// PCY pass 2: bitmap-pruned candidate counts, then the final pair filter.
pub fn count_frequent_pairs(
    baskets: &[Basket],
    frequent_items: &ItemCounts,
    bitmap: &BucketBitmap,
    config: &MiningConfig,
) -> Result<PairPass> {
    config.validate()?;

    let candidates = count_hashed_pairs(baskets, frequent_items, bitmap);
    let pass = PairPass::from_candidates(
        candidates,
        config.support_threshold,
        config.pair_comparison,
    );

    info!(
        candidate_pairs = pass.candidates.len(),
        frequent_pairs = pass.frequent.len(),
        "pcy pass 2 done"
    );

    Ok(pass)
}
