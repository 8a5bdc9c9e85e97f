//! Two-pass frequent pair mining.
//!
//! Pass 1 counts singletons (and, for PCY, hashed pair buckets). The support
//! filter then decides which items take part in pass 2, where candidate pairs
//! are counted exactly and filtered once more.

pub mod apriori;
pub mod count;
pub mod pcy;

use crate::config::Comparison;
use crate::types::PairCounts;

/// Output of a pass-2 scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairPass {
    /// Every pair counted during the scan.
    pub candidates: PairCounts,
    /// Candidates that passed the final pair filter.
    pub frequent: PairCounts,
}

impl PairPass {
    pub(crate) fn from_candidates(
        candidates: PairCounts,
        threshold: u32,
        comparison: Comparison,
    ) -> Self {
        let frequent = count::filter_support(&candidates, threshold, comparison);
        PairPass {
            candidates,
            frequent,
        }
    }
}
