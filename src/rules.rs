use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Denominator, Error, ItemKey, Result};
use crate::itemsets::count::SingletonCounts;
use crate::types::{ItemId, Pair, PairCounts};

/// Directional association `antecedent -> consequent` of a frequent pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Association {
    pub antecedent: ItemId,
    pub consequent: ItemId,
    pub pair_count: u32,
    pub confidence: f64,
    pub interest: f64,
}

impl Association {
    /// Confidence and interest of `antecedent -> consequent`.
    ///
    /// `confidence = c / n(antecedent)` and
    /// `interest = |confidence - n(consequent) / N|`.
    pub fn score(
        antecedent: (ItemId, u32),
        consequent: (ItemId, u32),
        pair_count: u32,
        basket_count: usize,
    ) -> Result<Self> {
        let (antecedent, antecedent_count) = antecedent;
        let (consequent, consequent_count) = consequent;

        if antecedent_count == 0 {
            return Err(Error::DivisionByZero(Denominator::ItemCount(antecedent)));
        }
        if basket_count == 0 {
            return Err(Error::DivisionByZero(Denominator::BasketCount));
        }

        let confidence = pair_count as f64 / antecedent_count as f64;
        let baseline = consequent_count as f64 / basket_count as f64;

        Ok(Association {
            antecedent,
            consequent,
            pair_count,
            confidence,
            interest: (confidence - baseline).abs(),
        })
    }

    fn rank(&self, other: &Self) -> Ordering {
        other
            .interest
            .total_cmp(&self.interest)
            .then(self.antecedent.cmp(&other.antecedent))
            .then(self.consequent.cmp(&other.consequent))
    }
}

impl Display for Association {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} (confidence {:.4}, interest {:.4})",
            self.antecedent, self.consequent, self.confidence, self.interest
        )
    }
}

/// Both directions of `pair`, in `low -> high`, `high -> low` order.
pub fn score_pair(
    pair: Pair,
    pair_count: u32,
    singletons: &SingletonCounts,
) -> Result<[Association; 2]> {
    let count_of = |item: ItemId| {
        singletons
            .counts
            .get(&item)
            .copied()
            .ok_or(Error::UnknownItem(ItemKey::Id(item)))
    };
    let low = (pair.low(), count_of(pair.low())?);
    let high = (pair.high(), count_of(pair.high())?);

    Ok([
        Association::score(low, high, pair_count, singletons.basket_count)?,
        Association::score(high, low, pair_count, singletons.basket_count)?,
    ])
}

/// Directions of `frequent_pairs` whose interest reaches `interest_threshold`,
/// most interesting first.
pub fn interesting_associations(
    frequent_pairs: &PairCounts,
    singletons: &SingletonCounts,
    interest_threshold: f64,
) -> Result<Vec<Association>> {
    let mut associations = Vec::with_capacity(frequent_pairs.len() * 2);

    for (&pair, &count) in frequent_pairs {
        for association in score_pair(pair, count, singletons)? {
            if association.interest >= interest_threshold {
                associations.push(association);
            } else {
                debug!(%association, "below interest threshold");
            }
        }
    }

    associations.sort_by(Association::rank);

    info!(
        scored_pairs = frequent_pairs.len(),
        interesting = associations.len(),
        "scored associations"
    );

    Ok(associations)
}
