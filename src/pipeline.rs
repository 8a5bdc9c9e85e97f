use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::{info, info_span};

use crate::config::MiningConfig;
use crate::error::Result;
use crate::itemsets::count::{count_items, filter_support, SingletonCounts};
use crate::itemsets::pcy::{count_buckets, BucketBitmap};
use crate::itemsets::{apriori, pcy, PairPass};
use crate::rules::{interesting_associations, Association};
use crate::types::{Basket, PairCounts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Apriori,
    Pcy,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Algorithm::Apriori => write!(f, "A-Priori"),
            Algorithm::Pcy => write!(f, "PCY"),
        }
    }
}

/// Everything a run hands to the reporting side.
#[derive(Debug, Clone, PartialEq)]
pub struct MiningReport {
    pub algorithm: Algorithm,
    pub basket_count: usize,
    pub distinct_items: usize,
    pub frequent_items: usize,
    /// Only set for PCY.
    pub frequent_buckets: Option<usize>,
    pub candidate_pairs: usize,
    pub frequent_pairs: PairCounts,
    pub associations: Vec<Association>,
    pub singletons: SingletonCounts,
}

/// Run pass 1, the support filter, pass 2 and scoring for one algorithm.
pub fn mine(
    baskets: &[Basket],
    config: &MiningConfig,
    algorithm: Algorithm,
) -> Result<MiningReport> {
    config.validate()?;

    let span = info_span!("mine", %algorithm);
    let _guard = span.enter();

    let (singletons, frequent_items, frequent_buckets, pass) = match algorithm {
        Algorithm::Apriori => {
            let singletons = count_items(baskets);
            let frequent_items = filter_support(
                &singletons.counts,
                config.support_threshold,
                config.item_comparison,
            );
            info!(frequent_items = frequent_items.len(), "filtered singletons");
            let pass = apriori::count_frequent_pairs(baskets, &frequent_items, config)?;
            (singletons, frequent_items.len(), None, pass)
        }
        Algorithm::Pcy => {
            let first = count_buckets(baskets, config)?;
            let bitmap = BucketBitmap::build(&first.buckets, config);
            let frequent_items = filter_support(
                &first.singletons.counts,
                config.support_threshold,
                config.item_comparison,
            );
            info!(
                frequent_items = frequent_items.len(),
                frequent_buckets = bitmap.frequent_buckets(),
                "filtered singletons and buckets"
            );
            let pass = pcy::count_frequent_pairs(baskets, &frequent_items, &bitmap, config)?;
            (
                first.singletons,
                frequent_items.len(),
                Some(bitmap.frequent_buckets()),
                pass,
            )
        }
    };

    let associations =
        interesting_associations(&pass.frequent, &singletons, config.interest_threshold)?;

    let PairPass {
        candidates,
        frequent,
    } = pass;

    Ok(MiningReport {
        algorithm,
        basket_count: singletons.basket_count,
        distinct_items: singletons.counts.len(),
        frequent_items,
        frequent_buckets,
        candidate_pairs: candidates.len(),
        frequent_pairs: frequent,
        associations,
        singletons,
    })
}

/// Both algorithms over the same baskets, A-Priori first.
pub fn compare(baskets: &[Basket], config: &MiningConfig) -> Result<[MiningReport; 2]> {
    Ok([
        mine(baskets, config, Algorithm::Apriori)?,
        mine(baskets, config, Algorithm::Pcy)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::index::{index_baskets, RawBasket};
    use crate::types::Pair;

    fn baskets() -> Vec<Basket> {
        let raw = vec![
            ("T1", vec!["A", "B", "C"]),
            ("T2", vec!["A", "B"]),
            ("T3", vec!["B", "C"]),
            ("T4", vec!["A", "C"]),
        ];
        let (_, baskets) = index_baskets(
            raw.into_iter()
                .map(|(id, labels)| RawBasket {
                    id: id.into(),
                    labels: labels.into_iter().map(String::from).collect(),
                })
                .collect(),
        );
        baskets
    }

    #[test]
    fn apriori_report_counts() {
        let config = MiningConfig::new(1, 5, 0.0);

        let report = mine(&baskets(), &config, Algorithm::Apriori).unwrap();

        assert_eq!(report.basket_count, 4);
        assert_eq!(report.distinct_items, 3);
        assert_eq!(report.frequent_items, 3);
        assert_eq!(report.frequent_buckets, None);
        assert_eq!(report.candidate_pairs, 3);
        assert_eq!(report.frequent_pairs.len(), 3);
        assert_eq!(report.frequent_pairs[&Pair::new(1, 2)], 2);
        assert_eq!(report.associations.len(), 6);
    }

    #[test]
    fn pcy_report_counts_buckets() {
        let config = MiningConfig::new(1, 5, 0.0);

        let report = mine(&baskets(), &config, Algorithm::Pcy).unwrap();

        assert_eq!(report.frequent_buckets, Some(3));
        assert_eq!(report.frequent_pairs.len(), 3);
    }

    #[test]
    fn compare_runs_both() {
        let config = MiningConfig::new(1, 5, 0.0);

        let [apriori, pcy] = compare(&baskets(), &config).unwrap();

        assert_eq!(apriori.algorithm, Algorithm::Apriori);
        assert_eq!(pcy.algorithm, Algorithm::Pcy);
        assert_eq!(apriori.frequent_pairs, pcy.frequent_pairs);
        assert_eq!(apriori.associations, pcy.associations);
    }

    #[test]
    fn invalid_config_stops_before_counting() {
        let config = MiningConfig::new(1, 0, 0.0);

        let result = mine(&baskets(), &config, Algorithm::Pcy);

        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn empty_input_gives_an_empty_report() {
        let config = MiningConfig::new(1, 5, 0.0);

        let report = mine(&[], &config, Algorithm::Apriori).unwrap();

        assert_eq!(report.basket_count, 0);
        assert!(report.frequent_pairs.is_empty());
        assert!(report.associations.is_empty());
    }
}
