use tracing::info;

use crate::config::MiningConfig;
use crate::error::Result;
use crate::itemsets::PairPass;
use crate::types::{Basket, ItemCounts, PairCounts};

/// Count every pair in each basket whose two items are both in `frequent_items`.
pub fn count_candidate_pairs(baskets: &[Basket], frequent_items: &ItemCounts) -> PairCounts {
    let mut counts = PairCounts::new();

    for basket in baskets.iter().filter(|basket| basket.items().len() >= 2) {
        basket
            .pairs()
            .filter(|pair| {
                frequent_items.contains_key(&pair.low())
                    && frequent_items.contains_key(&pair.high())
            })
            .for_each(|pair| *counts.entry(pair).or_insert(0) += 1);
    }

    counts
}

/// Apriori pass 2: exact candidate counts, then the final pair filter.
pub fn count_frequent_pairs(
    baskets: &[Basket],
    frequent_items: &ItemCounts,
    config: &MiningConfig,
) -> Result<PairPass> {
    config.validate()?;

    let candidates = count_candidate_pairs(baskets, frequent_items);
    let pass = PairPass::from_candidates(
        candidates,
        config.support_threshold,
        config.pair_comparison,
    );

    info!(
        candidate_pairs = pass.candidates.len(),
        frequent_pairs = pass.frequent.len(),
        "apriori pass 2 done"
    );

    Ok(pass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Comparison;
    use crate::error::Error;
    use crate::itemsets::count::{count_items, filter_support};
    use crate::types::Pair;
    use maplit::hashmap;

    fn basket(items: Vec<usize>) -> Basket {
        Basket::from_ids(String::new(), vec![], &items)
    }

    fn abc_baskets() -> Vec<Basket> {
        vec![
            basket(vec![1, 2, 3]),
            basket(vec![1, 2]),
            basket(vec![2, 3]),
            basket(vec![1, 3]),
        ]
    }

    #[test]
    fn counts_all_pairs_of_frequent_items() {
        let baskets = abc_baskets();
        let config = MiningConfig::new(1, 5, 0.0);
        let singletons = count_items(&baskets);
        let frequent_items = filter_support(&singletons.counts, 1, Comparison::AtLeast);

        let pass = count_frequent_pairs(&baskets, &frequent_items, &config).unwrap();

        let expected = hashmap! {
            Pair::new(1, 2) => 2,
            Pair::new(1, 3) => 2,
            Pair::new(2, 3) => 2,
        };
        assert_eq!(pass.candidates, expected);
        assert_eq!(pass.frequent, expected);
    }

    #[test]
    fn skips_pairs_with_an_infrequent_item() {
        let baskets = vec![basket(vec![10, 11]), basket(vec![10, 12]), basket(vec![10, 12])];
        let frequent_items = hashmap! { 10 => 3, 12 => 2 };

        let counts = count_candidate_pairs(&baskets, &frequent_items);

        assert_eq!(counts, hashmap! { Pair::new(10, 12) => 2 });
    }

    #[test]
    fn final_filter_is_strict_by_default() {
        let baskets = abc_baskets();
        let frequent_items = hashmap! { 1 => 3, 2 => 3, 3 => 3 };
        let config = MiningConfig::new(2, 5, 0.0);

        let pass = count_frequent_pairs(&baskets, &frequent_items, &config).unwrap();

        assert_eq!(pass.candidates.len(), 3);
        assert!(pass.frequent.is_empty());
    }

    #[test]
    fn final_filter_follows_configured_comparison() {
        let baskets = abc_baskets();
        let frequent_items = hashmap! { 1 => 3, 2 => 3, 3 => 3 };
        let config = MiningConfig {
            pair_comparison: Comparison::AtLeast,
            ..MiningConfig::new(2, 5, 0.0)
        };

        let pass = count_frequent_pairs(&baskets, &frequent_items, &config).unwrap();

        assert_eq!(pass.frequent.len(), 3);
    }

    #[test]
    fn zero_support_is_rejected() {
        let frequent_items = hashmap! { 1 => 3, 2 => 3, 3 => 3 };
        let config = MiningConfig::new(0, 5, 0.0);

        let result = count_frequent_pairs(&abc_baskets(), &frequent_items, &config);

        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn keys_are_canonical_whatever_the_basket_order() {
        let baskets = vec![basket(vec![3, 1]), basket(vec![1, 3])];
        let frequent_items = hashmap! { 1 => 2, 3 => 2 };

        let counts = count_candidate_pairs(&baskets, &frequent_items);

        assert_eq!(counts, hashmap! { Pair::new(1, 3) => 2 });
        assert!(counts.keys().all(|pair| pair.low() < pair.high()));
    }
}
