use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How a count is compared against the support threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comparison {
    AtLeast,
    GreaterThan,
}

impl Comparison {
    pub fn admits(self, count: u32, threshold: u32) -> bool {
        match self {
            Comparison::AtLeast => count >= threshold,
            Comparison::GreaterThan => count > threshold,
        }
    }
}

/// Parameters shared by every stage of a run.
///
/// The same `support_threshold` gates singletons, PCY buckets and final pairs.
/// Singletons and buckets admit counts `>=` the threshold while pairs need a
/// count strictly `>` it; each comparison can be set on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub support_threshold: u32,
    pub bucket_count: usize,
    pub interest_threshold: f64,
    pub item_comparison: Comparison,
    pub bucket_comparison: Comparison,
    pub pair_comparison: Comparison,
}

impl Default for MiningConfig {
    fn default() -> Self {
        MiningConfig {
            support_threshold: 200,
            bucket_count: 53,
            interest_threshold: 0.06,
            item_comparison: Comparison::AtLeast,
            bucket_comparison: Comparison::AtLeast,
            pair_comparison: Comparison::GreaterThan,
        }
    }
}

impl MiningConfig {
    pub fn new(support_threshold: u32, bucket_count: usize, interest_threshold: f64) -> Self {
        MiningConfig {
            support_threshold,
            bucket_count,
            interest_threshold,
            ..Default::default()
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let config: MiningConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.support_threshold == 0 {
            return Err(Error::InvalidConfiguration(
                "support threshold must be at least 1".into(),
            ));
        }
        if self.bucket_count == 0 {
            return Err(Error::InvalidConfiguration(
                "bucket count must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.interest_threshold) {
            return Err(Error::InvalidConfiguration(format!(
                "interest threshold {} is outside [0, 1]",
                self.interest_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MiningConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.item_comparison, Comparison::AtLeast);
        assert_eq!(config.pair_comparison, Comparison::GreaterThan);
    }

    #[test]
    fn comparisons_differ_only_at_the_threshold() {
        assert!(Comparison::AtLeast.admits(2, 2));
        assert!(!Comparison::GreaterThan.admits(2, 2));
        assert!(Comparison::GreaterThan.admits(3, 2));
        assert!(!Comparison::AtLeast.admits(1, 2));
    }

    #[test]
    fn rejects_zero_support() {
        let config = MiningConfig::new(0, 53, 0.1);
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_zero_buckets() {
        let config = MiningConfig::new(1, 0, 0.1);
        assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_interest_outside_unit_interval() {
        for interest in [-0.1, 1.5, f64::NAN] {
            let config = MiningConfig::new(1, 5, interest);
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfiguration(_))),
                "{} accepted",
                interest
            );
        }
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let json = r#"{ "support_threshold": 3, "pair_comparison": "at-least" }"#;
        let config = MiningConfig::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(config.support_threshold, 3);
        assert_eq!(config.bucket_count, 53);
        assert_eq!(config.pair_comparison, Comparison::AtLeast);
    }

    #[test]
    fn json_is_validated() {
        let json = r#"{ "bucket_count": 0 }"#;
        assert!(matches!(
            MiningConfig::from_json_reader(json.as_bytes()),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
