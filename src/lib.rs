//! Frequent item pairs in basket data, mined with A-Priori or PCY and ranked
//! by the interest of each directional association.
//!
//! ```no_run
//! use pair_miner::{index_baskets, mine, Algorithm, BasketReader, MiningConfig};
//!
//! let raw = BasketReader::default().read_path("bread_basket.csv")?;
//! let (indexer, baskets) = index_baskets(raw);
//! let report = mine(&baskets, &MiningConfig::default(), Algorithm::Pcy)?;
//! for association in &report.associations {
//!     println!(
//!         "{} -> {}: {:.3}",
//!         indexer.label_of(association.antecedent)?,
//!         indexer.label_of(association.consequent)?,
//!         association.interest
//!     );
//! }
//! # Ok::<(), pair_miner::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod io;
pub mod itemsets;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod types;

pub use config::{Comparison, MiningConfig};
pub use error::{Error, Result};
pub use index::{deduplicate, index_baskets, ItemIndexer, RawBasket};
pub use io::BasketReader;
pub use pipeline::{compare, mine, Algorithm, MiningReport};
pub use rules::Association;
pub use types::{Basket, HashBucket, ItemId, Pair, PairCounts};
