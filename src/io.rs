use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::index::RawBasket;

pub const TRANSACTION_COLUMN: &str = "Transaction";
pub const ITEM_COLUMN: &str = "Item";

/// Reads one-row-per-item basket files such as
///
/// ```text
/// Date,Time,Transaction,Item
/// 2016-10-30,09:58:11,1,Bread
/// 2016-10-30,10:05:34,2,Scandinavian
/// ```
#[derive(Debug, Clone)]
pub struct BasketReader {
    transaction_column: String,
    item_column: String,
}

impl Default for BasketReader {
    fn default() -> Self {
        BasketReader {
            transaction_column: TRANSACTION_COLUMN.to_owned(),
            item_column: ITEM_COLUMN.to_owned(),
        }
    }
}

impl BasketReader {
    pub fn with_columns(transaction_column: &str, item_column: &str) -> Self {
        BasketReader {
            transaction_column: transaction_column.to_owned(),
            item_column: item_column.to_owned(),
        }
    }

    /// Baskets are returned in the order their transaction id first appears
    /// in the file, not sorted by id. On a file whose ids are out of order,
    /// indexing the result assigns item ids in file order.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<RawBasket>> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading baskets");
        let reader = csv::Reader::from_path(path)?;
        self.collect(reader)
    }

    /// Same grouping and ordering as [`BasketReader::read_path`].
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<RawBasket>> {
        self.collect(csv::Reader::from_reader(reader))
    }

    /// Group rows by transaction id. Baskets come out in the order their id
    /// first appears; labels keep row order, duplicates included.
    fn collect<R: Read>(&self, mut reader: csv::Reader<R>) -> Result<Vec<RawBasket>> {
        let headers = reader.headers()?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| Error::MissingColumn(name.to_owned()))
        };
        let transaction_idx = position(self.transaction_column.as_str())?;
        let item_idx = position(self.item_column.as_str())?;

        let mut baskets: Vec<RawBasket> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut rows = 0_usize;

        for record in reader.records() {
            let record = record?;
            let (transaction, item) = match (record.get(transaction_idx), record.get(item_idx)) {
                (Some(transaction), Some(item)) => (transaction.trim(), item.trim()),
                _ => continue,
            };
            rows += 1;

            let idx = *positions.entry(transaction.to_owned()).or_insert_with(|| {
                baskets.push(RawBasket {
                    id: transaction.to_owned(),
                    labels: Vec::new(),
                });
                baskets.len() - 1
            });
            baskets[idx].labels.push(item.to_owned());
        }

        info!(rows, baskets = baskets.len(), "loaded baskets");

        Ok(baskets)
    }
}
