use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::types::ItemId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    Id(ItemId),
    Label(String),
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ItemKey::Id(id) => write!(f, "id {}", id),
            ItemKey::Label(label) => write!(f, "label {:?}", label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denominator {
    ItemCount(ItemId),
    BasketCount,
}

impl Display for Denominator {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Denominator::ItemCount(id) => write!(f, "count of item {} is zero", id),
            Denominator::BasketCount => write!(f, "basket count is zero"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Lookup of an id or label the indexer never assigned
    #[error("unknown item: {0}")]
    UnknownItem(ItemKey),

    #[error("division by zero: {0}")]
    DivisionByZero(Denominator),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A header the loader needs is absent from the input
    #[error("missing column {0:?} in basket data")]
    MissingColumn(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
