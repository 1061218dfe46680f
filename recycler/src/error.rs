use alloc::string::String;

use crate::Subscription;

/// Errors surfaced by [`crate::Recycler`] and by [`crate::DataSource`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("column count must be at least 1")]
    InvalidColumnCount,
    #[error("estimated row height must be greater than zero")]
    InvalidEstimatedRowHeight,
    #[error("item {index} is out of range for a data source of {count} items")]
    ItemOutOfRange { index: usize, count: usize },
    #[error("unsupported notification key `{key}`")]
    UnsupportedNotification { key: String },
    #[error("no materialized cell is observed by subscription {0:?}")]
    UnknownSubscription(Subscription),
    #[error("cell {column} of row ordinal {ordinal} is not materialized")]
    NotMaterialized { ordinal: usize, column: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
