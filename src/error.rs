//! Error types for txkv.

use thiserror::Error;

/// Result type alias for txkv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the store.
///
/// Both kinds are ordinary caller conditions. When one is returned the
/// store's state is exactly what it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested key (or value, for `count`) is not present in the
    /// current view.
    #[error("No such item")]
    NoSuchItem,

    /// `commit` or `rollback` was called with no open transaction.
    #[error("No open transaction")]
    TransactionIsEmpty,
}

impl Error {
    /// Check if this error is recoverable.
    ///
    /// Every error the store produces leaves it untouched, so this is
    /// always true. Kept for parity with callers that branch on it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NoSuchItem | Error::TransactionIsEmpty)
    }

    /// Stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NoSuchItem => "no_such_item",
            Error::TransactionIsEmpty => "transaction_is_empty",
        }
    }
}
