use thiserror::Error;

/// Error taxonomy for every admin operation
///
/// Nothing here is retried automatically; each variant is reported
/// synchronously to the caller, which maps it onto an HTTP status.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing, malformed or out-of-range field; recoverable by the user
    #[error("{0}")]
    Validation(String),

    /// Unique constraint collision on a single field (name/slug/sku/...)
    #[error("{field} is already taken")]
    UniquenessConflict { field: &'static str },

    /// A foreign key points at a record that does not exist or is deleted
    #[error("referenced {entity} does not exist")]
    MissingReference { entity: &'static str },

    /// Order status machine violation
    #[error("cannot change order status from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    /// Category parent assignment that would make the record its own ancestor
    #[error("category cannot become its own ancestor")]
    HierarchyCycle,

    /// Unknown or already-deleted record
    #[error("not found")]
    NotFound,

    /// Storage layer failure
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
