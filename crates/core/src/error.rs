//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every failure the core observes is classified into exactly one of these
/// kinds before it reaches the caller. Nothing is retried inside the core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Credentials missing, unknown, or wrong. An unknown user and a wrong
    /// secret are indistinguishable from the caller's side.
    #[error("unauthorized")]
    Unauthorized,

    /// The operation targets a counter that does not exist for this owner.
    #[error("not found")]
    NotFound,

    /// A uniqueness rule rejected the operation (e.g. duplicate create).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A subtract exceeds the stored count. Carries both sides so the
    /// caller can report what was asked against what was there.
    #[error("not enough items to subtract {requested} from {available}")]
    InsufficientStock { requested: i64, available: i64 },

    /// Malformed count, delta, or item name.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backing store failed, timed out, or returned something
    /// unclassifiable. Never folded into `Unauthorized` or `NotFound`.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl DomainError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn insufficient_stock(requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            requested,
            available,
        }
    }

    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }
}

/// Error surfaced by a store port.
///
/// Adapters collapse driver-specific failures into these cases; the engine
/// and authenticator re-classify them into [`DomainError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate key")]
    Duplicate,

    /// The store could not be reached, timed out, or failed mid-call.
    #[error("{0}")]
    Unavailable(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => DomainError::conflict("duplicate key"),
            StoreError::Unavailable(msg) => DomainError::StoreUnavailable(msg),
        }
    }
}
