//! Error types raised by store and card-source implementations.

use thiserror::Error;

/// Errors surfaced by `BattleStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("{kind} {id} was modified concurrently: expected version {expected}, found {found}")]
    Conflict {
        kind: &'static str,
        id: String,
        expected: u64,
        found: u64,
    },

    #[error("codec error: {0}")]
    Codec(String),

    #[error("unsupported schema version {found} (supported: {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True for optimistic-concurrency conflicts, which a caller may retry.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Errors surfaced by `CardSource` implementations.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no cards found for circle {0}")]
    NoCards(String),

    #[error("circle {0} not found")]
    CircleNotFound(String),

    #[error("circle {circle_id} is malformed: {reason}")]
    Malformed { circle_id: String, reason: String },

    #[error("card source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
