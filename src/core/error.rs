//! Engine error types and their transport-agnostic codes.
//!
//! Every `BattleError` maps onto one `ErrorCode`, which an RPC layer can turn
//! into its own status codes.

use std::fmt;

use thiserror::Error;

use crate::store::{SourceError, StoreError};

pub type Result<T> = std::result::Result<T, BattleError>;

/// Transport-agnostic error classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotFound,
    InvalidArgument,
    FailedPrecondition,
    /// Lost an optimistic-concurrency race; safe to retry.
    Aborted,
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorCode::NotFound => "not found",
            ErrorCode::InvalidArgument => "invalid argument",
            ErrorCode::FailedPrecondition => "failed precondition",
            ErrorCode::Aborted => "aborted",
            ErrorCode::Internal => "internal",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum BattleError {
    #[error("battle {0} not found")]
    BattleNotFound(String),

    #[error("battle request {0} not found")]
    RequestNotFound(String),

    #[error("circle IDs required")]
    MissingCircleId,

    #[error("player not in battle: {0}")]
    UnknownPlayer(String),

    #[error("invalid bench index {index} (bench size {bench_size})")]
    InvalidBenchIndex { index: i64, bench_size: usize },

    #[error("not your turn (current: {current}, you: {caller})")]
    NotYourTurn { current: String, caller: String },

    #[error("request {request_id} is not pending (status: {status})")]
    RequestNotPending { request_id: String, status: String },

    #[error("failed to get cards for circle {circle_id}")]
    CardSource {
        circle_id: String,
        #[source]
        source: SourceError,
    },

    #[error("failed to {action}")]
    Store {
        action: &'static str,
        #[source]
        source: StoreError,
    },
}

impl BattleError {
    /// Classify this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            BattleError::BattleNotFound(_) | BattleError::RequestNotFound(_) => ErrorCode::NotFound,
            BattleError::MissingCircleId
            | BattleError::UnknownPlayer(_)
            | BattleError::InvalidBenchIndex { .. } => ErrorCode::InvalidArgument,
            BattleError::NotYourTurn { .. } | BattleError::RequestNotPending { .. } => {
                ErrorCode::FailedPrecondition
            }
            BattleError::Store { source, .. } if source.is_conflict() => ErrorCode::Aborted,
            BattleError::CardSource { .. } | BattleError::Store { .. } => ErrorCode::Internal,
        }
    }

    pub(crate) fn store(action: &'static str) -> impl FnOnce(StoreError) -> BattleError {
        move |source| BattleError::Store { action, source }
    }
}
