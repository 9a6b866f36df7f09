//! Central error types for the engine (thiserror-based).

use thiserror::Error;

/// Errors surfaced by generators, algorithms, the coordinator and the step store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("Array size must be greater than 0, got {size}")]
    InvalidArraySize { size: usize },

    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("Unsupported sorting algorithm: {id}")]
    AlgorithmNotSupported { id: String },

    #[error("A sort is already in progress")]
    SortInProgress,

    #[error("Sort stopped after {recorded} steps")]
    SortStopped { recorded: usize },

    #[error("Value span [{min}, {max}] exceeds the counting limit of {limit}")]
    ValueSpanTooLarge { min: i64, max: i64, limit: u64 },

    #[error("Invalid engine config: {reason}")]
    InvalidConfig { reason: String },

    /// Saving or loading steps failed. Never invalidates an in-memory result.
    #[error("Persistence error: {reason}")]
    Persistence { reason: String },

    /// A background sort thread could not be started or panicked.
    #[error("Sort worker failed: {reason}")]
    Worker { reason: String },
}

/// Fieldless discriminant of [`SortError`] for stable inspection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortErrorKind {
    InvalidArraySize,
    InvalidRange,
    AlgorithmNotSupported,
    SortInProgress,
    SortStopped,
    ValueSpanTooLarge,
    InvalidConfig,
    Persistence,
    Worker,
}

impl SortError {
    pub fn kind(&self) -> SortErrorKind {
        match self {
            Self::InvalidArraySize { .. } => SortErrorKind::InvalidArraySize,
            Self::InvalidRange { .. } => SortErrorKind::InvalidRange,
            Self::AlgorithmNotSupported { .. } => SortErrorKind::AlgorithmNotSupported,
            Self::SortInProgress => SortErrorKind::SortInProgress,
            Self::SortStopped { .. } => SortErrorKind::SortStopped,
            Self::ValueSpanTooLarge { .. } => SortErrorKind::ValueSpanTooLarge,
            Self::InvalidConfig { .. } => SortErrorKind::InvalidConfig,
            Self::Persistence { .. } => SortErrorKind::Persistence,
            Self::Worker { .. } => SortErrorKind::Worker,
        }
    }

    /// A stopped run, as opposed to a failure.
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::SortStopped { .. })
    }
}

/// Convenience Result type for engine operations.
pub type SortResult<T> = Result<T, SortError>;
