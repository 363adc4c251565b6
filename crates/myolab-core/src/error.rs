//! Error types for the Myolab simulation core.
//!
//! All of these represent invalid call sequences by the driving layer, not
//! recoverable runtime conditions: the core has no I/O and retries nothing.
//! Expected, valid input that merely exceeds an axis envelope is clamped by
//! the pose store and never reaches an error path.

use thiserror::Error;

/// Mission state-machine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissionError {
    /// Completion or cancellation requested while no mission is active
    #[error("no active mission")]
    NoActiveMission,
}

/// Quiz sequencing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Answer submitted beyond the question catalog
    #[error("question index {index} out of range: catalog has {len} questions")]
    IndexOutOfRange {
        /// Cursor position at the time of the call
        index: usize,
        /// Catalog size
        len: usize,
    },
}

/// Progression errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    /// XP amounts must be non-negative
    #[error("XP amount must be non-negative, got {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },
}

/// Any error surfaced by a coordinator operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Mission error
    #[error("mission error: {0}")]
    Mission(#[from] MissionError),

    /// Quiz error
    #[error("quiz error: {0}")]
    Quiz(#[from] QuizError),

    /// Progression error
    #[error("progression error: {0}")]
    Progression(#[from] ProgressionError),
}

/// Result type for mission operations.
pub type MissionResult<T> = Result<T, MissionError>;

/// Result type for quiz operations.
pub type QuizResult<T> = Result<T, QuizError>;

/// Result type for progression operations.
pub type ProgressionResult<T> = Result<T, ProgressionError>;

/// Result type for coordinator operations.
pub type SessionResult<T> = Result<T, SessionError>;
