//! Engine error types.

use thiserror::Error;

use crate::core::PlayerId;

/// Which collection an out-of-range index pointed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexTarget {
    Quest,
    Round,
}

impl std::fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexTarget::Quest => write!(f, "quest"),
            IndexTarget::Round => write!(f, "round"),
        }
    }
}

/// A state that failed structural or referential validation.
///
/// Carries the reason for the first violation found.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub reason: String,
}

impl ValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure returned by an engine operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A quest or round index outside `[0, len)`.
    #[error("{target} index {index} out of range (count {len})")]
    IndexOutOfRange {
        target: IndexTarget,
        index: usize,
        len: usize,
    },

    /// Removal of a player who is not seated in the game.
    #[error("player {0} not found in game")]
    PlayerNotFound(PlayerId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
