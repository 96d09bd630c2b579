//! Store error types.

use thiserror::Error;

use super::records::{GameId, NoteId};
use crate::core::PlayerId;
use crate::engine::{EngineError, ValidationError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("player {0} not registered")]
    PlayerNotRegistered(PlayerId),

    #[error("note {0} not found")]
    NoteNotFound(NoteId),

    /// The state failed validation; nothing was written.
    #[error("invalid game state: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// A transition applied through [`update_game`](super::update_game) failed.
    #[error(transparent)]
    Engine(EngineError),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored row could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<EngineError> for StoreError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(err) => StoreError::ValidationFailed(err),
            other => StoreError::Engine(other),
        }
    }
}
