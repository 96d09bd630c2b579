//! The game-state engine: pure transitions, queries and validation.
//!
//! Nothing in this module performs I/O or holds state between calls. Every
//! operation takes a [`GameState`](crate::core::GameState) snapshot and either
//! returns a new one or an [`EngineError`]. The store calls
//! [`validate_game_state`] before persisting anything.

pub mod document;
pub mod error;
pub mod queries;
pub mod transitions;
pub mod validate;

pub use document::parse_game_document;
pub use error::{EngineError, IndexTarget, ValidationError};
pub use queries::{get_current_quest, get_current_round, get_quest_result, round_approved};
pub use transitions::{
    add_player, add_quest, add_round, create_initial_state, remove_player, remove_quest,
    remove_round, update_approvals, update_fails, update_team,
};
pub use validate::validate_game_state;
