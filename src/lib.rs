//! # avalon-tracker
//!
//! Game-state tracking for The Resistance: Avalon.
//!
//! ## Design Principles
//!
//! 1. **Values, not objects**: a [`GameState`] is an immutable snapshot. Every
//!    transition returns a new state and leaves its input untouched.
//!
//! 2. **Validate before write**: no state reaches a store unless every id it
//!    mentions belongs to a registered player.
//!
//! 3. **Indices inside, numbers outside**: the engine works with 0-based quest
//!    and round indices; the HTTP surface speaks 1-based numbers.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so a transition
//!   copies only the path it changes.
//!
//! - **Pluggable storage**: the [`GameStore`] trait has a SQLite
//!   implementation for durability and an in-memory one for tests.
//!
//! ## Modules
//!
//! - `core`: Player ids, players, rounds, quests, game state
//! - `engine`: Pure transitions, queries and validation
//! - `store`: Player registry, game records, notes
//! - `config`: Store and server configuration
//! - `server`: axum HTTP API (feature `server`)

pub mod config;
pub mod core;
pub mod engine;
#[cfg(feature = "server")]
pub mod server;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    player_id_set, quest_index_to_number, quest_number_to_index, GameState, Player, PlayerId,
    PlayerIdSet, Quest, QuestOutcome, Round, RoundOutcome,
};

pub use crate::engine::{
    add_player, add_quest, add_round, create_initial_state, get_current_quest,
    get_current_round, get_quest_result, parse_game_document, remove_player, remove_quest,
    remove_round, round_approved, update_approvals, update_fails, update_team,
    validate_game_state, EngineError, ValidationError,
};

pub use crate::store::{
    update_game, GameId, GameRecord, GameStatus, GameStore, MemoryStore, Note, NoteId,
    SqliteStore, StoreError,
};

pub use crate::config::{Environment, ServerConfig, StoreConfig};
