//! Persistence for players, games and notes.
//!
//! The [`GameStore`] trait is the contract the rest of the crate relies on:
//! - game states are keyed by [`GameId`];
//! - every commit is validated against the live player registry first, and a
//!   rejected state leaves nothing written;
//! - the registry only grows and issues unique ids;
//! - notes are append-only.
//!
//! Write methods take `&mut self`. Whoever owns a store therefore serializes
//! load → transform → commit cycles; [`update_game`] packages that cycle.
//!
//! Two implementations ship: [`MemoryStore`] and [`SqliteStore`].

pub mod error;
pub mod memory;
pub mod records;
pub mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use records::{GameId, GameRecord, GameStatus, Note, NoteId, PlayerRecord};
pub use sqlite::SqliteStore;

use tracing::debug;

use crate::core::{GameState, PlayerId, PlayerIdSet};
use crate::engine::EngineError;

/// Storage collaborator for the engine.
pub trait GameStore {
    // === Player registry ===

    /// Register a new player and return their id.
    fn register_player(&mut self, name: &str) -> Result<PlayerId, StoreError>;

    /// Look up a registered player.
    fn get_player(&self, player_id: PlayerId) -> Result<Option<PlayerRecord>, StoreError>;

    /// All registered players, in registration order.
    fn list_players(&self) -> Result<Vec<PlayerRecord>, StoreError>;

    /// Ids of all registered players.
    fn list_valid_player_ids(&self) -> Result<PlayerIdSet, StoreError>;

    // === Games ===

    /// Create a game with an empty state.
    fn create_game(&mut self) -> Result<GameId, StoreError>;

    /// Fetch a full game record.
    fn get_game(&self, game_id: &GameId) -> Result<GameRecord, StoreError>;

    /// All games, oldest first.
    fn list_games(&self) -> Result<Vec<GameRecord>, StoreError>;

    /// Load the current state of a game.
    fn load(&self, game_id: &GameId) -> Result<GameState, StoreError> {
        Ok(self.get_game(game_id)?.state)
    }

    /// Validate `state` against the registry and, if it passes, store it.
    fn commit(&mut self, game_id: &GameId, state: &GameState) -> Result<(), StoreError>;

    /// Move a game to a new lifecycle status.
    fn set_status(&mut self, game_id: &GameId, status: GameStatus) -> Result<(), StoreError>;

    // === Notes ===

    /// Append a note to a game.
    fn add_note(&mut self, game_id: &GameId, content: &str) -> Result<NoteId, StoreError>;

    /// Notes for a game, newest first.
    fn list_notes(&self, game_id: &GameId) -> Result<Vec<Note>, StoreError>;

    /// Look up a single note.
    fn get_note(&self, note_id: &NoteId) -> Result<Option<Note>, StoreError>;
}

/// Load a game's state, apply `transition`, and commit the result.
///
/// The exclusive borrow keeps the whole cycle free of interleaved writers.
/// Returns the committed state.
pub fn update_game<S, F>(
    store: &mut S,
    game_id: &GameId,
    transition: F,
) -> Result<GameState, StoreError>
where
    S: GameStore + ?Sized,
    F: FnOnce(&GameState) -> Result<GameState, EngineError>,
{
    let current = store.load(game_id)?;
    let next = transition(&current)?;
    store.commit(game_id, &next)?;
    debug!(%game_id, "game state updated");
    Ok(next)
}
