//! In-memory store.
//!
//! Same semantics as the SQLite store, without durability. Used by tests and
//! for running the server without a database file.

use chrono::Utc;
use rustc_hash::FxHashMap;
use tracing::info;

use super::error::StoreError;
use super::records::{GameId, GameRecord, GameStatus, Note, NoteId, PlayerRecord};
use super::GameStore;
use crate::core::{GameState, PlayerId, PlayerIdSet};
use crate::engine::validate_game_state;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    /// Registered players; `player_id` is index + 1.
    players: Vec<PlayerRecord>,

    /// Games in creation order.
    games: Vec<GameRecord>,

    /// Game id -> position in `games`.
    game_index: FxHashMap<GameId, usize>,

    /// Notes in insertion order.
    notes: Vec<Note>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn game_mut(&mut self, game_id: &GameId) -> Result<&mut GameRecord, StoreError> {
        let index = *self
            .game_index
            .get(game_id)
            .ok_or_else(|| StoreError::GameNotFound(game_id.clone()))?;
        Ok(&mut self.games[index])
    }

    fn require_game(&self, game_id: &GameId) -> Result<(), StoreError> {
        if self.game_index.contains_key(game_id) {
            Ok(())
        } else {
            Err(StoreError::GameNotFound(game_id.clone()))
        }
    }
}

impl GameStore for MemoryStore {
    fn register_player(&mut self, name: &str) -> Result<PlayerId, StoreError> {
        let player_id = PlayerId::new(self.players.len() as i64 + 1);
        self.players.push(PlayerRecord {
            player_id,
            name: name.to_string(),
        });
        info!(%player_id, name, "registered player");
        Ok(player_id)
    }

    fn get_player(&self, player_id: PlayerId) -> Result<Option<PlayerRecord>, StoreError> {
        Ok(self
            .players
            .iter()
            .find(|p| p.player_id == player_id)
            .cloned())
    }

    fn list_players(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        Ok(self.players.clone())
    }

    fn list_valid_player_ids(&self) -> Result<PlayerIdSet, StoreError> {
        Ok(self.players.iter().map(|p| p.player_id).collect())
    }

    fn create_game(&mut self) -> Result<GameId, StoreError> {
        let game_id = GameId::generate();
        self.game_index.insert(game_id.clone(), self.games.len());
        self.games.push(GameRecord::new(game_id.clone(), Utc::now()));
        info!(%game_id, "created game");
        Ok(game_id)
    }

    fn get_game(&self, game_id: &GameId) -> Result<GameRecord, StoreError> {
        self.game_index
            .get(game_id)
            .map(|&index| self.games[index].clone())
            .ok_or_else(|| StoreError::GameNotFound(game_id.clone()))
    }

    fn list_games(&self) -> Result<Vec<GameRecord>, StoreError> {
        Ok(self.games.clone())
    }

    fn commit(&mut self, game_id: &GameId, state: &GameState) -> Result<(), StoreError> {
        self.require_game(game_id)?;
        let valid = self.list_valid_player_ids()?;
        validate_game_state(state, &valid)?;

        self.game_mut(game_id)?.state = state.clone();
        Ok(())
    }

    fn set_status(&mut self, game_id: &GameId, status: GameStatus) -> Result<(), StoreError> {
        self.game_mut(game_id)?.active = status;
        info!(%game_id, %status, "game status changed");
        Ok(())
    }

    fn add_note(&mut self, game_id: &GameId, content: &str) -> Result<NoteId, StoreError> {
        self.require_game(game_id)?;
        let note_id = NoteId::generate();
        self.notes.push(Note {
            note_id: note_id.clone(),
            game_id: game_id.clone(),
            timestamp: Utc::now(),
            content: content.to_string(),
        });
        Ok(note_id)
    }

    fn list_notes(&self, game_id: &GameId) -> Result<Vec<Note>, StoreError> {
        self.require_game(game_id)?;
        Ok(self
            .notes
            .iter()
            .rev()
            .filter(|note| &note.game_id == game_id)
            .cloned()
            .collect())
    }

    fn get_note(&self, note_id: &NoteId) -> Result<Option<Note>, StoreError> {
        Ok(self.notes.iter().find(|n| &n.note_id == note_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{add_player, add_quest, add_round};

    #[test]
    fn test_register_players_sequential_ids() {
        let mut store = MemoryStore::new();

        let a = store.register_player("Alice").unwrap();
        let b = store.register_player("Bob").unwrap();

        assert_eq!(a, PlayerId::new(1));
        assert_eq!(b, PlayerId::new(2));
        assert_eq!(store.list_players().unwrap().len(), 2);
        assert_eq!(store.get_player(b).unwrap().unwrap().name, "Bob");
        assert!(store.get_player(PlayerId::new(3)).unwrap().is_none());
    }

    #[test]
    fn test_commit_rejects_unregistered_player() {
        let mut store = MemoryStore::new();
        store.register_player("Alice").unwrap();
        let game = store.create_game().unwrap();

        let bad = add_player(&GameState::new(), PlayerId::new(99), "");
        let err = store.commit(&game, &bad).unwrap_err();

        match err {
            StoreError::ValidationFailed(err) => assert!(err.reason.contains("99")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.load(&game).unwrap(), GameState::new());
    }

    #[test]
    fn test_commit_unknown_game() {
        let mut store = MemoryStore::new();
        let err = store.commit(&GameId::from("missing"), &GameState::new()).unwrap_err();

        assert!(matches!(err, StoreError::GameNotFound(_)));
    }

    #[test]
    fn test_commit_and_load() {
        let mut store = MemoryStore::new();
        let alice = store.register_player("Alice").unwrap();
        let game = store.create_game().unwrap();

        let state = add_quest(&add_player(&GameState::new(), alice, ""));
        let state = add_round(&state, 0, &[alice], alice).unwrap();
        store.commit(&game, &state).unwrap();

        assert_eq!(store.load(&game).unwrap(), state);
    }

    #[test]
    fn test_status() {
        let mut store = MemoryStore::new();
        let game = store.create_game().unwrap();
        assert_eq!(store.get_game(&game).unwrap().active, GameStatus::NotStarted);

        store.set_status(&game, GameStatus::Active).unwrap();
        assert_eq!(store.get_game(&game).unwrap().active, GameStatus::Active);

        assert!(store.set_status(&GameId::from("nope"), GameStatus::Ended).is_err());
    }

    #[test]
    fn test_notes_newest_first_and_scoped() {
        let mut store = MemoryStore::new();
        let g1 = store.create_game().unwrap();
        let g2 = store.create_game().unwrap();

        let first = store.add_note(&g1, "first").unwrap();
        store.add_note(&g2, "other game").unwrap();
        store.add_note(&g1, "second").unwrap();

        let notes = store.list_notes(&g1).unwrap();
        let contents: Vec<_> = notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);

        assert_eq!(store.get_note(&first).unwrap().unwrap().content, "first");
        assert!(store.add_note(&GameId::from("nope"), "x").is_err());
    }

    #[test]
    fn test_list_games_in_creation_order() {
        let mut store = MemoryStore::new();
        let g1 = store.create_game().unwrap();
        let g2 = store.create_game().unwrap();

        let ids: Vec<_> = store.list_games().unwrap().into_iter().map(|g| g.game_id).collect();
        assert_eq!(ids, vec![g1, g2]);
    }
}
