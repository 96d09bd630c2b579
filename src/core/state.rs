//! Game state: the root aggregate for one game.
//!
//! ## GameState
//!
//! - Players seated in the game (with roles once revealed)
//! - Quests, each holding its rounds
//!
//! `GameState` is a value. Transitions in [`crate::engine`] take a reference
//! and hand back a new state; the input is never touched. Cloning is O(1)
//! because both collections are `im` persistent vectors, so a transition only
//! copies the path it modifies.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use super::quest::{Quest, Round};

/// Full state of a single game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    /// Players, in the order they were added.
    pub players: Vector<Player>,

    /// Quests, oldest first.
    pub quests: Vector<Quest>,
}

impl GameState {
    /// Create an empty game state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Players ===

    /// Number of seated players (duplicates included).
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Iterate over seated player ids, in seat order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.player_id)
    }

    /// Find the first seat held by a player.
    #[must_use]
    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Is this player seated in the game?
    #[must_use]
    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.player(player_id).is_some()
    }

    // === Quests ===

    /// Number of quests started.
    #[must_use]
    pub fn quest_count(&self) -> usize {
        self.quests.len()
    }

    /// Get a quest by 0-based index.
    #[must_use]
    pub fn quest(&self, index: usize) -> Option<&Quest> {
        self.quests.get(index)
    }

    /// Get a round by quest and round index.
    #[must_use]
    pub fn round(&self, quest_index: usize, round_index: usize) -> Option<&Round> {
        self.quest(quest_index)?.round(round_index)
    }

    /// The most recent quest, if any.
    #[must_use]
    pub fn current_quest(&self) -> Option<&Quest> {
        self.quests.last()
    }

    /// The most recent round of the most recent quest, if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.current_quest()?.current_round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        let mut state = GameState::new();
        state.players.push_back(Player::unrevealed(PlayerId::new(1)));
        state.players.push_back(Player::new(PlayerId::new(2), "Merlin"));

        let mut quest = Quest::new();
        quest.rounds.push_back(Round::new(&[PlayerId::new(1)], PlayerId::new(1)));
        quest.rounds.push_back(Round::new(&[PlayerId::new(2)], PlayerId::new(2)));
        state.quests.push_back(quest);
        state
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = GameState::new();

        assert_eq!(state.player_count(), 0);
        assert_eq!(state.quest_count(), 0);
        assert!(state.current_quest().is_none());
        assert!(state.current_round().is_none());
    }

    #[test]
    fn test_player_lookup() {
        let state = sample_state();

        assert!(state.has_player(PlayerId::new(1)));
        assert!(!state.has_player(PlayerId::new(3)));
        assert_eq!(state.player(PlayerId::new(2)).unwrap().role, "Merlin");

        let ids: Vec<_> = state.player_ids().collect();
        assert_eq!(ids, vec![PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_current_round_is_last_of_last_quest() {
        let state = sample_state();

        let current = state.current_round().unwrap();
        assert_eq!(current.king(), PlayerId::new(2));
        assert_eq!(state.round(0, 0).unwrap().king(), PlayerId::new(1));
        assert!(state.round(0, 2).is_none());
        assert!(state.round(1, 0).is_none());
    }

    #[test]
    fn test_current_round_none_for_empty_quest() {
        let mut state = sample_state();
        state.quests.push_back(Quest::new());

        assert!(state.current_quest().is_some());
        assert!(state.current_round().is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let state = sample_state();
        let mut cloned = state.clone();
        cloned.players.push_back(Player::unrevealed(PlayerId::new(3)));

        assert_eq!(state.player_count(), 2);
        assert_eq!(cloned.player_count(), 3);
    }

    #[test]
    fn test_serialization() {
        let state = sample_state();
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
        assert_eq!(
            serde_json::to_string(&GameState::new()).unwrap(),
            r#"{"players":[],"quests":[]}"#
        );
    }
}
