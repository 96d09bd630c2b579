//! Core game-state types: player ids, players, rounds, quests, state.
//!
//! These are plain values with no behaviour beyond read accessors. All state
//! changes go through [`crate::engine`].

pub mod player;
pub mod quest;
pub mod state;

pub use player::{player_id_set, Player, PlayerId, PlayerIdSet};
pub use quest::{
    quest_index_to_number, quest_number_to_index, PlayerList, Quest, QuestOutcome, Round,
    RoundOutcome,
};
pub use state::GameState;
