//! Pure state transitions.
//!
//! Every function here takes the current state by reference and returns a new
//! state. The argument is never modified, on success or on failure.
//!
//! Cloning a `GameState` is O(1); the `get_mut` calls below copy only the
//! nodes on the path to the changed quest or round, so old and new states
//! share everything else.

use tracing::{debug, warn};

use super::error::{EngineError, IndexTarget};
use crate::core::{GameState, Player, PlayerId, Quest, Round};

/// Create an empty game state.
#[must_use]
pub fn create_initial_state() -> GameState {
    debug!("creating initial game state");
    GameState::new()
}

/// Seat a player in the game.
///
/// Duplicate ids are not rejected; the player is appended again.
#[must_use]
pub fn add_player(state: &GameState, player_id: PlayerId, role: &str) -> GameState {
    debug!(%player_id, role, "adding player");
    let mut next = state.clone();
    next.players.push_back(Player::new(player_id, role));
    next
}

/// Remove the first seat held by `player_id`.
pub fn remove_player(state: &GameState, player_id: PlayerId) -> Result<GameState, EngineError> {
    debug!(%player_id, "removing player");
    let Some(position) = state.players.iter().position(|p| p.player_id == player_id) else {
        warn!(%player_id, "player not in game");
        return Err(EngineError::PlayerNotFound(player_id));
    };

    let mut next = state.clone();
    next.players.remove(position);
    Ok(next)
}

/// Start a new quest with no rounds.
///
/// The new quest's 1-based number equals the quest count of the result.
#[must_use]
pub fn add_quest(state: &GameState) -> GameState {
    debug!(quest_count = state.quest_count(), "adding quest");
    let mut next = state.clone();
    next.quests.push_back(Quest::new());
    next
}

/// Remove the quest at `quest_index`.
pub fn remove_quest(state: &GameState, quest_index: usize) -> Result<GameState, EngineError> {
    debug!(quest_index, "removing quest");
    check_quest_index(state, quest_index)?;

    let mut next = state.clone();
    next.quests.remove(quest_index);
    Ok(next)
}

/// Propose a new team for the quest at `quest_index`.
///
/// The round starts with no approvals and zero fails. Team and king ids are
/// not checked against the registry here; the store validates on commit.
pub fn add_round(
    state: &GameState,
    quest_index: usize,
    team: &[PlayerId],
    king: PlayerId,
) -> Result<GameState, EngineError> {
    debug!(quest_index, ?team, %king, "adding round");
    modify_quest(state, quest_index, |quest| {
        quest.rounds.push_back(Round::new(team, king));
    })
}

/// Remove a round from a quest.
pub fn remove_round(
    state: &GameState,
    quest_index: usize,
    round_index: usize,
) -> Result<GameState, EngineError> {
    debug!(quest_index, round_index, "removing round");
    check_round_index(state, quest_index, round_index)?;
    modify_quest(state, quest_index, |quest| {
        quest.rounds.remove(round_index);
    })
}

/// Replace the team of a round.
pub fn update_team(
    state: &GameState,
    quest_index: usize,
    round_index: usize,
    team: &[PlayerId],
) -> Result<GameState, EngineError> {
    debug!(quest_index, round_index, ?team, "updating team");
    modify_round(state, quest_index, round_index, |round| {
        round.team = team.iter().copied().collect();
    })
}

/// Replace the approval votes of a round.
pub fn update_approvals(
    state: &GameState,
    quest_index: usize,
    round_index: usize,
    approvals: &[PlayerId],
) -> Result<GameState, EngineError> {
    debug!(quest_index, round_index, ?approvals, "updating approvals");
    modify_round(state, quest_index, round_index, |round| {
        round.approvals = approvals.iter().copied().collect();
    })
}

/// Record the fail cards played for a round.
///
/// A negative value marks the round as unresolved.
pub fn update_fails(
    state: &GameState,
    quest_index: usize,
    round_index: usize,
    fails: i64,
) -> Result<GameState, EngineError> {
    debug!(quest_index, round_index, fails, "updating fails");
    modify_round(state, quest_index, round_index, |round| {
        round.fails = fails;
    })
}

// === Index checks ===

fn check_quest_index(state: &GameState, quest_index: usize) -> Result<(), EngineError> {
    let len = state.quest_count();
    if quest_index >= len {
        warn!(quest_index, len, "invalid quest index");
        return Err(EngineError::IndexOutOfRange {
            target: IndexTarget::Quest,
            index: quest_index,
            len,
        });
    }
    Ok(())
}

fn check_round_index(
    state: &GameState,
    quest_index: usize,
    round_index: usize,
) -> Result<(), EngineError> {
    check_quest_index(state, quest_index)?;
    let len = state.quests[quest_index].round_count();
    if round_index >= len {
        warn!(quest_index, round_index, len, "invalid round index");
        return Err(EngineError::IndexOutOfRange {
            target: IndexTarget::Round,
            index: round_index,
            len,
        });
    }
    Ok(())
}

// === Copy-on-write helpers ===

fn modify_quest<F>(state: &GameState, quest_index: usize, op: F) -> Result<GameState, EngineError>
where
    F: FnOnce(&mut Quest),
{
    check_quest_index(state, quest_index)?;
    let mut next = state.clone();
    if let Some(quest) = next.quests.get_mut(quest_index) {
        op(quest);
    }
    Ok(next)
}

fn modify_round<F>(
    state: &GameState,
    quest_index: usize,
    round_index: usize,
    op: F,
) -> Result<GameState, EngineError>
where
    F: FnOnce(&mut Round),
{
    check_round_index(state, quest_index, round_index)?;
    modify_quest(state, quest_index, |quest| {
        if let Some(round) = quest.rounds.get_mut(round_index) {
            op(round);
        }
    })
}
