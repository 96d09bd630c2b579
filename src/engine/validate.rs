//! Referential validation of a typed game state.
//!
//! The type system already guarantees shape (every round has a team, a king,
//! integer fails...). What remains is checking that every player id the state
//! mentions is in the registry the caller supplies.
//!
//! Walk order is fixed: players in seat order, then quests and rounds in
//! order, and within a round king, team, approvals. The first violation is
//! returned; later ones are not reported.

use tracing::{debug, warn};

use super::error::ValidationError;
use crate::core::{GameState, PlayerId, PlayerIdSet, Round};

/// Check that every id in `state` is a registered player.
///
/// This is the gate every store runs before persisting a state.
pub fn validate_game_state(
    state: &GameState,
    valid_player_ids: &PlayerIdSet,
) -> Result<(), ValidationError> {
    debug!(
        valid_ids = valid_player_ids.len(),
        players = state.player_count(),
        quests = state.quest_count(),
        "validating game state"
    );

    for player in &state.players {
        check_player(valid_player_ids, player.player_id)?;
    }

    for (quest_idx, quest) in state.quests.iter().enumerate() {
        for (round_idx, round) in quest.rounds.iter().enumerate() {
            check_round(valid_player_ids, quest_idx, round_idx, round)?;
        }
    }

    debug!("game state validation successful");
    Ok(())
}

fn check_round(
    valid: &PlayerIdSet,
    quest_idx: usize,
    round_idx: usize,
    round: &Round,
) -> Result<(), ValidationError> {
    check_king(valid, quest_idx, round_idx, round.king)?;
    for &id in round.team() {
        check_team_member(valid, quest_idx, round_idx, id)?;
    }
    for &id in round.approvals() {
        check_approval(valid, quest_idx, round_idx, id)?;
    }
    Ok(())
}

// Shared with the document validator so both report identical reasons.

pub(super) fn check_player(valid: &PlayerIdSet, id: PlayerId) -> Result<(), ValidationError> {
    require(valid, id, || format!("Invalid player id: {id}"))
}

pub(super) fn check_king(
    valid: &PlayerIdSet,
    quest_idx: usize,
    round_idx: usize,
    id: PlayerId,
) -> Result<(), ValidationError> {
    require(valid, id, || {
        format!("Invalid king id in Quest {quest_idx} Round {round_idx}: {id}")
    })
}

pub(super) fn check_team_member(
    valid: &PlayerIdSet,
    quest_idx: usize,
    round_idx: usize,
    id: PlayerId,
) -> Result<(), ValidationError> {
    require(valid, id, || {
        format!("Invalid team member id in Quest {quest_idx} Round {round_idx}: {id}")
    })
}

pub(super) fn check_approval(
    valid: &PlayerIdSet,
    quest_idx: usize,
    round_idx: usize,
    id: PlayerId,
) -> Result<(), ValidationError> {
    require(valid, id, || {
        format!("Invalid approval id in Quest {quest_idx} Round {round_idx}: {id}")
    })
}

fn require<F>(valid: &PlayerIdSet, id: PlayerId, reason: F) -> Result<(), ValidationError>
where
    F: FnOnce() -> String,
{
    if valid.contains(&id) {
        Ok(())
    } else {
        Err(reject(reason()))
    }
}

pub(super) fn reject(reason: String) -> ValidationError {
    warn!(%reason, "game state validation failed");
    ValidationError::new(reason)
}
