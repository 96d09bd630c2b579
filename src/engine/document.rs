//! Validation of untyped game-state documents.
//!
//! Whole-state replacements arrive as raw JSON. Before such a document becomes
//! a [`GameState`] it is walked field by field: presence and type of every
//! required field, plus the same registry checks as
//! [`validate_game_state`](super::validate_game_state). Structural and
//! referential checks are interleaved in document order, so the reason
//! reported is always the first problem a reader would hit.

use serde_json::{Map, Value};
use tracing::debug;

use super::error::ValidationError;
use super::validate::{check_approval, check_king, check_player, check_team_member, reject};
use crate::core::{GameState, PlayerId, PlayerIdSet};

type Object = Map<String, Value>;

/// Validate a raw document and convert it into a `GameState`.
///
/// `approvals` and `fails` may be absent from a round; they default to an
/// empty list and zero.
pub fn parse_game_document(
    document: &Value,
    valid_player_ids: &PlayerIdSet,
) -> Result<GameState, ValidationError> {
    debug!(valid_ids = valid_player_ids.len(), "validating game state document");

    let root = document
        .as_object()
        .ok_or_else(|| reject("State must be an object".to_string()))?;
    let players = field(root, "players", || "State missing 'players' field".to_string())?;
    let quests = field(root, "quests", || "State missing 'quests' field".to_string())?;
    let players = players
        .as_array()
        .ok_or_else(|| reject("Players must be a list".to_string()))?;
    let quests = quests
        .as_array()
        .ok_or_else(|| reject("Quests must be a list".to_string()))?;

    for (player_idx, player) in players.iter().enumerate() {
        check_player_entry(valid_player_ids, player_idx, player)?;
    }

    for (quest_idx, quest) in quests.iter().enumerate() {
        let quest = quest
            .as_object()
            .ok_or_else(|| reject(format!("Quest {quest_idx} must be an object")))?;
        let rounds = field(quest, "rounds", || format!("Quest {quest_idx} missing 'rounds' field"))?;
        let rounds = rounds
            .as_array()
            .ok_or_else(|| reject(format!("Quest {quest_idx} rounds must be a list")))?;

        for (round_idx, round) in rounds.iter().enumerate() {
            check_round_entry(valid_player_ids, quest_idx, round_idx, round)?;
        }
    }

    serde_json::from_value(document.clone())
        .map_err(|err| reject(format!("Malformed game state: {err}")))
}

fn check_player_entry(
    valid: &PlayerIdSet,
    player_idx: usize,
    player: &Value,
) -> Result<(), ValidationError> {
    let player = player
        .as_object()
        .ok_or_else(|| reject(format!("Player {player_idx} must be an object")))?;
    let id = field(player, "player_id", || {
        format!("Player {player_idx} missing 'player_id' field")
    })?;
    let role = field(player, "role", || format!("Player {player_idx} missing 'role' field"))?;

    let id = id
        .as_i64()
        .ok_or_else(|| reject(format!("Player {player_idx} player_id must be an integer")))?;
    if !role.is_string() {
        return Err(reject(format!("Player {player_idx} role must be a string")));
    }
    // An empty role is fine: roles are revealed at the end of the game.
    check_player(valid, PlayerId::new(id))
}

fn check_round_entry(
    valid: &PlayerIdSet,
    quest_idx: usize,
    round_idx: usize,
    round: &Value,
) -> Result<(), ValidationError> {
    let location = format!("Quest {quest_idx} Round {round_idx}");
    let round = round
        .as_object()
        .ok_or_else(|| reject(format!("Round {round_idx} in Quest {quest_idx} must be an object")))?;

    let team = field(round, "team", || {
        format!("Round {round_idx} in Quest {quest_idx} missing 'team' field")
    })?;
    let king = field(round, "king", || {
        format!("Round {round_idx} in Quest {quest_idx} missing 'king' field")
    })?;

    let team = team
        .as_array()
        .ok_or_else(|| reject(format!("Team in {location} must be a list")))?;
    let king = king
        .as_i64()
        .ok_or_else(|| reject(format!("King in {location} must be an integer")))?;
    check_king(valid, quest_idx, round_idx, PlayerId::new(king))?;

    for member in team {
        let id = member
            .as_i64()
            .ok_or_else(|| reject(format!("Team member id in {location} must be an integer")))?;
        check_team_member(valid, quest_idx, round_idx, PlayerId::new(id))?;
    }

    if let Some(approvals) = round.get("approvals") {
        let approvals = approvals
            .as_array()
            .ok_or_else(|| reject(format!("Approvals in {location} must be a list")))?;
        for approval in approvals {
            let id = approval
                .as_i64()
                .ok_or_else(|| reject(format!("Approval id in {location} must be an integer")))?;
            check_approval(valid, quest_idx, round_idx, PlayerId::new(id))?;
        }
    }

    if let Some(fails) = round.get("fails") {
        if fails.as_i64().is_none() {
            return Err(reject(format!("Fails in {location} must be an integer")));
        }
    }

    Ok(())
}

fn field<'a, F>(object: &'a Object, key: &str, missing: F) -> Result<&'a Value, ValidationError>
where
    F: FnOnce() -> String,
{
    object.get(key).ok_or_else(|| reject(missing()))
}
