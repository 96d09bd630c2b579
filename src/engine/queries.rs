//! Read-only queries over a game state.

use crate::core::{GameState, Quest, QuestOutcome, Round};

/// The most recent quest, or `None` before the first quest starts.
#[must_use]
pub fn get_current_quest(state: &GameState) -> Option<&Quest> {
    state.current_quest()
}

/// The most recent round of the most recent quest.
#[must_use]
pub fn get_current_round(state: &GameState) -> Option<&Round> {
    state.current_round()
}

/// Result of the quest at `quest_index`.
///
/// Taken from the latest resolved round (`fails >= 0`). Returns `None` if the
/// index is out of range, the quest has no rounds, or no round is resolved.
#[must_use]
pub fn get_quest_result(state: &GameState, quest_index: usize) -> Option<QuestOutcome> {
    state.quest(quest_index)?.outcome()
}

/// Did a strict majority of the current roster approve this round?
///
/// The threshold tracks the live player count, not the team size.
#[must_use]
pub fn round_approved(state: &GameState, round: &Round) -> bool {
    round.approvals().len() > state.player_count() / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::engine::transitions::*;

    fn p(id: i64) -> PlayerId {
        PlayerId::new(id)
    }

    fn five_players() -> GameState {
        (1..=5).fold(create_initial_state(), |state, id| add_player(&state, p(id), ""))
    }

    #[test]
    fn test_current_quest_and_round_empty() {
        let state = create_initial_state();
        assert!(get_current_quest(&state).is_none());
        assert!(get_current_round(&state).is_none());

        let state = add_quest(&state);
        assert!(get_current_quest(&state).is_some());
        assert!(get_current_round(&state).is_none());
    }

    #[test]
    fn test_quest_result() {
        let state = add_quest(&five_players());
        assert_eq!(get_quest_result(&state, 0), None);
        assert_eq!(get_quest_result(&state, 3), None);

        let state = add_round(&state, 0, &[p(1), p(2)], p(1)).unwrap();
        assert_eq!(get_quest_result(&state, 0), Some(QuestOutcome::Success));

        let state = update_fails(&state, 0, 0, 1).unwrap();
        assert_eq!(get_quest_result(&state, 0), Some(QuestOutcome::Failure));

        let state = update_fails(&state, 0, 0, Round::PENDING_FAILS).unwrap();
        assert_eq!(get_quest_result(&state, 0), None);
    }

    #[test]
    fn test_round_approved_tracks_roster() {
        let state = five_players();
        let mut round = Round::new(&[p(1), p(2)], p(1));

        round.approvals = [p(1), p(2)].into_iter().collect();
        assert!(!round_approved(&state, &round));

        round.approvals.push(p(3));
        assert!(round_approved(&state, &round));

        // Adding a sixth player raises the bar to 4
        let state = add_player(&state, p(6), "");
        assert!(!round_approved(&state, &round));
    }

    #[test]
    fn test_round_approved_empty_roster() {
        let state = create_initial_state();
        let round = Round::new(&[], p(1));

        // 0 > 0 is false
        assert!(!round_approved(&state, &round));
    }
}
