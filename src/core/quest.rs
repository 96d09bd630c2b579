//! Quests and the rounds proposed within them.
//!
//! A quest collects every team proposal made for it. Rejected proposals stay
//! in the list, so index 0 is always the first proposal and the last entry is
//! the one currently on the table.
//!
//! ## Numbering
//!
//! Quest indices are 0-based everywhere inside the crate. Anything shown to
//! players or sent over the wire uses 1-based quest numbers; convert with
//! [`quest_index_to_number`] and [`quest_number_to_index`].

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;

/// Ordered list of player ids (teams, approvals).
///
/// Inline storage covers the largest Avalon team without allocating.
pub type PlayerList = SmallVec<[PlayerId; 5]>;

/// Outcome of a single round once the quest has been run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Voting or quest resolution has not finished (negative `fails`).
    Pending,
    /// No fail cards were played.
    Success,
    /// At least one fail card was played.
    Failure,
}

/// Result of a quest, taken from its latest resolved round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestOutcome {
    Success,
    Failure,
}

impl QuestOutcome {
    /// Did the quest succeed?
    #[must_use]
    pub fn is_success(self) -> bool {
        self == QuestOutcome::Success
    }
}

/// One team proposal plus its votes and outcome.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Round {
    /// Proposed team, in the order the king named them.
    pub team: PlayerList,

    /// Players who approved the team. Order-preserving, not deduplicated.
    #[serde(default)]
    pub approvals: PlayerList,

    /// Fail cards played. Negative means not yet resolved.
    #[serde(default)]
    pub fails: i64,

    /// Player who proposed the team.
    pub king: PlayerId,
}

impl Round {
    /// Value of `fails` that marks a round as unresolved.
    pub const PENDING_FAILS: i64 = -1;

    /// Create a freshly proposed round: no approvals, zero fails.
    #[must_use]
    pub fn new(team: &[PlayerId], king: PlayerId) -> Self {
        Self {
            team: SmallVec::from_slice(team),
            approvals: SmallVec::new(),
            fails: 0,
            king,
        }
    }

    /// The king for this round.
    #[must_use]
    pub fn king(&self) -> PlayerId {
        self.king
    }

    /// The proposed team.
    #[must_use]
    pub fn team(&self) -> &[PlayerId] {
        &self.team
    }

    /// The approval votes.
    #[must_use]
    pub fn approvals(&self) -> &[PlayerId] {
        &self.approvals
    }

    /// Fail cards played.
    #[must_use]
    pub fn fails(&self) -> i64 {
        self.fails
    }

    /// Has this round been resolved?
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.fails >= 0
    }

    /// Tri-state outcome derived from `fails`.
    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        match self.fails {
            f if f < 0 => RoundOutcome::Pending,
            0 => RoundOutcome::Success,
            _ => RoundOutcome::Failure,
        }
    }

    /// Iterate over every player id this round references (king, team, approvals).
    pub fn referenced_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        std::iter::once(self.king)
            .chain(self.team.iter().copied())
            .chain(self.approvals.iter().copied())
    }
}

/// A quest: every round proposed for it, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quest {
    pub rounds: Vector<Round>,
}

impl Quest {
    /// Create a quest with no rounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a round by 0-based index.
    #[must_use]
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    /// The most recent round, if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// Number of rounds proposed so far.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Outcome of the latest resolved round.
    ///
    /// Returns `None` when the quest has no rounds or none is resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<QuestOutcome> {
        self.rounds
            .iter()
            .rev()
            .find(|round| round.is_resolved())
            .map(|round| {
                if round.fails == 0 {
                    QuestOutcome::Success
                } else {
                    QuestOutcome::Failure
                }
            })
    }
}

/// Convert a 0-based quest index to the 1-based quest number.
#[must_use]
pub const fn quest_index_to_number(index: usize) -> usize {
    index + 1
}

/// Convert a 1-based quest number to a 0-based index.
///
/// Quest number 0 does not exist and maps to `None`.
///
/// ```
/// use avalon_tracker::core::{quest_index_to_number, quest_number_to_index};
///
/// assert_eq!(quest_number_to_index(1), Some(0));
/// assert_eq!(quest_number_to_index(0), None);
/// assert_eq!(quest_number_to_index(quest_index_to_number(4)), Some(4));
/// ```
#[must_use]
pub const fn quest_number_to_index(number: usize) -> Option<usize> {
    number.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<PlayerId> {
        raw.iter().copied().map(PlayerId::new).collect()
    }

    #[test]
    fn test_new_round_defaults() {
        let round = Round::new(&ids(&[1, 2]), PlayerId::new(1));

        assert_eq!(round.team(), ids(&[1, 2]).as_slice());
        assert!(round.approvals().is_empty());
        assert_eq!(round.fails(), 0);
        assert_eq!(round.king(), PlayerId::new(1));
    }

    #[test]
    fn test_round_outcome() {
        let mut round = Round::new(&ids(&[1, 2]), PlayerId::new(1));
        assert_eq!(round.outcome(), RoundOutcome::Success);

        round.fails = 2;
        assert_eq!(round.outcome(), RoundOutcome::Failure);

        round.fails = Round::PENDING_FAILS;
        assert_eq!(round.outcome(), RoundOutcome::Pending);
        assert!(!round.is_resolved());
    }

    #[test]
    fn test_referenced_ids_order() {
        let mut round = Round::new(&ids(&[2, 3]), PlayerId::new(1));
        round.approvals = SmallVec::from_slice(&ids(&[4]));

        let refs: Vec<_> = round.referenced_ids().collect();
        assert_eq!(refs, ids(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_quest_outcome_uses_latest_resolved_round() {
        let mut quest = Quest::new();
        assert_eq!(quest.outcome(), None);

        let mut failed = Round::new(&ids(&[1, 2]), PlayerId::new(1));
        failed.fails = 1;
        quest.rounds.push_back(failed);
        assert_eq!(quest.outcome(), Some(QuestOutcome::Failure));

        let mut pending = Round::new(&ids(&[3, 4]), PlayerId::new(2));
        pending.fails = Round::PENDING_FAILS;
        quest.rounds.push_back(pending);
        // Pending round is skipped
        assert_eq!(quest.outcome(), Some(QuestOutcome::Failure));

        quest.rounds.push_back(Round::new(&ids(&[3, 4]), PlayerId::new(3)));
        assert_eq!(quest.outcome(), Some(QuestOutcome::Success));
    }

    #[test]
    fn test_quest_outcome_all_pending() {
        let mut quest = Quest::new();
        let mut pending = Round::new(&ids(&[1]), PlayerId::new(1));
        pending.fails = Round::PENDING_FAILS;
        quest.rounds.push_back(pending);

        assert_eq!(quest.outcome(), None);
    }

    #[test]
    fn test_quest_numbering() {
        assert_eq!(quest_index_to_number(0), 1);
        assert_eq!(quest_index_to_number(4), 5);
        assert_eq!(quest_number_to_index(5), Some(4));
        assert_eq!(quest_number_to_index(0), None);
    }

    #[test]
    fn test_round_deserialize_optional_fields() {
        let round: Round = serde_json::from_str(r#"{"team":[1,2],"king":1}"#).unwrap();

        assert!(round.approvals().is_empty());
        assert_eq!(round.fails(), 0);
    }

    #[test]
    fn test_serialization() {
        let round = Round::new(&ids(&[1, 2]), PlayerId::new(1));
        let json = serde_json::to_string(&round).unwrap();

        assert_eq!(json, r#"{"team":[1,2],"approvals":[],"fails":0,"king":1}"#);
    }
}
