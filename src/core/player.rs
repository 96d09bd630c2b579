//! Player identification and per-game player entries.
//!
//! ## PlayerId
//!
//! Type-safe identifier issued by the player registry. The registry lives in
//! the store; the engine only ever compares ids against a set the caller
//! supplies.
//!
//! ## Player
//!
//! A player's seat in one game: their id plus the role they held. Roles stay
//! empty until they are revealed at the end of the game.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Registry-issued player identifier.
///
/// Serialized as a bare integer so persisted documents read
/// `{"player_id": 3, ...}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl From<i64> for PlayerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of registered player ids, used for referential checks.
pub type PlayerIdSet = FxHashSet<PlayerId>;

/// Collect ids into a `PlayerIdSet`.
///
/// ```
/// use avalon_tracker::core::{player_id_set, PlayerId};
///
/// let ids = player_id_set([1_i64, 2, 3]);
/// assert!(ids.contains(&PlayerId::new(2)));
/// assert!(!ids.contains(&PlayerId::new(99)));
/// ```
pub fn player_id_set<I>(ids: I) -> PlayerIdSet
where
    I: IntoIterator,
    I::Item: Into<PlayerId>,
{
    ids.into_iter().map(Into::into).collect()
}

/// A player seated in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Registry id of the player.
    pub player_id: PlayerId,

    /// Role held in this game. Empty until revealed.
    pub role: String,
}

impl Player {
    /// Create a player with a known role.
    pub fn new(player_id: PlayerId, role: impl Into<String>) -> Self {
        Self {
            player_id,
            role: role.into(),
        }
    }

    /// Create a player whose role has not been revealed yet.
    #[must_use]
    pub fn unrevealed(player_id: PlayerId) -> Self {
        Self::new(player_id, String::new())
    }

    /// Has this player's role been revealed?
    #[must_use]
    pub fn role_revealed(&self) -> bool {
        !self.role.is_empty()
    }
}
