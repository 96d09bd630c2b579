//! Store-owned records: registered players, games and notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{GameState, PlayerId};

/// Opaque game identifier (a UUID string).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque note identifier (a UUID string).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NoteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a game record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    NotStarted,
    Active,
    Ended,
}

impl GameStatus {
    /// Stable name used in storage and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameStatus::NotStarted => "not_started",
            GameStatus::Active => "active",
            GameStatus::Ended => "ended",
        }
    }

    /// Parse a stored name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "not_started" => Some(GameStatus::NotStarted),
            "active" => Some(GameStatus::Active),
            "ended" => Some(GameStatus::Ended),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub name: String,
}

/// A stored game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: GameId,
    pub state: GameState,
    pub start_time: DateTime<Utc>,
    pub active: GameStatus,
}

impl GameRecord {
    /// A freshly created game: empty state, not started.
    #[must_use]
    pub fn new(game_id: GameId, start_time: DateTime<Utc>) -> Self {
        Self {
            game_id,
            state: GameState::new(),
            start_time,
            active: GameStatus::NotStarted,
        }
    }
}

/// A free-text note attached to a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub note_id: NoteId,
    pub game_id: GameId,
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(GameId::generate(), GameId::generate());
        assert_ne!(NoteId::generate(), NoteId::generate());
    }

    #[test]
    fn test_game_status_names() {
        for status in [GameStatus::NotStarted, GameStatus::Active, GameStatus::Ended] {
            assert_eq!(GameStatus::from_name(status.as_str()), Some(status));
        }
        assert_eq!(GameStatus::from_name("paused"), None);
        assert_eq!(
            serde_json::to_string(&GameStatus::NotStarted).unwrap(),
            r#""not_started""#
        );
    }

    #[test]
    fn test_new_game_record() {
        let record = GameRecord::new(GameId::from("g1"), Utc::now());

        assert_eq!(record.active, GameStatus::NotStarted);
        assert_eq!(record.state, GameState::new());
        assert_eq!(record.game_id.as_str(), "g1");
    }

    #[test]
    fn test_serialization() {
        let record = GameRecord::new(GameId::from("g1"), Utc::now());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["game_id"], "g1");
        assert_eq!(json["active"], "not_started");
        let deserialized: GameRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record, deserialized);
    }
}
