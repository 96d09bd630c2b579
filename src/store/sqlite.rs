//! SQLite-backed store.
//!
//! One row per game holds the state as a JSON document. Players and notes
//! live in their own tables; notes reference their game and are deleted with
//! it.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::error::StoreError;
use super::records::{GameId, GameRecord, GameStatus, Note, NoteId, PlayerRecord};
use super::GameStore;
use crate::config::StoreConfig;
use crate::core::{GameState, PlayerId, PlayerIdSet};
use crate::engine::validate_game_state;

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening sqlite store");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open the database described by `config`, creating its directory.
    pub fn open_with_config(config: &StoreConfig) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&config.data_dir)?;
        Self::open(config.db_path())
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self { conn };
        store.configure()?;
        store.migrate()?;
        Ok(store)
    }

    fn configure(&self) -> Result<(), StoreError> {
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS games (
                game_id TEXT PRIMARY KEY,
                state_json TEXT NOT NULL,
                start_time TEXT NOT NULL,
                status TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS notes (
                note_id TEXT PRIMARY KEY,
                game_id TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                content TEXT NOT NULL,
                FOREIGN KEY (game_id) REFERENCES games(game_id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_notes_game_timestamp ON notes(game_id, timestamp);
            ",
        )?;
        Ok(())
    }
}

impl GameStore for SqliteStore {
    fn register_player(&mut self, name: &str) -> Result<PlayerId, StoreError> {
        self.conn
            .execute("INSERT INTO players (name) VALUES (?1)", params![name])?;
        let player_id = PlayerId::new(self.conn.last_insert_rowid());
        info!(%player_id, name, "registered player");
        Ok(player_id)
    }

    fn get_player(&self, player_id: PlayerId) -> Result<Option<PlayerRecord>, StoreError> {
        let record = self
            .conn
            .query_row(
                "SELECT player_id, name FROM players WHERE player_id = ?1",
                params![player_id.raw()],
                |row| {
                    Ok(PlayerRecord {
                        player_id: PlayerId::new(row.get(0)?),
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    fn list_players(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT player_id, name FROM players ORDER BY player_id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(PlayerRecord {
                player_id: PlayerId::new(row.get(0)?),
                name: row.get(1)?,
            })
        })?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    fn list_valid_player_ids(&self) -> Result<PlayerIdSet, StoreError> {
        registered_ids(&self.conn)
    }

    fn create_game(&mut self) -> Result<GameId, StoreError> {
        let record = GameRecord::new(GameId::generate(), Utc::now());
        let state_json = serde_json::to_string(&record.state)?;
        self.conn.execute(
            "INSERT INTO games (game_id, state_json, start_time, status)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.game_id.as_str(),
                state_json,
                timestamp_text(&record.start_time),
                record.active.as_str(),
            ],
        )?;
        info!(game_id = %record.game_id, "created game");
        Ok(record.game_id)
    }

    fn get_game(&self, game_id: &GameId) -> Result<GameRecord, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT game_id, state_json, start_time, status FROM games WHERE game_id = ?1",
                params![game_id.as_str()],
                read_game_row,
            )
            .optional()?;

        match row {
            Some(raw) => decode_game(raw),
            None => Err(StoreError::GameNotFound(game_id.clone())),
        }
    }

    fn list_games(&self) -> Result<Vec<GameRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT game_id, state_json, start_time, status FROM games ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([], read_game_row)?;

        let mut games = Vec::new();
        for row in rows {
            games.push(decode_game(row?)?);
        }
        Ok(games)
    }

    fn commit(&mut self, game_id: &GameId, state: &GameState) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        if !game_exists(&tx, game_id)? {
            return Err(StoreError::GameNotFound(game_id.clone()));
        }
        let valid = registered_ids(&tx)?;
        validate_game_state(state, &valid)?;

        let state_json = serde_json::to_string(state)?;
        tx.execute(
            "UPDATE games SET state_json = ?1 WHERE game_id = ?2",
            params![state_json, game_id.as_str()],
        )?;
        tx.commit()?;

        debug!(%game_id, "committed game state");
        Ok(())
    }

    fn set_status(&mut self, game_id: &GameId, status: GameStatus) -> Result<(), StoreError> {
        let updated = self.conn.execute(
            "UPDATE games SET status = ?1 WHERE game_id = ?2",
            params![status.as_str(), game_id.as_str()],
        )?;
        if updated == 0 {
            return Err(StoreError::GameNotFound(game_id.clone()));
        }
        info!(%game_id, %status, "game status changed");
        Ok(())
    }

    fn add_note(&mut self, game_id: &GameId, content: &str) -> Result<NoteId, StoreError> {
        if !game_exists(&self.conn, game_id)? {
            return Err(StoreError::GameNotFound(game_id.clone()));
        }

        let note_id = NoteId::generate();
        self.conn.execute(
            "INSERT INTO notes (note_id, game_id, timestamp, content) VALUES (?1, ?2, ?3, ?4)",
            params![
                note_id.as_str(),
                game_id.as_str(),
                timestamp_text(&Utc::now()),
                content,
            ],
        )?;
        Ok(note_id)
    }

    fn list_notes(&self, game_id: &GameId) -> Result<Vec<Note>, StoreError> {
        if !game_exists(&self.conn, game_id)? {
            return Err(StoreError::GameNotFound(game_id.clone()));
        }

        let mut stmt = self.conn.prepare(
            "SELECT note_id, game_id, timestamp, content
             FROM notes
             WHERE game_id = ?1
             ORDER BY timestamp DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![game_id.as_str()], read_note_row)?;

        let mut notes = Vec::new();
        for row in rows {
            notes.push(decode_note(row?)?);
        }
        Ok(notes)
    }

    fn get_note(&self, note_id: &NoteId) -> Result<Option<Note>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT note_id, game_id, timestamp, content FROM notes WHERE note_id = ?1",
                params![note_id.as_str()],
                read_note_row,
            )
            .optional()?;
        row.map(decode_note).transpose()
    }
}

// === Row helpers ===

type GameRow = (String, String, String, String);
type NoteRow = (String, String, String, String);

fn read_game_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GameRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn read_note_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode_game((game_id, state_json, start_time, status): GameRow) -> Result<GameRecord, StoreError> {
    let active = GameStatus::from_name(&status)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown status {status:?} for game {game_id}")))?;
    Ok(GameRecord {
        state: serde_json::from_str(&state_json)?,
        start_time: parse_timestamp(&start_time)?,
        active,
        game_id: GameId::from(game_id),
    })
}

fn decode_note((note_id, game_id, timestamp, content): NoteRow) -> Result<Note, StoreError> {
    Ok(Note {
        note_id: NoteId::from(note_id),
        game_id: GameId::from(game_id),
        timestamp: parse_timestamp(&timestamp)?,
        content,
    })
}

fn game_exists(conn: &Connection, game_id: &GameId) -> Result<bool, StoreError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM games WHERE game_id = ?1",
            params![game_id.as_str()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn registered_ids(conn: &Connection) -> Result<PlayerIdSet, StoreError> {
    let mut stmt = conn.prepare("SELECT player_id FROM players")?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

    let mut ids = PlayerIdSet::default();
    for row in rows {
        ids.insert(PlayerId::new(row?));
    }
    Ok(ids)
}

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn timestamp_text(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|err| StoreError::Corrupt(format!("bad timestamp {raw:?}: {err}")))
}
