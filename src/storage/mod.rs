//! Persistent game snapshot using SQLite (rusqlite)
//!
//! This module provides:
//! - OS-standard data directory location (via `directories` crate)
//! - SQLite database with schema versioning
//! - A single-row snapshot of the persisted game fields, stored as one
//!   JSON document so missing fields degrade to defaults on load
//!
//! Persistence is best-effort: the game never depends on a save or
//! load succeeding. Anything unreadable loads as a fresh game.

use directories::ProjectDirs;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Current schema version. Bump this when making schema changes.
/// Version history:
/// - v1: Initial schema with meta and snapshot tables
const SCHEMA_VERSION: u32 = 1;

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Database error from SQLite
    Database(rusqlite::Error),
    /// Could not determine data directory
    NoDataDirectory,
    /// Schema version mismatch (future version)
    FutureSchemaVersion { found: u32, supported: u32 },
    /// Failed to create data directory
    CreateDirFailed(std::io::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Database(e) => write!(f, "database error: {}", e),
            StorageError::NoDataDirectory => write!(f, "could not determine data directory"),
            StorageError::FutureSchemaVersion { found, supported } => {
                write!(
                    f,
                    "database schema version {} is newer than supported version {}",
                    found, supported
                )
            }
            StorageError::CreateDirFailed(e) => write!(f, "failed to create data directory: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e)
    }
}

/// An accepted word and the display name of the player who played it.
/// Appended, never removed; insertion order is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedWord {
    pub word: String,
    pub by: String,
}

/// The persisted subset of the game state.
///
/// Countdown state (remaining/running) is deliberately absent: every
/// process start begins a fresh turn. Each field falls back to its
/// default when missing from a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub current_player: usize,
    #[serde(default)]
    pub scores: [i64; 2],
    #[serde(default)]
    pub used_words: Vec<UsedWord>,
    #[serde(default)]
    pub last_letter: Option<char>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub consecutive_timeouts: u8,
}

/// The storage handle for the saved game.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the storage database.
    ///
    /// Uses OS-standard directories:
    /// - Linux: `$XDG_DATA_HOME/shiritori/` or `~/.local/share/shiritori/`
    /// - macOS: `~/Library/Application Support/shiritori/`
    pub fn open() -> Result<Self, StorageError> {
        let data_dir = Self::data_dir()?;

        // Ensure directory exists
        std::fs::create_dir_all(&data_dir).map_err(StorageError::CreateDirFailed)?;

        let db_path = data_dir.join("shiritori.db");
        let conn = Connection::open(&db_path)?;

        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Get the OS-standard data directory for the game.
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "shiritori")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS meta (
                schema_version INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS snapshot (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                data TEXT NOT NULL,
                saved_at INTEGER NOT NULL
            );",
        )?;

        let existing: Option<u32> = self
            .conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                _ => Err(e),
            })?;

        match existing {
            None => {
                self.conn.execute(
                    "INSERT INTO meta (schema_version) VALUES (?1)",
                    params![SCHEMA_VERSION],
                )?;
            }
            Some(found) if found > SCHEMA_VERSION => {
                return Err(StorageError::FutureSchemaVersion {
                    found,
                    supported: SCHEMA_VERSION,
                });
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Load the saved snapshot, if a readable one exists.
    ///
    /// A missing row or an unreadable document is not an error: the
    /// caller falls back to a fresh game either way.
    pub fn load(&self) -> Option<Snapshot> {
        let data: String = self
            .conn
            .query_row("SELECT data FROM snapshot WHERE id = 1", [], |row| {
                row.get(0)
            })
            .ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Save the snapshot, replacing any previous one.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let data = serde_json::to_string(snapshot).unwrap_or_default();
        let saved_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        self.conn.execute(
            "INSERT OR REPLACE INTO snapshot (id, data, saved_at) VALUES (1, ?1, ?2)",
            params![data, saved_at],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            current_player: 1,
            scores: [2, -1],
            used_words: vec![
                UsedWord {
                    word: "goat".into(),
                    by: "Player 1".into(),
                },
                UsedWord {
                    word: "tree".into(),
                    by: "Player 2".into(),
                },
            ],
            last_letter: Some('e'),
            game_over: false,
            consecutive_timeouts: 1,
        }
    }

    #[test]
    fn test_load_without_save_is_none() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let storage = Storage::open_in_memory().unwrap();
        let snapshot = sample_snapshot();
        storage.save(&snapshot).unwrap();
        assert_eq!(storage.load(), Some(snapshot));
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let storage = Storage::open_in_memory().unwrap();
        storage.save(&sample_snapshot()).unwrap();

        let newer = Snapshot {
            game_over: true,
            ..Snapshot::default()
        };
        storage.save(&newer).unwrap();
        assert_eq!(storage.load(), Some(newer));
    }

    #[test]
    fn test_corrupt_document_loads_as_none() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .conn
            .execute(
                "INSERT OR REPLACE INTO snapshot (id, data, saved_at) VALUES (1, 'not json', 0)",
                [],
            )
            .unwrap();
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .conn
            .execute(
                "INSERT OR REPLACE INTO snapshot (id, data, saved_at)
                 VALUES (1, '{\"scores\":[3,0],\"game_over\":true}', 0)",
                [],
            )
            .unwrap();

        let snapshot = storage.load().unwrap();
        assert_eq!(snapshot.scores, [3, 0]);
        assert!(snapshot.game_over);
        // Missing fields come back as defaults
        assert_eq!(snapshot.current_player, 0);
        assert!(snapshot.used_words.is_empty());
        assert_eq!(snapshot.last_letter, None);
        assert_eq!(snapshot.consecutive_timeouts, 0);
    }

    #[test]
    fn test_snapshot_default_matches_fresh_game_fields() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.current_player, 0);
        assert_eq!(snapshot.scores, [0, 0]);
        assert!(snapshot.used_words.is_empty());
        assert_eq!(snapshot.last_letter, None);
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.consecutive_timeouts, 0);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let storage = Storage::open_in_memory().unwrap();
        // Re-running initialization must not clobber anything
        storage.save(&sample_snapshot()).unwrap();
        storage.initialize_schema().unwrap();
        assert!(storage.load().is_some());
    }
}
