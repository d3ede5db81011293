//! Persistent player profile using SQLite (rusqlite).
//!
//! One local profile per install, stored in the OS-standard data
//! directory. The round engine never touches this; the app coordinator
//! loads it at startup and folds each session's result into it.

use crate::game::round::SessionResult;
use directories::ProjectDirs;
use rusqlite::{params, Connection};
use std::path::PathBuf;

/// Current schema version. Bump this when making schema changes.
/// Version history:
/// - v1: meta and profile tables
const SCHEMA_VERSION: u32 = 1;

/// XP awarded per finished session.
pub const XP_PER_SESSION: u32 = 100;

/// XP required per level.
pub const XP_PER_LEVEL: u32 = 500;

/// Errors that can occur during profile storage operations.
#[derive(Debug)]
pub enum ProfileError {
    /// Database error from SQLite
    Database(rusqlite::Error),
    /// Could not determine data directory
    NoDataDirectory,
    /// Failed to create data directory
    CreateDirFailed(std::io::Error),
    /// Schema version mismatch (future version)
    FutureSchemaVersion { found: u32, supported: u32 },
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::Database(e) => write!(f, "database error: {}", e),
            ProfileError::NoDataDirectory => write!(f, "could not determine data directory"),
            ProfileError::CreateDirFailed(e) => {
                write!(f, "failed to create data directory: {}", e)
            }
            ProfileError::FutureSchemaVersion { found, supported } => {
                write!(
                    f,
                    "profile schema version {} is newer than supported version {}",
                    found, supported
                )
            }
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<rusqlite::Error> for ProfileError {
    fn from(e: rusqlite::Error) -> Self {
        ProfileError::Database(e)
    }
}

/// Competitive league, derived from lifetime points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum League {
    Bronz,
    Gumus,
    Altin,
    Elmas,
}

impl League {
    /// Display label (Turkish, as shown in the lobby header).
    pub fn label(&self) -> &'static str {
        match self {
            League::Bronz => "Bronz",
            League::Gumus => "Gümüş",
            League::Altin => "Altın",
            League::Elmas => "Elmas",
        }
    }

    fn from_label(label: &str) -> League {
        match label {
            "Gümüş" => League::Gumus,
            "Altın" => League::Altin,
            "Elmas" => League::Elmas,
            _ => League::Bronz,
        }
    }

    /// Re-derive the league from lifetime points.
    pub fn from_total_points(total_points: u32) -> League {
        match total_points {
            0..=9_999 => League::Bronz,
            10_000..=49_999 => League::Gumus,
            50_000..=149_999 => League::Altin,
            _ => League::Elmas,
        }
    }
}

/// Cumulative player statistics, persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub display_name: String,
    pub level: u32,
    pub xp: u32,
    pub wins: u32,
    pub games_played: u32,
    pub total_points: u32,
    pub league: League,
}

impl ProfileRecord {
    /// A brand-new player.
    pub fn new(display_name: &str) -> Self {
        ProfileRecord {
            display_name: display_name.to_string(),
            level: 1,
            xp: 0,
            wins: 0,
            games_played: 0,
            total_points: 0,
            league: League::Bronz,
        }
    }

    /// Fold one session's outcome into the cumulative stats. A win is
    /// counted iff the declared winner is this player.
    pub fn apply_session_result(&mut self, result: &SessionResult) {
        self.xp += XP_PER_SESSION;
        self.total_points += result.final_score;
        if result.winner_name == self.display_name {
            self.wins += 1;
        }
        self.games_played += 1;
        self.level = self.xp / XP_PER_LEVEL + 1;
        self.league = League::from_total_points(self.total_points);
    }
}

/// Handle to the local profile database.
pub struct ProfileStore {
    conn: Connection,
}

impl ProfileStore {
    /// Open or create the profile database in the OS data directory.
    pub fn open() -> Result<Self, ProfileError> {
        let data_dir = Self::data_dir()?;
        std::fs::create_dir_all(&data_dir).map_err(ProfileError::CreateDirFailed)?;

        let conn = Connection::open(data_dir.join("profile.db"))?;
        let store = ProfileStore { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, ProfileError> {
        let conn = Connection::open_in_memory()?;
        let store = ProfileStore { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// OS-standard data directory for the game.
    pub fn data_dir() -> Result<PathBuf, ProfileError> {
        ProjectDirs::from("", "", "kelime-savasi")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ProfileError::NoDataDirectory)
    }

    /// Load the saved profile, if any.
    pub fn load(&self) -> Result<Option<ProfileRecord>, ProfileError> {
        let row = self.conn.query_row(
            "SELECT display_name, level, xp, wins, games_played, total_points, league
             FROM profile WHERE id = 1",
            [],
            |row| {
                Ok(ProfileRecord {
                    display_name: row.get(0)?,
                    level: row.get(1)?,
                    xp: row.get(2)?,
                    wins: row.get(3)?,
                    games_played: row.get(4)?,
                    total_points: row.get(5)?,
                    league: League::from_label(&row.get::<_, String>(6)?),
                })
            },
        );
        match row {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Save (or overwrite) the profile.
    pub fn save(&self, record: &ProfileRecord) -> Result<(), ProfileError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO profile
             (id, display_name, level, xp, wins, games_played, total_points, league)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.display_name,
                record.level,
                record.xp,
                record.wins,
                record.games_played,
                record.total_points,
                record.league.label(),
            ],
        )?;
        Ok(())
    }

    fn initialize_schema(&self) -> Result<(), ProfileError> {
        let current_version = self.schema_version()?;

        if current_version == 0 {
            self.create_schema_v1()?;
        } else if current_version > SCHEMA_VERSION {
            return Err(ProfileError::FutureSchemaVersion {
                found: current_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    fn schema_version(&self) -> Result<u32, ProfileError> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: u32 = self
            .conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        Ok(version)
    }

    fn create_schema_v1(&self) -> Result<(), ProfileError> {
        self.conn.execute_batch(
            r#"
            -- Meta table: schema version
            CREATE TABLE meta (
                schema_version INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );

            -- Single-row profile table
            CREATE TABLE profile (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                display_name TEXT NOT NULL,
                level INTEGER NOT NULL,
                xp INTEGER NOT NULL,
                wins INTEGER NOT NULL,
                games_played INTEGER NOT NULL,
                total_points INTEGER NOT NULL,
                league TEXT NOT NULL
            );
            "#,
        )?;

        let created_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        self.conn.execute(
            "INSERT INTO meta (schema_version, created_at) VALUES (?1, ?2)",
            params![SCHEMA_VERSION, created_at],
        )?;

        Ok(())
    }
}
