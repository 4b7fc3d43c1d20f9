//! `SQLite`-backed store.
//!
//! A single database file holds every table:
//!
//! ```text
//! <data-dir>/hostel.sqlite
//!   rooms         # one row per room, amenities as a JSON array
//!   guests
//!   bookings      # indexed by room_id
//!   maintenance
//! ```
//!
//! Dates are stored as ISO text, timestamps as RFC 3339 text, amounts as
//! integer cents, and enums by their canonical spelling. Listings follow
//! `rowid`, which is insertion order.

mod bookings;
mod guests;
mod maintenance;
mod rooms;

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use crate::model::Amount;

use super::{Result, StoreError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS rooms (
    id                      TEXT PRIMARY KEY,
    number                  TEXT NOT NULL UNIQUE,
    room_type               TEXT NOT NULL,
    bed_count               INTEGER NOT NULL,
    max_occupancy           INTEGER NOT NULL,
    current_occupants       INTEGER NOT NULL,
    status                  TEXT NOT NULL,
    amenities               TEXT NOT NULL,
    bathroom                TEXT NOT NULL,
    window_view             TEXT NOT NULL,
    base_rate_per_bed       INTEGER NOT NULL,
    private_room_rate       INTEGER NOT NULL,
    seasonal_adjustment_pct INTEGER NOT NULL,
    last_updated            TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS guests (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL,
    nationality TEXT NOT NULL,
    status      TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS bookings (
    id           TEXT PRIMARY KEY,
    guest_id     TEXT NOT NULL,
    room_id      TEXT NOT NULL,
    check_in     TEXT NOT NULL,
    check_out    TEXT NOT NULL,
    status       TEXT NOT NULL,
    source       TEXT NOT NULL,
    total_amount INTEGER NOT NULL,
    notes        TEXT NOT NULL,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS bookings_by_room ON bookings (room_id);

CREATE TABLE IF NOT EXISTS maintenance (
    id             TEXT PRIMARY KEY,
    room_id        TEXT NOT NULL,
    title          TEXT NOT NULL,
    description    TEXT NOT NULL,
    priority       TEXT NOT NULL,
    status         TEXT NOT NULL,
    category       TEXT NOT NULL,
    assigned_staff TEXT,
    reported_by    TEXT NOT NULL,
    reported_at    TEXT NOT NULL,
    scheduled_date TEXT,
    completed_date TEXT,
    estimated_cost INTEGER,
    actual_cost    INTEGER,
    notes          TEXT NOT NULL
);
";

/// Persistent store backed by a single `SQLite` file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// File name of the database inside the data directory.
    pub const FILE_NAME: &'static str = "hostel.sqlite";

    /// Opens (creating if needed) the database at `path` and its parent directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened database");
        Self::init(conn)
    }

    /// Opens the database inside `data_dir`.
    pub fn open_in(data_dir: &Path) -> Result<Self> {
        Self::open(Self::path_in(data_dir))
    }

    /// A throwaway database that lives as long as the store.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(Self::FILE_NAME)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn exists(&self, table: &str, id: Uuid) -> Result<bool> {
        let sql = format!("SELECT 1 FROM {table} WHERE id = ?1");
        let found = self
            .conn
            .query_row(&sql, [id.to_string()], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

/// Parses a stored text column, reporting the field on failure.
fn parse<T>(value: &str, field: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse()
        .map_err(|e| StoreError::Corrupt(format!("invalid {field} '{value}': {e}")))
}

fn parse_opt<T>(value: Option<&str>, field: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    value.map(|v| parse(v, field)).transpose()
}

fn amount_from_column(cents: i64, field: &str) -> Result<Amount> {
    u64::try_from(cents)
        .map(Amount::from_cents)
        .map_err(|_| StoreError::Corrupt(format!("negative {field}: {cents}")))
}

fn amount_to_column(amount: Amount) -> i64 {
    i64::try_from(amount.cents()).unwrap_or(i64::MAX)
}
