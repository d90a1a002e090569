//! SQLite storage for trips, itinerary days and activities.
//!
//! Every multi-row write runs inside a single transaction so that a trip is
//! never visible with a partial day list and an activity reorder is never
//! half-applied. Read-then-write operations (append, delete, reorder,
//! regeneration) take an immediate transaction so that concurrent writers on
//! the same file serialize instead of computing positions from stale reads.
//! Reads that span several tables (a trip with its days) share a deferred
//! transaction and therefore a single snapshot.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod activity_queries;
pub mod day_queries;
pub mod migrations;
pub mod trip_queries;

/// How long a connection waits for a competing writer before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database, mostly useful in tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Parses a column stored as text into any `FromStr` type, reporting bad
/// data as a conversion failure on that column.
pub(crate) fn parse_column<T>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("Invalid value '{raw}': {e}").into(),
        )
    })
}
