//! Itinerary day queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, OptionalExtension, Transaction};

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, ItineraryError, NotFoundExt, Result},
    models::{ItineraryDay, UpdateDayRequest},
};

const SELECT_DAYS_BY_TRIP_SQL: &str = "SELECT id, trip_id, day_number, date, title, notes, created_at, updated_at FROM itinerary_days WHERE trip_id = ?1 ORDER BY day_number";
const SELECT_DAY_BY_ID_SQL: &str = "SELECT id, trip_id, day_number, date, title, notes, created_at, updated_at FROM itinerary_days WHERE id = ?1";
const SELECT_DAY_TEXT_SQL: &str = "SELECT title, notes FROM itinerary_days WHERE id = ?1";
const UPDATE_DAY_SQL: &str =
    "UPDATE itinerary_days SET title = ?1, notes = ?2, updated_at = ?3 WHERE id = ?4";
const TOUCH_DAY_SQL: &str = "UPDATE itinerary_days SET updated_at = ?1 WHERE id = ?2";
const TOUCH_TRIP_BY_DAY_SQL: &str =
    "UPDATE trips SET updated_at = ?1 WHERE id = (SELECT trip_id FROM itinerary_days WHERE id = ?2)";

impl super::Database {
    /// Helper function to build an ItineraryDay from a database row. Its
    /// activities are loaded separately.
    fn build_day_from_row(row: &rusqlite::Row) -> rusqlite::Result<ItineraryDay> {
        Ok(ItineraryDay {
            id: row.get::<_, i64>(0)? as u64,
            trip_id: row.get::<_, i64>(1)? as u64,
            day_number: row.get(2)?,
            date: parse_column::<Date>(row, 3)?,
            title: row.get(4)?,
            notes: row.get(5)?,
            activities: Vec::new(),
            created_at: parse_column::<Timestamp>(row, 6)?,
            updated_at: parse_column::<Timestamp>(row, 7)?,
        })
    }

    /// Returns all days of a trip in day-number order, with activities.
    pub fn get_days(&self, trip_id: u64) -> Result<Vec<ItineraryDay>> {
        let mut stmt = self
            .connection
            .prepare_cached(SELECT_DAYS_BY_TRIP_SQL)
            .db_context("Failed to prepare query")?;

        let mut days = stmt
            .query_map(params![trip_id as i64], Self::build_day_from_row)
            .db_context("Failed to query itinerary days")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read itinerary days")?;

        for day in &mut days {
            day.activities = self.get_activities(day.id)?;
        }

        Ok(days)
    }

    /// Retrieves a single day with its activities.
    pub fn get_day(&self, id: u64) -> Result<Option<ItineraryDay>> {
        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let mut day = tx
            .query_row(SELECT_DAY_BY_ID_SQL, params![id as i64], Self::build_day_from_row)
            .optional()
            .db_context("Failed to query itinerary day")?;

        if let Some(ref mut day) = day {
            day.activities = self.get_activities(day.id)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(day)
    }

    /// Renames a day or edits its notes. An empty `notes` clears them.
    pub fn update_day(&mut self, id: u64, request: &UpdateDayRequest) -> Result<ItineraryDay> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (title, notes): (String, Option<String>) = tx
            .query_row(SELECT_DAY_TEXT_SQL, params![id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .or_not_found(ItineraryError::DayNotFound { id }, "Failed to load itinerary day")?;

        let title = request.title.clone().unwrap_or(title);
        let notes = match request.notes.as_deref() {
            None => notes,
            Some("") => None,
            Some(text) => Some(text.to_string()),
        };

        let now = Timestamp::now().to_string();
        tx.execute(UPDATE_DAY_SQL, params![title, notes, &now, id as i64])
            .map_err(|e| ItineraryError::database_error("Failed to update itinerary day", e))?;
        Self::touch_day(&tx, id, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_day(id)?.ok_or(ItineraryError::DayNotFound { id })
    }

    /// Bumps `updated_at` on a day and its trip.
    pub(super) fn touch_day(tx: &Transaction, day_id: u64, now: &str) -> Result<()> {
        tx.execute(TOUCH_DAY_SQL, params![now, day_id as i64])
            .map_err(|e| ItineraryError::database_error("Failed to update day timestamp", e))?;
        tx.execute(TOUCH_TRIP_BY_DAY_SQL, params![now, day_id as i64])
            .map_err(|e| ItineraryError::database_error("Failed to update trip timestamp", e))?;
        Ok(())
    }
}
