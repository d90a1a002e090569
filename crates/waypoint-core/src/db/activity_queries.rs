//! Activity CRUD operations and ordering within a day.
//!
//! Positions within a day are always the contiguous range `0..n`: appends
//! take `MAX(position) + 1`, deletes close the gap, and reorders rewrite every
//! position from the submitted permutation.

use std::collections::HashSet;

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction, TransactionBehavior};

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, ItineraryError, NotFoundExt, Result},
    models::{Activity, ActivityCategory, NewActivity},
};

const SELECT_ACTIVITIES_BY_DAY_SQL: &str = "SELECT id, day_id, title, description, location, start_time, end_time, cost, category, position, created_at, updated_at FROM activities WHERE day_id = ?1 ORDER BY position, id";
const SELECT_ACTIVITY_BY_ID_SQL: &str = "SELECT id, day_id, title, description, location, start_time, end_time, cost, category, position, created_at, updated_at FROM activities WHERE id = ?1";
const CHECK_DAY_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM itinerary_days WHERE id = ?1)";
const GET_NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM activities WHERE day_id = ?1";
const INSERT_ACTIVITY_SQL: &str = "INSERT INTO activities (day_id, title, description, location, start_time, end_time, cost, category, position, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const SELECT_ACTIVITY_IDS_SQL: &str =
    "SELECT id FROM activities WHERE day_id = ?1 ORDER BY position, id";
const SELECT_ACTIVITY_DAY_SQL: &str = "SELECT day_id FROM activities WHERE id = ?1";
const DELETE_ACTIVITY_SQL: &str = "DELETE FROM activities WHERE id = ?1";
const UPDATE_POSITIONS_DECREMENT_SQL: &str =
    "UPDATE activities SET position = position - 1 WHERE day_id = ?1 AND position > ?2";
const UPDATE_POSITION_SQL: &str =
    "UPDATE activities SET position = ?1, updated_at = ?2 WHERE id = ?3 AND day_id = ?4";

impl super::Database {
    /// Helper function to build an Activity from a database row.
    fn build_activity_from_row(row: &rusqlite::Row) -> rusqlite::Result<Activity> {
        Ok(Activity {
            id: row.get::<_, i64>(0)? as u64,
            day_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            description: row.get(3)?,
            location: row.get(4)?,
            start_time: row.get(5)?,
            end_time: row.get(6)?,
            cost: row.get(7)?,
            category: parse_column::<ActivityCategory>(row, 8)?,
            position: row.get(9)?,
            created_at: parse_column::<Timestamp>(row, 10)?,
            updated_at: parse_column::<Timestamp>(row, 11)?,
        })
    }

    /// Returns the activities of a day ordered by position.
    pub fn get_activities(&self, day_id: u64) -> Result<Vec<Activity>> {
        let mut stmt = self
            .connection
            .prepare_cached(SELECT_ACTIVITIES_BY_DAY_SQL)
            .db_context("Failed to prepare query")?;

        let activities = stmt
            .query_map(params![day_id as i64], Self::build_activity_from_row)
            .db_context("Failed to query activities")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read activities")?;

        Ok(activities)
    }

    /// Retrieves a single activity.
    pub fn get_activity(&self, id: u64) -> Result<Option<Activity>> {
        self.connection
            .query_row(
                SELECT_ACTIVITY_BY_ID_SQL,
                params![id as i64],
                Self::build_activity_from_row,
            )
            .optional()
            .db_context("Failed to query activity")
    }

    fn ensure_day_exists(tx: &Transaction, day_id: u64) -> Result<()> {
        let exists: bool = tx
            .query_row(CHECK_DAY_EXISTS_SQL, params![day_id as i64], |row| row.get(0))
            .db_context("Failed to check itinerary day")?;
        if !exists {
            return Err(ItineraryError::DayNotFound { id: day_id });
        }
        Ok(())
    }

    fn activity_ids(tx: &Transaction, day_id: u64) -> Result<Vec<u64>> {
        let mut stmt = tx
            .prepare_cached(SELECT_ACTIVITY_IDS_SQL)
            .db_context("Failed to prepare query")?;
        let ids = stmt
            .query_map(params![day_id as i64], |row| {
                row.get::<_, i64>(0).map(|id| id as u64)
            })
            .db_context("Failed to query activity ids")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read activity ids")?;
        Ok(ids)
    }

    /// Writes `position = index` for every id of the given order.
    fn write_positions(tx: &Transaction, day_id: u64, ordered: &[u64], now: &str) -> Result<()> {
        let mut stmt = tx
            .prepare_cached(UPDATE_POSITION_SQL)
            .db_context("Failed to prepare position update")?;
        for (position, id) in ordered.iter().enumerate() {
            stmt.execute(params![position as i64, now, *id as i64, day_id as i64])
                .map_err(|e| ItineraryError::database_error("Failed to update position", e))?;
        }
        Ok(())
    }

    /// Appends an activity at the end of a day.
    pub fn add_activity(&mut self, day_id: u64, activity: &NewActivity) -> Result<Activity> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        Self::ensure_day_exists(&tx, day_id)?;

        let position: u32 = tx
            .query_row(GET_NEXT_POSITION_SQL, params![day_id as i64], |row| row.get(0))
            .db_context("Failed to get next position")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_ACTIVITY_SQL,
            params![
                day_id as i64,
                &activity.title,
                activity.description.as_deref(),
                activity.location.as_deref(),
                activity.start_time.as_deref(),
                activity.end_time.as_deref(),
                activity.cost,
                activity.category.as_str(),
                position,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| ItineraryError::database_error("Failed to insert activity", e))?;

        let id = tx.last_insert_rowid() as u64;
        Self::touch_day(&tx, day_id, &now_str)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Activity {
            id,
            day_id,
            title: activity.title.clone(),
            description: activity.description.clone(),
            location: activity.location.clone(),
            start_time: activity.start_time.clone(),
            end_time: activity.end_time.clone(),
            cost: activity.cost,
            category: activity.category,
            position,
            created_at: now,
            updated_at: now,
        })
    }

    /// Deletes an activity and closes the gap it leaves in its day.
    pub fn delete_activity(&mut self, id: u64) -> Result<Activity> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let activity = tx
            .query_row(
                SELECT_ACTIVITY_BY_ID_SQL,
                params![id as i64],
                Self::build_activity_from_row,
            )
            .or_not_found(ItineraryError::ActivityNotFound { id }, "Failed to load activity")?;

        tx.execute(DELETE_ACTIVITY_SQL, params![id as i64])
            .map_err(|e| ItineraryError::database_error("Failed to delete activity", e))?;
        tx.execute(
            UPDATE_POSITIONS_DECREMENT_SQL,
            params![activity.day_id as i64, activity.position],
        )
        .map_err(|e| ItineraryError::database_error("Failed to shift positions", e))?;

        let now = Timestamp::now().to_string();
        Self::touch_day(&tx, activity.day_id, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(activity)
    }

    /// Replaces the order of a day's activities.
    ///
    /// `ordered_ids` must contain every activity of the day exactly once;
    /// anything else is rejected and leaves the stored order untouched.
    pub fn reorder_activities(&mut self, day_id: u64, ordered_ids: &[u64]) -> Result<Vec<Activity>> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        Self::ensure_day_exists(&tx, day_id)?;
        let current = Self::activity_ids(&tx, day_id)?;
        check_permutation(&current, ordered_ids)?;

        let now = Timestamp::now().to_string();
        Self::write_positions(&tx, day_id, ordered_ids, &now)?;
        Self::touch_day(&tx, day_id, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_activities(day_id)
    }

    /// Moves one activity to `position` within its day, clamping to the end.
    /// Returns the day's activities in their new order.
    pub fn move_activity(&mut self, id: u64, position: u32) -> Result<Vec<Activity>> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let day_id = tx
            .query_row(SELECT_ACTIVITY_DAY_SQL, params![id as i64], |row| {
                row.get::<_, i64>(0).map(|day_id| day_id as u64)
            })
            .or_not_found(ItineraryError::ActivityNotFound { id }, "Failed to load activity")?;

        let mut ordered = Self::activity_ids(&tx, day_id)?;
        ordered.retain(|other| *other != id);
        let target = (position as usize).min(ordered.len());
        ordered.insert(target, id);

        let now = Timestamp::now().to_string();
        Self::write_positions(&tx, day_id, &ordered, &now)?;
        Self::touch_day(&tx, day_id, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_activities(day_id)
    }
}

/// Checks that `proposed` is a permutation of `current`.
fn check_permutation(current: &[u64], proposed: &[u64]) -> Result<()> {
    let invalid = |reason: String| ItineraryError::invalid_input("activity_ids").with_reason(reason);

    if current.len() != proposed.len() {
        return Err(invalid(format!(
            "Expected {} activity IDs, got {}",
            current.len(),
            proposed.len()
        )));
    }

    let known: HashSet<u64> = current.iter().copied().collect();
    let mut seen = HashSet::with_capacity(proposed.len());
    for id in proposed {
        if !known.contains(id) {
            return Err(invalid(format!("Activity {id} does not belong to this day")));
        }
        if !seen.insert(*id) {
            return Err(invalid(format!("Activity {id} appears more than once")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::check_permutation;

    #[test]
    fn test_permutation_accepts_any_order() {
        assert!(check_permutation(&[1, 2, 3], &[3, 1, 2]).is_ok());
        assert!(check_permutation(&[], &[]).is_ok());
    }

    #[test]
    fn test_permutation_rejections() {
        assert!(check_permutation(&[1, 2, 3], &[1, 2]).is_err());
        assert!(check_permutation(&[1, 2, 3], &[1, 2, 2]).is_err());
        assert!(check_permutation(&[1, 2, 3], &[1, 2, 4]).is_err());
        assert!(check_permutation(&[1, 2], &[1, 2, 3]).is_err());
    }
}
