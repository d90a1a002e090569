//! Trip CRUD operations, itinerary creation and date-change reconciliation.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, OptionalExtension, Transaction, TransactionBehavior};

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, ItineraryError, NotFoundExt, Result},
    itinerary::{generate_days, plan_reconciliation, validate_range, DayPlan},
    models::{Destination, NewTrip, Trip, TripImage, TripSummary, UpdateTripRequest},
    policy::TripPolicy,
};

const INSERT_TRIP_SQL: &str = "INSERT INTO trips (owner_id, title, description, destination, latitude, longitude, place_id, osm_id, osm_type, place_class, place_type, importance, display_name, address, start_date, end_date, budget, cover_image, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)";
const INSERT_IMAGE_SQL: &str =
    "INSERT INTO trip_images (trip_id, url, image_order) VALUES (?1, ?2, ?3)";
const INSERT_DAY_SQL: &str = "INSERT INTO itinerary_days (trip_id, day_number, date, title, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_TRIP_SQL: &str = "SELECT id, owner_id, title, description, destination, latitude, longitude, place_id, osm_id, osm_type, place_class, place_type, importance, display_name, address, start_date, end_date, budget, cover_image, created_at, updated_at FROM trips WHERE id = ?1";
const SELECT_IMAGES_SQL: &str =
    "SELECT id, url, image_order FROM trip_images WHERE trip_id = ?1 ORDER BY image_order, id";
const SELECT_TRIP_SUMMARIES_SQL: &str = "SELECT t.id, t.title, t.destination, t.start_date, t.end_date, t.budget, t.cover_image, \
     (SELECT COUNT(*) FROM itinerary_days d WHERE d.trip_id = t.id), \
     (SELECT COUNT(*) FROM activities a JOIN itinerary_days d ON a.day_id = d.id WHERE d.trip_id = t.id), \
     (SELECT COALESCE(SUM(a.cost), 0) FROM activities a JOIN itinerary_days d ON a.day_id = d.id WHERE d.trip_id = t.id) \
     FROM trips t WHERE t.owner_id = ?1 ORDER BY t.start_date ASC, t.id ASC";
const SELECT_TRIP_FIELDS_SQL: &str = "SELECT title, description, destination, budget, cover_image, start_date, end_date FROM trips WHERE id = ?1";
const SELECT_DAY_NUMBERS_SQL: &str =
    "SELECT day_number FROM itinerary_days WHERE trip_id = ?1 ORDER BY day_number";
const UPDATE_DAY_DATE_SQL: &str =
    "UPDATE itinerary_days SET date = ?1, updated_at = ?2 WHERE trip_id = ?3 AND day_number = ?4 AND date <> ?1";
const DELETE_DAY_ACTIVITIES_SQL: &str = "DELETE FROM activities WHERE day_id IN (SELECT id FROM itinerary_days WHERE trip_id = ?1 AND day_number = ?2)";
const DELETE_DAY_SQL: &str = "DELETE FROM itinerary_days WHERE trip_id = ?1 AND day_number = ?2";
const UPDATE_TRIP_SQL: &str = "UPDATE trips SET title = ?1, description = ?2, budget = ?3, cover_image = ?4, start_date = ?5, end_date = ?6, updated_at = ?7 WHERE id = ?8";
const UPDATE_DESTINATION_SQL: &str = "UPDATE trips SET destination = ?1, latitude = NULL, longitude = NULL, place_id = NULL, osm_id = NULL, osm_type = NULL, place_class = NULL, place_type = NULL, importance = NULL, display_name = NULL, address = NULL WHERE id = ?2";
const DELETE_TRIP_ACTIVITIES_SQL: &str =
    "DELETE FROM activities WHERE day_id IN (SELECT id FROM itinerary_days WHERE trip_id = ?1)";
const DELETE_TRIP_DAYS_SQL: &str = "DELETE FROM itinerary_days WHERE trip_id = ?1";
const DELETE_TRIP_IMAGES_SQL: &str = "DELETE FROM trip_images WHERE trip_id = ?1";
const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1";

/// Editable trip columns as currently stored.
struct StoredTripFields {
    title: String,
    description: Option<String>,
    destination: String,
    budget: Option<f64>,
    cover_image: Option<String>,
    start_date: Date,
    end_date: Date,
}

impl super::Database {
    /// Helper function to build a Trip from a database row. Images and days
    /// are loaded separately.
    fn build_trip_from_row(row: &rusqlite::Row) -> rusqlite::Result<Trip> {
        let address = row
            .get::<_, Option<String>>(14)?
            .map(|raw| serde_json::from_str::<serde_json::Value>(&raw))
            .transpose()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(14, Type::Text, Box::new(e)))?;

        Ok(Trip {
            id: row.get::<_, i64>(0)? as u64,
            owner_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            destination: Destination {
                label: row.get(4)?,
                latitude: row.get(5)?,
                longitude: row.get(6)?,
                place_id: row.get(7)?,
                osm_id: row.get(8)?,
                osm_type: row.get(9)?,
                place_class: row.get(10)?,
                place_type: row.get(11)?,
                importance: row.get(12)?,
                display_name: row.get(13)?,
                address,
            },
            start_date: parse_column::<Date>(row, 15)?,
            end_date: parse_column::<Date>(row, 16)?,
            budget: row.get(17)?,
            cover_image: row.get(18)?,
            images: Vec::new(),
            days: Vec::new(),
            created_at: parse_column::<Timestamp>(row, 19)?,
            updated_at: parse_column::<Timestamp>(row, 20)?,
        })
    }

    /// Inserts generated days for a trip.
    fn insert_days(tx: &Transaction, trip_id: u64, days: &[DayPlan], now: &str) -> Result<()> {
        let mut stmt = tx
            .prepare_cached(INSERT_DAY_SQL)
            .db_context("Failed to prepare day insert")?;
        for day in days {
            stmt.execute(params![
                trip_id as i64,
                day.day_number,
                day.date.to_string(),
                &day.title,
                now,
                now
            ])
            .map_err(|e| ItineraryError::database_error("Failed to insert itinerary day", e))?;
        }
        Ok(())
    }

    /// Creates a trip together with its gallery and one itinerary day per
    /// calendar date in its range.
    ///
    /// The trip row, the images and the days are written in one transaction:
    /// if any insert fails nothing is persisted.
    pub fn create_trip(&mut self, owner_id: &str, trip: &NewTrip) -> Result<Trip> {
        let days = generate_days(trip.start_date, trip.end_date)?;
        let address = trip
            .destination
            .address
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        let destination = &trip.destination;

        tx.execute(
            INSERT_TRIP_SQL,
            params![
                owner_id,
                &trip.title,
                trip.description.as_deref(),
                &destination.label,
                destination.latitude,
                destination.longitude,
                destination.place_id.as_deref(),
                destination.osm_id.as_deref(),
                destination.osm_type.as_deref(),
                destination.place_class.as_deref(),
                destination.place_type.as_deref(),
                destination.importance,
                destination.display_name.as_deref(),
                address.as_deref(),
                trip.start_date.to_string(),
                trip.end_date.to_string(),
                trip.budget,
                trip.cover_image.as_deref(),
                &now,
                &now
            ],
        )
        .map_err(|e| ItineraryError::database_error("Failed to insert trip", e))?;

        let id = tx.last_insert_rowid() as u64;

        for (order, url) in trip.images.iter().enumerate() {
            tx.execute(INSERT_IMAGE_SQL, params![id as i64, url, order as i64])
                .map_err(|e| ItineraryError::database_error("Failed to insert trip image", e))?;
        }

        Self::insert_days(&tx, id, &days, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_trip(id)?.ok_or(ItineraryError::TripNotFound { id })
    }

    /// Retrieves a trip with its images, days and activities.
    ///
    /// All reads share one deferred transaction, so a concurrent date
    /// change on the same file is seen either entirely or not at all.
    pub fn get_trip(&self, id: u64) -> Result<Option<Trip>> {
        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let mut trip = tx
            .query_row(SELECT_TRIP_SQL, params![id as i64], Self::build_trip_from_row)
            .optional()
            .db_context("Failed to query trip")?;

        if let Some(ref mut trip) = trip {
            trip.images = self.get_trip_images(trip.id)?;
            trip.days = self.get_days(trip.id)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(trip)
    }

    /// Returns the gallery of a trip in display order.
    pub fn get_trip_images(&self, trip_id: u64) -> Result<Vec<TripImage>> {
        let mut stmt = self
            .connection
            .prepare_cached(SELECT_IMAGES_SQL)
            .db_context("Failed to prepare query")?;

        let images = stmt
            .query_map(params![trip_id as i64], |row| {
                Ok(TripImage {
                    id: row.get::<_, i64>(0)? as u64,
                    url: row.get(1)?,
                    order: row.get::<_, i64>(2)? as u32,
                })
            })
            .db_context("Failed to query trip images")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read trip images")?;

        Ok(images)
    }

    /// Lists the trips of one owner, earliest start date first.
    pub fn list_trips(&self, owner_id: &str) -> Result<Vec<TripSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TRIP_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map(params![owner_id], |row| {
                Ok(TripSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    title: row.get(1)?,
                    destination: row.get(2)?,
                    start_date: parse_column::<Date>(row, 3)?,
                    end_date: parse_column::<Date>(row, 4)?,
                    budget: row.get(5)?,
                    cover_image: row.get(6)?,
                    day_count: row.get::<_, i64>(7)? as u32,
                    activity_count: row.get::<_, i64>(8)? as u32,
                    total_cost: row.get(9)?,
                })
            })
            .db_context("Failed to query trips")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read trips")?;

        Ok(summaries)
    }

    /// Applies a partial update to a trip.
    ///
    /// When the date range changes the itinerary is reconciled in the same
    /// transaction: days whose number still fits are kept (with their
    /// activities) and re-dated, days past the new end are deleted with their
    /// activities, and missing days are created with default titles.
    pub fn update_trip(
        &mut self,
        id: u64,
        request: &UpdateTripRequest,
        policy: &TripPolicy,
    ) -> Result<Trip> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(SELECT_TRIP_FIELDS_SQL, params![id as i64], |row| {
                Ok(StoredTripFields {
                    title: row.get(0)?,
                    description: row.get(1)?,
                    destination: row.get(2)?,
                    budget: row.get(3)?,
                    cover_image: row.get(4)?,
                    start_date: parse_column::<Date>(row, 5)?,
                    end_date: parse_column::<Date>(row, 6)?,
                })
            })
            .or_not_found(ItineraryError::TripNotFound { id }, "Failed to load trip")?;

        let (start_date, end_date) = request.resolve_dates(current.start_date, current.end_date);
        let cover_image = match request.cover_image.as_deref() {
            None => current.cover_image,
            Some("") => None,
            Some(url) => Some(url.to_string()),
        };
        policy.check_cover_image(cover_image.as_deref())?;

        let now = Timestamp::now().to_string();

        if start_date != current.start_date || end_date != current.end_date {
            // Validate before touching any row.
            validate_range(start_date, end_date)?;
            policy.check_range(start_date, end_date)?;
            let generated = generate_days(start_date, end_date)?;
            Self::reconcile_days(&tx, id, &generated, &now)?;
        }

        let description = match request.description.as_deref() {
            None => current.description,
            Some("") => None,
            Some(text) => Some(text.to_string()),
        };

        tx.execute(
            UPDATE_TRIP_SQL,
            params![
                request.title.as_deref().unwrap_or(&current.title),
                description,
                request.budget.unwrap_or(current.budget),
                cover_image,
                start_date.to_string(),
                end_date.to_string(),
                &now,
                id as i64
            ],
        )
        .map_err(|e| ItineraryError::database_error("Failed to update trip", e))?;

        if let Some(destination) = request
            .destination
            .as_deref()
            .filter(|label| *label != current.destination)
        {
            tx.execute(UPDATE_DESTINATION_SQL, params![destination, id as i64])
                .map_err(|e| ItineraryError::database_error("Failed to update destination", e))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_trip(id)?.ok_or(ItineraryError::TripNotFound { id })
    }

    /// Brings the stored days of a trip in line with a generated day list.
    fn reconcile_days(tx: &Transaction, trip_id: u64, generated: &[DayPlan], now: &str) -> Result<()> {
        let mut stmt = tx
            .prepare(SELECT_DAY_NUMBERS_SQL)
            .db_context("Failed to prepare query")?;
        let existing = stmt
            .query_map(params![trip_id as i64], |row| row.get::<_, u32>(0))
            .db_context("Failed to query day numbers")?
            .collect::<rusqlite::Result<Vec<u32>>>()
            .db_context("Failed to read day numbers")?;
        drop(stmt);

        let plan = plan_reconciliation(&existing, generated);
        log::debug!(
            "Reconciling trip {trip_id}: keep {}, remove {}, create {}",
            plan.keep.len(),
            plan.remove.len(),
            plan.create.len()
        );

        for day in &plan.keep {
            tx.execute(
                UPDATE_DAY_DATE_SQL,
                params![day.date.to_string(), now, trip_id as i64, day.day_number],
            )
            .map_err(|e| ItineraryError::database_error("Failed to re-date itinerary day", e))?;
        }

        for day_number in &plan.remove {
            tx.execute(DELETE_DAY_ACTIVITIES_SQL, params![trip_id as i64, day_number])
                .map_err(|e| {
                    ItineraryError::database_error("Failed to delete activities of removed day", e)
                })?;
            tx.execute(DELETE_DAY_SQL, params![trip_id as i64, day_number])
                .map_err(|e| ItineraryError::database_error("Failed to delete itinerary day", e))?;
        }

        Self::insert_days(tx, trip_id, &plan.create, now)
    }

    /// Deletes a trip with everything it owns and returns what was deleted.
    pub fn delete_trip(&mut self, id: u64) -> Result<Trip> {
        let trip = self
            .get_trip(id)?
            .ok_or(ItineraryError::TripNotFound { id })?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_TRIP_ACTIVITIES_SQL, params![id as i64])
            .map_err(|e| ItineraryError::database_error("Failed to delete activities", e))?;
        tx.execute(DELETE_TRIP_DAYS_SQL, params![id as i64])
            .map_err(|e| ItineraryError::database_error("Failed to delete itinerary days", e))?;
        tx.execute(DELETE_TRIP_IMAGES_SQL, params![id as i64])
            .map_err(|e| ItineraryError::database_error("Failed to delete trip images", e))?;
        let deleted = tx
            .execute(DELETE_TRIP_SQL, params![id as i64])
            .map_err(|e| ItineraryError::database_error("Failed to delete trip", e))?;

        if deleted == 0 {
            return Err(ItineraryError::TripNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(trip)
    }
}
