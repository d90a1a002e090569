//! Trip operations for the Reconciler.

use super::Reconciler;
use crate::{
    error::{ErrorKind, ItineraryError, Result},
    models::{Trip, TripSummary, UpdateTripRequest},
    params::{CreateTrip, Id, ListTrips, UpdateTrip},
};

impl Reconciler {
    /// Creates a trip for `owner_id` and generates one itinerary day per date
    /// in its range.
    ///
    /// Either the trip and all of its days are stored, or nothing is.
    ///
    /// # Errors
    ///
    /// * `ItineraryError::InvalidInput` - a field violates its constraints,
    ///   the end date precedes the start date, or the policy rejects the trip
    /// * `ItineraryError::Database` - the write failed and was rolled back
    pub async fn create_trip(&self, owner_id: &str, params: &CreateTrip) -> Result<Trip> {
        let owner_id = owner_id.trim().to_string();
        if owner_id.is_empty() {
            return Err(ItineraryError::invalid_input("owner_id").with_reason("An owner is required"));
        }
        let new_trip = params.validate(&self.policy)?;

        let result = self
            .with_database(move |db| db.create_trip(&owner_id, &new_trip))
            .await;

        match &result {
            Ok(trip) => log::info!(
                "Created trip {} '{}' with {} days ({} to {})",
                trip.id,
                trip.title,
                trip.days.len(),
                trip.start_date,
                trip.end_date
            ),
            Err(e) if e.kind() == ErrorKind::Persistence => {
                log::warn!("Trip creation rolled back: {e}")
            }
            Err(_) => {}
        }

        result
    }

    /// Retrieves a trip with its gallery, days and activities.
    pub async fn get_trip(&self, params: &Id) -> Result<Trip> {
        let id = params.id;
        self.with_database(move |db| db.get_trip(id)?.ok_or(ItineraryError::TripNotFound { id }))
            .await
    }

    /// Lists the trips of one owner ordered by start date, earliest first.
    pub async fn list_trips(&self, params: &ListTrips) -> Result<Vec<TripSummary>> {
        let owner_id = params.owner_id.trim().to_string();
        self.with_database(move |db| db.list_trips(&owner_id)).await
    }

    /// Applies a partial update to a trip, reconciling its days when the
    /// date range changes.
    ///
    /// # Errors
    ///
    /// * `ItineraryError::TripNotFound` - no trip with the given ID
    /// * `ItineraryError::InvalidInput` - invalid fields or date range
    pub async fn update_trip(&self, params: &UpdateTrip) -> Result<Trip> {
        let id = params.id;
        let request = UpdateTripRequest::try_from(params)?;
        if request.is_empty() {
            return Err(ItineraryError::invalid_input("update")
                .with_reason("At least one field must be provided"));
        }
        let policy = self.policy.clone();
        let changes_dates = request.changes_dates();

        let result = self
            .with_database(move |db| db.update_trip(id, &request, &policy))
            .await;

        match &result {
            Ok(trip) if changes_dates => log::info!(
                "Updated trip {} to {} .. {}, itinerary now has {} days",
                trip.id,
                trip.start_date,
                trip.end_date,
                trip.days.len()
            ),
            Ok(trip) => log::info!("Updated trip {}", trip.id),
            Err(e) if e.kind() == ErrorKind::Persistence => {
                log::warn!("Update of trip {id} rolled back: {e}")
            }
            Err(_) => {}
        }

        result
    }

    /// Permanently deletes a trip with all of its days, activities and
    /// images, returning what was deleted.
    pub async fn delete_trip(&self, params: &Id) -> Result<Trip> {
        let id = params.id;
        let trip = self.with_database(move |db| db.delete_trip(id)).await?;
        log::info!(
            "Deleted trip {} with {} days and {} activities",
            trip.id,
            trip.days.len(),
            trip.activity_count()
        );
        Ok(trip)
    }
}
