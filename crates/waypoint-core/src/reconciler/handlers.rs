//! Operations that return display wrappers, shared by the CLI and the MCP
//! server.

use super::Reconciler;
use crate::{
    display::{Activities, CreateResult, DeleteResult, TripSummaries, UpdateResult},
    error::{ItineraryError, Result},
    models::{Activity, ItineraryDay, Trip},
    params::{
        CreateActivity, CreateTrip, DeleteTrip, Id, ListTrips, MoveActivity, ReorderActivities,
        UpdateDay, UpdateTrip,
    },
};

impl Reconciler {
    /// Lists an owner's trips as a displayable collection.
    pub async fn list_trips_summary(&self, params: &ListTrips) -> Result<TripSummaries> {
        Ok(TripSummaries(self.list_trips(params).await?))
    }

    /// Creates a trip and wraps it for confirmation output.
    pub async fn create_trip_result(
        &self,
        owner_id: &str,
        params: &CreateTrip,
    ) -> Result<CreateResult<Trip>> {
        Ok(CreateResult::new(self.create_trip(owner_id, params).await?))
    }

    /// Updates a trip and describes what changed.
    pub async fn update_trip_result(&self, params: &UpdateTrip) -> Result<UpdateResult<Trip>> {
        let before = self.get_trip(&Id { id: params.id }).await?;
        let after = self.update_trip(params).await?;
        let changes = describe_trip_changes(&before, &after);
        Ok(UpdateResult::with_changes(after, changes))
    }

    /// Deletes a trip after checking the confirmation flag.
    ///
    /// # Errors
    ///
    /// * `ItineraryError::InvalidInput` on field `confirmed` when the flag is
    ///   not set; nothing is deleted
    pub async fn delete_trip_confirmed(&self, params: &DeleteTrip) -> Result<DeleteResult<Trip>> {
        if !params.confirmed {
            return Err(ItineraryError::invalid_input("confirmed").with_reason(
                "Trip deletion removes every day and activity. Set 'confirmed' to true to proceed.",
            ));
        }
        let trip = self.delete_trip(&Id { id: params.id }).await?;
        Ok(DeleteResult::new(trip))
    }

    /// Updates a day and describes what changed.
    pub async fn update_day_result(
        &self,
        params: &UpdateDay,
    ) -> Result<UpdateResult<ItineraryDay>> {
        let before = self.get_day(&Id { id: params.id }).await?;
        let after = self.update_day(params).await?;

        let mut changes = Vec::new();
        if before.title != after.title {
            changes.push(format!("Renamed to '{}'", after.title));
        }
        if before.notes != after.notes {
            changes.push(match after.notes {
                Some(_) => "Updated notes".to_string(),
                None => "Cleared notes".to_string(),
            });
        }
        Ok(UpdateResult::with_changes(after, changes))
    }

    /// Adds an activity and wraps it for confirmation output.
    pub async fn add_activity_result(
        &self,
        params: &CreateActivity,
    ) -> Result<CreateResult<Activity>> {
        Ok(CreateResult::new(self.add_activity(params).await?))
    }

    /// Deletes an activity and wraps it for confirmation output.
    pub async fn delete_activity_result(&self, params: &Id) -> Result<DeleteResult<Activity>> {
        Ok(DeleteResult::new(self.delete_activity(params).await?))
    }

    /// Reorders a day's activities and returns them in their new order.
    pub async fn reorder_activities_result(
        &self,
        params: &ReorderActivities,
    ) -> Result<Activities> {
        Ok(Activities(self.reorder_activities(params).await?))
    }

    /// Moves an activity and returns its day's activities in their new order.
    pub async fn move_activity_result(&self, params: &MoveActivity) -> Result<Activities> {
        Ok(Activities(self.move_activity(params).await?))
    }
}

/// Human-readable list of the differences between two versions of a trip.
pub(crate) fn describe_trip_changes(before: &Trip, after: &Trip) -> Vec<String> {
    let mut changes = Vec::new();

    if before.title != after.title {
        changes.push(format!("Renamed to '{}'", after.title));
    }
    if before.description != after.description {
        changes.push("Updated description".to_string());
    }
    if before.destination.label != after.destination.label {
        changes.push(format!("Destination set to {}", after.destination.label));
    }
    if before.budget != after.budget {
        changes.push(match after.budget {
            Some(budget) => format!("Budget set to {budget:.2}"),
            None => "Budget removed".to_string(),
        });
    }
    if before.cover_image != after.cover_image {
        changes.push(match after.cover_image {
            Some(_) => "Cover image updated".to_string(),
            None => "Cover image removed".to_string(),
        });
    }
    if before.start_date != after.start_date || before.end_date != after.end_date {
        changes.push(format!(
            "Dates moved to {} .. {}",
            after.start_date, after.end_date
        ));

        let removed = before
            .days
            .iter()
            .filter(|d| after.day(d.day_number).is_none())
            .count();
        let added = after
            .days
            .iter()
            .filter(|d| before.day(d.day_number).is_none())
            .count();
        if added > 0 {
            changes.push(format!("Added {added} days"));
        }
        if removed > 0 {
            let dropped_activities: usize = before
                .days
                .iter()
                .filter(|d| after.day(d.day_number).is_none())
                .map(|d| d.activities.len())
                .sum();
            changes.push(format!(
                "Removed {removed} days with {dropped_activities} activities"
            ));
        }
    }

    changes
}
