//! Activity operations for the Reconciler.

use super::Reconciler;
use crate::{
    error::{ItineraryError, Result},
    models::Activity,
    params::{CreateActivity, Id, MoveActivity, ReorderActivities},
};

impl Reconciler {
    /// Appends an activity at the end of a day.
    ///
    /// # Errors
    ///
    /// * `ItineraryError::InvalidInput` - the activity fields are invalid
    /// * `ItineraryError::DayNotFound` - the day does not exist
    pub async fn add_activity(&self, params: &CreateActivity) -> Result<Activity> {
        let day_id = params.day_id;
        let activity = params.validate()?;

        let activity = self
            .with_database(move |db| db.add_activity(day_id, &activity))
            .await?;
        log::debug!(
            "Added activity {} to day {} at position {}",
            activity.id,
            activity.day_id,
            activity.position
        );
        Ok(activity)
    }

    /// Retrieves a single activity.
    pub async fn get_activity(&self, params: &Id) -> Result<Activity> {
        let id = params.id;
        self.with_database(move |db| {
            db.get_activity(id)?
                .ok_or(ItineraryError::ActivityNotFound { id })
        })
        .await
    }

    /// Deletes an activity and closes the gap in its day's ordering.
    pub async fn delete_activity(&self, params: &Id) -> Result<Activity> {
        let id = params.id;
        let activity = self.with_database(move |db| db.delete_activity(id)).await?;
        log::debug!("Deleted activity {} from day {}", activity.id, activity.day_id);
        Ok(activity)
    }

    /// Replaces the order of a day's activities with the given permutation.
    ///
    /// # Errors
    ///
    /// * `ItineraryError::DayNotFound` - the day does not exist
    /// * `ItineraryError::InvalidInput` - the IDs are not exactly the day's
    ///   activities; the stored order is left unchanged
    pub async fn reorder_activities(&self, params: &ReorderActivities) -> Result<Vec<Activity>> {
        params.validate()?;
        let day_id = params.day_id;
        let ordered_ids = params.activity_ids.clone();

        let activities = self
            .with_database(move |db| db.reorder_activities(day_id, &ordered_ids))
            .await?;
        log::debug!("Reordered {} activities of day {day_id}", activities.len());
        Ok(activities)
    }

    /// Moves one activity to a new position within its day.
    pub async fn move_activity(&self, params: &MoveActivity) -> Result<Vec<Activity>> {
        let id = params.id;
        let position = params.position;

        let activities = self
            .with_database(move |db| db.move_activity(id, position))
            .await?;
        log::debug!("Moved activity {id} to position {position}");
        Ok(activities)
    }
}
