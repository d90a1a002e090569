//! Itinerary day operations for the Reconciler.

use super::Reconciler;
use crate::{
    error::{ItineraryError, Result},
    models::{ItineraryDay, UpdateDayRequest},
    params::{Id, UpdateDay},
};

impl Reconciler {
    /// Retrieves a day with its activities.
    pub async fn get_day(&self, params: &Id) -> Result<ItineraryDay> {
        let id = params.id;
        self.with_database(move |db| db.get_day(id)?.ok_or(ItineraryError::DayNotFound { id }))
            .await
    }

    /// Renames a day or edits its notes. Dates and day numbers are derived
    /// from the trip and cannot be edited here.
    pub async fn update_day(&self, params: &UpdateDay) -> Result<ItineraryDay> {
        let id = params.id;
        let request = UpdateDayRequest::try_from(params)?;
        if request.is_empty() {
            return Err(ItineraryError::invalid_input("update")
                .with_reason("Provide a title or notes"));
        }

        let day = self
            .with_database(move |db| db.update_day(id, &request))
            .await?;
        log::debug!("Updated day {} of trip {}", day.id, day.trip_id);
        Ok(day)
    }
}
