//! Itinerary day model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::Activity;

/// One calendar day within a trip's date range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryDay {
    /// Unique identifier for the day
    pub id: u64,

    /// ID of the owning trip
    pub trip_id: u64,

    /// 1-based number of the day within the trip
    pub day_number: u32,

    /// Calendar date, always `trip.start_date + (day_number - 1)` days
    pub date: Date,

    /// Title of the day, `"Day {n}"` unless renamed
    pub title: String,

    /// Optional notes for the day
    pub notes: Option<String>,

    /// Activities ordered by position
    #[serde(default)]
    pub activities: Vec<Activity>,

    /// Timestamp when the day was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the day was last modified (UTC)
    pub updated_at: Timestamp,
}

impl ItineraryDay {
    /// Sum of the planned cost of every activity on this day.
    pub fn total_cost(&self) -> f64 {
        self.activities.iter().map(|a| a.cost).sum()
    }

    /// Activity ids in display order.
    pub fn activity_ids(&self) -> Vec<u64> {
        self.activities.iter().map(|a| a.id).collect()
    }
}
