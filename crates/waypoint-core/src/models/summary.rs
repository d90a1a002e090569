//! Trip summary types.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Trip, TripStatus};

/// Compact view of a trip for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    pub id: u64,
    pub title: String,
    pub destination: String,
    pub start_date: Date,
    pub end_date: Date,
    pub budget: Option<f64>,
    pub cover_image: Option<String>,
    /// Number of itinerary days
    pub day_count: u32,
    /// Number of activities across all days
    pub activity_count: u32,
    /// Sum of all activity costs
    pub total_cost: f64,
}

impl TripSummary {
    /// Status of the summarized trip on `today`.
    pub fn status_on(&self, today: Date) -> TripStatus {
        TripStatus::for_range(self.start_date, self.end_date, today)
    }

    /// Budget left after planned activity costs, if a budget is set.
    pub fn remaining_budget(&self) -> Option<f64> {
        self.budget.map(|budget| budget - self.total_cost)
    }
}

impl From<&Trip> for TripSummary {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id,
            title: trip.title.clone(),
            destination: trip.destination.label.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            budget: trip.budget,
            cover_image: trip.cover_image.clone(),
            day_count: trip.days.len() as u32,
            activity_count: trip.activity_count() as u32,
            total_cost: trip.total_activity_cost(),
        }
    }
}
