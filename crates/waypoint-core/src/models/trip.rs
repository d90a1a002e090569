//! Trip model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{ItineraryDay, TripStatus};
use crate::itinerary::days_between_inclusive;

/// Destination of a trip: a display label plus geocoding fields that the
/// itinerary engine stores but never interprets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    /// Human-readable destination, e.g. "Kyoto, Japan"
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Structured address as returned by the geocoder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<serde_json::Value>,
}

impl Destination {
    /// Destination with only a label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }
}

/// Gallery image of a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripImage {
    pub id: u64,
    pub url: String,
    /// Position in the gallery (0-indexed)
    pub order: u32,
}

/// A planned journey with its full itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Identity of the user who owns the trip
    pub owner_id: String,

    /// Title of the trip
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Where the trip goes
    pub destination: Destination,

    /// First day of the trip
    pub start_date: Date,

    /// Last day of the trip (inclusive, never before `start_date`)
    pub end_date: Date,

    /// Optional overall budget, never negative
    pub budget: Option<f64>,

    /// Optional cover image URL
    pub cover_image: Option<String>,

    /// Gallery images in display order
    #[serde(default)]
    pub images: Vec<TripImage>,

    /// Itinerary days in day-number order
    #[serde(default)]
    pub days: Vec<ItineraryDay>,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the trip was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Trip {
    /// Length of the trip in days, both endpoints included.
    pub fn duration_days(&self) -> u32 {
        days_between_inclusive(self.start_date, self.end_date)
    }

    /// Status of the trip as seen on `today`.
    pub fn status_on(&self, today: Date) -> TripStatus {
        TripStatus::for_range(self.start_date, self.end_date, today)
    }

    /// Looks up a day by its 1-based number.
    pub fn day(&self, day_number: u32) -> Option<&ItineraryDay> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    /// Number of activities across all days.
    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }

    /// Sum of all activity costs across all days.
    pub fn total_activity_cost(&self) -> f64 {
        self.days.iter().map(ItineraryDay::total_cost).sum()
    }
}
