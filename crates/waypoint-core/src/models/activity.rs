//! Activity model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ActivityCategory;

/// A single planned item attached to one itinerary day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Unique identifier for the activity
    pub id: u64,

    /// ID of the owning itinerary day
    pub day_id: u64,

    /// Short title of the activity
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Optional location label
    pub location: Option<String>,

    /// Optional start time, free text (e.g. `09:30`)
    pub start_time: Option<String>,

    /// Optional end time, free text
    pub end_time: Option<String>,

    /// Planned cost, never negative
    #[serde(default)]
    pub cost: f64,

    /// Kind of activity
    #[serde(default)]
    pub category: ActivityCategory,

    /// Display position within the day (0-indexed)
    pub position: u32,

    /// Timestamp when the activity was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the activity was last modified (UTC)
    pub updated_at: Timestamp,
}
