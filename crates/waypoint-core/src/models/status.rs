//! Enumerations for activity categories and trip status.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Kind of a planned activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    /// Sightseeing and general activities
    #[default]
    Activity,

    /// Hotels, rentals and other lodging
    Accommodation,

    /// Meals and drinks
    Food,

    /// Flights, trains, transfers
    Transport,

    /// Anything else
    Other,
}

impl ActivityCategory {
    /// All categories in their canonical order.
    pub const ALL: [ActivityCategory; 5] = [
        ActivityCategory::Activity,
        ActivityCategory::Accommodation,
        ActivityCategory::Food,
        ActivityCategory::Transport,
        ActivityCategory::Other,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Activity => "activity",
            ActivityCategory::Accommodation => "accommodation",
            ActivityCategory::Food => "food",
            ActivityCategory::Transport => "transport",
            ActivityCategory::Other => "other",
        }
    }

    /// Get the category with an icon for display.
    ///
    /// ```rust
    /// use waypoint_core::models::ActivityCategory;
    ///
    /// assert_eq!(ActivityCategory::Food.with_icon(), "🍽 Food");
    /// assert_eq!(ActivityCategory::Transport.with_icon(), "🚆 Transport");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ActivityCategory::Activity => "📍 Activity",
            ActivityCategory::Accommodation => "🛏 Accommodation",
            ActivityCategory::Food => "🍽 Food",
            ActivityCategory::Transport => "🚆 Transport",
            ActivityCategory::Other => "• Other",
        }
    }
}

impl FromStr for ActivityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "activity" => Ok(ActivityCategory::Activity),
            "accommodation" => Ok(ActivityCategory::Accommodation),
            "food" => Ok(ActivityCategory::Food),
            "transport" => Ok(ActivityCategory::Transport),
            "other" => Ok(ActivityCategory::Other),
            _ => Err(format!(
                "Invalid activity category: {s} (expected one of activity, accommodation, food, transport, other)"
            )),
        }
    }
}

/// Where a trip stands relative to a given day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    /// The trip has not started yet
    Planned,

    /// Today falls within the trip
    Ongoing,

    /// The trip is over
    Completed,
}

impl TripStatus {
    /// Derives the status of a trip running from `start` to `end` on `today`.
    pub fn for_range(start: Date, end: Date, today: Date) -> Self {
        if today < start {
            TripStatus::Planned
        } else if today > end {
            TripStatus::Completed
        } else {
            TripStatus::Ongoing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::Ongoing => "ongoing",
            TripStatus::Completed => "completed",
        }
    }
}
