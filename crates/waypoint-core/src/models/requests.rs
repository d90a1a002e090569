//! Validated request types consumed by the store.
//!
//! These are produced from the raw parameters in [`crate::params`] once every
//! field constraint has been checked.

use jiff::civil::Date;

use super::{ActivityCategory, Destination};

/// A trip ready to be persisted together with its generated days.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub title: String,
    pub description: Option<String>,
    pub destination: Destination,
    pub start_date: Date,
    pub end_date: Date,
    pub budget: Option<f64>,
    pub cover_image: Option<String>,
    /// Gallery URLs; their index becomes the image order
    pub images: Vec<String>,
}

/// An activity ready to be appended to a day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewActivity {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub cost: f64,
    pub category: ActivityCategory,
}

/// Partial update of a trip.
///
/// An empty string in `description` or `cover_image` clears it; `None`
/// leaves a field as is. `budget` is `Some(None)` to remove the budget.
/// Changing `destination` drops the stored geocoding fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTripRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub budget: Option<Option<f64>>,
    pub cover_image: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl UpdateTripRequest {
    /// Returns true when the update touches the trip's date range.
    pub fn changes_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Returns true when nothing would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.destination.is_none()
            && self.budget.is_none()
            && self.cover_image.is_none()
            && !self.changes_dates()
    }

    /// Resolves the effective date range against the current one.
    pub fn resolve_dates(&self, start: Date, end: Date) -> (Date, Date) {
        (self.start_date.unwrap_or(start), self.end_date.unwrap_or(end))
    }
}

/// Partial update of an itinerary day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDayRequest {
    pub title: Option<String>,
    /// An empty string clears the notes
    pub notes: Option<String>,
}

impl UpdateDayRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.notes.is_none()
    }
}
