//! Result wrapper types for displaying operation outcomes.
//!
//! Each wrapper prints a one-line confirmation followed by the affected
//! resource.

use std::fmt;

use crate::models::{Activity, ItineraryDay, Trip};

/// Wrapper type for displaying the result of create operations.
#[derive(Debug)]
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created trip with ID: {} ({} days)",
            self.resource.id,
            self.resource.days.len()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Activity> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Added activity with ID: {} to day {}",
            self.resource.id, self.resource.day_id
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// listing what changed.
///
/// ```rust
/// use jiff::{civil::date, Timestamp};
/// use waypoint_core::{display::UpdateResult, models::ItineraryDay};
///
/// let day = ItineraryDay {
///     id: 4,
///     trip_id: 1,
///     day_number: 2,
///     date: date(2025, 5, 3),
///     title: "Sintra".to_string(),
///     notes: None,
///     activities: vec![],
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
/// let output = UpdateResult::with_changes(day, vec!["Renamed to 'Sintra'".to_string()]).to_string();
/// assert!(output.contains("Updated day with ID: 4"));
/// assert!(output.contains("- Renamed to 'Sintra'"));
/// ```
#[derive(Debug)]
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn fmt_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for UpdateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated trip with ID: {}", self.resource.id)?;
        writeln!(f)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<ItineraryDay> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated day with ID: {}", self.resource.id)?;
        writeln!(f)?;
        self.fmt_changes(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
#[derive(Debug)]
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted trip '{}' (ID: {}) with {} days and {} activities",
            self.resource.title,
            self.resource.id,
            self.resource.days.len(),
            self.resource.activity_count()
        )
    }
}

impl fmt::Display for DeleteResult<Activity> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted activity '{}' (ID: {})",
            self.resource.title, self.resource.id
        )
    }
}
