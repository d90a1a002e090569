//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{Activity, TripSummary};

/// Newtype wrapper for displaying a list of trip summaries.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use waypoint_core::{display::TripSummaries, models::TripSummary};
///
/// let summaries = TripSummaries(vec![TripSummary {
///     id: 1,
///     title: "Lisbon long weekend".to_string(),
///     destination: "Lisbon, Portugal".to_string(),
///     start_date: date(2025, 5, 2),
///     end_date: date(2025, 5, 5),
///     budget: Some(800.0),
///     cover_image: None,
///     day_count: 4,
///     activity_count: 6,
///     total_cost: 215.0,
/// }]);
/// let output = summaries.to_string();
/// assert!(output.contains("Lisbon long weekend"));
/// assert!(output.contains("6 activities over 4 days"));
/// assert!(TripSummaries(vec![]).to_string().contains("No trips found."));
/// ```
#[derive(Debug)]
pub struct TripSummaries(pub Vec<TripSummary>);

impl TripSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripSummary> {
        self.0.iter()
    }
}

impl Index<usize> for TripSummaries {
    type Output = TripSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for TripSummaries {
    type Item = TripSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for TripSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No trips found.");
        }
        for trip in &self.0 {
            write!(f, "{trip}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the ordered activities of one day.
#[derive(Debug)]
pub struct Activities(pub Vec<Activity>);

impl Activities {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.0.iter()
    }

    /// Activity ids in display order.
    pub fn ids(&self) -> Vec<u64> {
        self.0.iter().map(|a| a.id).collect()
    }
}

impl Index<usize> for Activities {
    type Output = Activity;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for Activities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No activities planned.");
        }
        for activity in &self.0 {
            write!(f, "{activity}")?;
        }
        Ok(())
    }
}
