//! Itinerary day generation and reconciliation planning.
//!
//! Everything in this module is pure: it computes what the day list of a trip
//! should look like for a given date range, and what has to change in an
//! existing day list to get there. Persisting the result is the job of
//! [`crate::db`].
//!
//! The load-bearing property is determinism: the same `(start, end)` pair
//! always yields the same sequence, so a trip's skeleton can be regenerated
//! from scratch whenever its dates change.
//!
//! ```rust
//! use jiff::civil::date;
//! use waypoint_core::itinerary::generate_days;
//!
//! let days = generate_days(date(2024, 6, 1), date(2024, 6, 3))?;
//! assert_eq!(days.len(), 3);
//! assert_eq!(days[2].date, date(2024, 6, 3));
//! assert_eq!(days[2].title, "Day 3");
//! # Ok::<(), waypoint_core::ItineraryError>(())
//! ```

use std::collections::BTreeSet;

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, Result};

/// One generated itinerary day, before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based position of the day within the trip
    pub day_number: u32,
    /// Calendar date of the day
    pub date: Date,
    /// Default title, `"Day {n}"`
    pub title: String,
}

/// Default title for the given 1-based day number.
pub fn default_day_title(day_number: u32) -> String {
    format!("Day {day_number}")
}

/// Strips the time of day from a civil datetime.
pub fn normalize(datetime: DateTime) -> Date {
    datetime.date()
}

/// Number of calendar days in `[start, end]`, or zero when `end < start`.
pub fn days_between_inclusive(start: Date, end: Date) -> u32 {
    if end < start {
        return 0;
    }
    // Date::until defaults to days as the largest unit.
    start
        .until(end)
        .map(|span| span.get_days() as u32 + 1)
        .unwrap_or(0)
}

/// Rejects ranges whose end date precedes the start date.
pub fn validate_range(start: Date, end: Date) -> Result<()> {
    if end < start {
        return Err(ItineraryError::invalid_input("end_date")
            .with_reason(format!("End date {end} must not be before start date {start}")));
    }
    Ok(())
}

/// Generates the canonical day list for a trip running from `start` to `end`,
/// both inclusive.
///
/// # Errors
///
/// Returns `ItineraryError::InvalidInput` on field `end_date` when
/// `end < start`.
pub fn generate_days(start: Date, end: Date) -> Result<Vec<DayPlan>> {
    validate_range(start, end)?;

    let mut days = Vec::with_capacity(days_between_inclusive(start, end) as usize);
    let mut current = start;
    let mut day_number = 1;
    loop {
        days.push(DayPlan {
            day_number,
            date: current,
            title: default_day_title(day_number),
        });
        if current >= end {
            break;
        }
        current = current.tomorrow().map_err(|e| {
            ItineraryError::invalid_input("end_date").with_reason(e.to_string())
        })?;
        day_number += 1;
    }

    Ok(days)
}

/// Generates the day list for two civil datetimes, ignoring their times of
/// day.
pub fn generate_days_between(start: DateTime, end: DateTime) -> Result<Vec<DayPlan>> {
    generate_days(normalize(start), normalize(end))
}

/// Changes needed to bring an existing day list in line with a freshly
/// generated one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayReconciliation {
    /// Existing days that stay; only their date is rewritten
    pub keep: Vec<DayPlan>,
    /// Day numbers of existing days that fall outside the new range
    pub remove: Vec<u32>,
    /// Days that do not exist yet
    pub create: Vec<DayPlan>,
}

impl DayReconciliation {
    /// Returns true when the existing days already match the generated ones
    /// by number (dates may still move).
    pub fn is_structurally_unchanged(&self) -> bool {
        self.remove.is_empty() && self.create.is_empty()
    }
}

/// Works out which days to keep, remove and create.
///
/// Days are matched by day number: a day whose number is still within the
/// generated range keeps its identity (and therefore its activities) and
/// gets the generated date; a day whose number is past the end is removed;
/// any generated number without an existing day is created with its default
/// title.
pub fn plan_reconciliation(existing: &[u32], generated: &[DayPlan]) -> DayReconciliation {
    let existing: BTreeSet<u32> = existing.iter().copied().collect();
    let len = generated.len() as u32;

    let mut plan = DayReconciliation::default();
    for day in generated {
        if existing.contains(&day.day_number) {
            plan.keep.push(day.clone());
        } else {
            plan.create.push(day.clone());
        }
    }
    plan.remove = existing
        .into_iter()
        .filter(|number| *number == 0 || *number > len)
        .collect();

    plan
}
