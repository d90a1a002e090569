//! Configurable trip validation policy.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ItineraryError, Result},
    itinerary::days_between_inclusive,
};

/// Default upper bound on trip length.
pub const DEFAULT_MAX_TRIP_DAYS: u32 = 365;

/// Default upper bound on gallery size.
pub const DEFAULT_MAX_IMAGES: usize = 10;

/// Rules applied to trip input that vary between deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPolicy {
    /// Reject trips created without a cover image
    pub require_cover_image: bool,
    /// Longest allowed trip in days; `None` disables the check
    pub max_trip_days: Option<u32>,
    /// Largest gallery accepted at creation
    pub max_images: usize,
}

impl Default for TripPolicy {
    fn default() -> Self {
        Self {
            require_cover_image: false,
            max_trip_days: Some(DEFAULT_MAX_TRIP_DAYS),
            max_images: DEFAULT_MAX_IMAGES,
        }
    }
}

impl TripPolicy {
    /// Checks the length of a date range against `max_trip_days`.
    ///
    /// The ordering of the range itself is checked by the generator.
    pub fn check_range(&self, start: Date, end: Date) -> Result<()> {
        if let Some(max) = self.max_trip_days {
            let days = days_between_inclusive(start, end);
            if days > max {
                return Err(ItineraryError::invalid_input("end_date").with_reason(format!(
                    "Trip spans {days} days; the maximum is {max}"
                )));
            }
        }
        Ok(())
    }

    /// Checks the cover image requirement.
    pub fn check_cover_image(&self, cover_image: Option<&str>) -> Result<()> {
        if self.require_cover_image && cover_image.is_none_or(|url| url.trim().is_empty()) {
            return Err(ItineraryError::invalid_input("cover_image")
                .with_reason("A cover image is required"));
        }
        Ok(())
    }

    /// Checks the gallery size.
    pub fn check_images(&self, count: usize) -> Result<()> {
        if count > self.max_images {
            return Err(ItineraryError::invalid_input("images").with_reason(format!(
                "At most {} images are allowed, got {count}",
                self.max_images
            )));
        }
        Ok(())
    }
}
