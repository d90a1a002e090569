//! Data models for trips, itinerary days and activities.
//!
//! A [`Trip`] owns its [`ItineraryDay`]s and every day owns its
//! [`Activity`]s. Both relations are compositions: nothing is shared across
//! trips or days, and deleting a parent deletes its children. Models are
//! returned fully hydrated by the store (days in day-number order, activities
//! in position order).
//!
//! Display implementations live in [`crate::display::models`] so that the
//! structures here stay plain data.
//!
//! # Examples
//!
//! ```rust
//! use jiff::civil::date;
//! use waypoint_core::models::{ActivityCategory, TripStatus};
//!
//! assert_eq!("food".parse::<ActivityCategory>(), Ok(ActivityCategory::Food));
//! assert_eq!(ActivityCategory::default(), ActivityCategory::Activity);
//! assert_eq!(
//!     TripStatus::for_range(date(2024, 6, 1), date(2024, 6, 5), date(2024, 6, 3)),
//!     TripStatus::Ongoing
//! );
//! ```

pub mod activity;
pub mod day;
pub mod requests;
pub mod status;
pub mod summary;
pub mod trip;


pub use activity::Activity;
pub use day::ItineraryDay;
pub use requests::{NewActivity, NewTrip, UpdateDayRequest, UpdateTripRequest};
pub use status::{ActivityCategory, TripStatus};
pub use summary::TripSummary;
pub use trip::{Destination, Trip, TripImage};
