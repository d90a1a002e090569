//! Core library for the Waypoint trip planner.
//!
//! A trip spans an inclusive range of calendar dates. When it is created, one
//! itinerary day is generated for every date in that range; activities are
//! then attached to days and kept in a user-controlled order. When a trip's
//! dates change, its days are reconciled with the new range instead of being
//! rebuilt from scratch.
//!
//! - [`itinerary`]: pure day generation and reconciliation planning
//! - [`params`] and [`policy`]: input validation
//! - [`db`]: SQLite persistence with one transaction per operation
//! - [`reconciler`]: the async API used by the CLI and the MCP server
//! - [`display`]: markdown output for models and results
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use waypoint_core::{params::{CreateTrip, ListTrips}, ReconcilerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = ReconcilerBuilder::new()
//!     .with_database_path(Some("trips.db"))
//!     .build()
//!     .await?;
//!
//! let trip = reconciler
//!     .create_trip(
//!         "alice",
//!         &CreateTrip {
//!             title: "Spring in Kyoto".to_string(),
//!             destination: "Kyoto, Japan".to_string(),
//!             start_date: "2025-04-01".to_string(),
//!             end_date: "2025-04-05".to_string(),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! println!("{trip}");
//!
//! let trips = reconciler
//!     .list_trips_summary(&ListTrips { owner_id: "alice".to_string() })
//!     .await?;
//! print!("{trips}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod itinerary;
pub mod models;
pub mod params;
pub mod policy;
pub mod reconciler;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    Activities, CreateResult, DeleteResult, LocalDateTime, OperationStatus, TripSummaries,
    UpdateResult,
};
pub use error::{ErrorKind, ItineraryError, Result};
pub use itinerary::{generate_days, DayPlan};
pub use models::{
    Activity, ActivityCategory, Destination, ItineraryDay, Trip, TripImage, TripStatus,
    TripSummary,
};
pub use params::{
    CreateActivity, CreateTrip, DeleteTrip, Id, ListTrips, MoveActivity, ReorderActivities,
    UpdateDay, UpdateTrip,
};
pub use policy::TripPolicy;
pub use reconciler::{Reconciler, ReconcilerBuilder};
