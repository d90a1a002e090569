//! High-level API for managing trips, itinerary days and activities.
//!
//! [`Reconciler`] is the entry point every interface goes through. It
//! validates raw parameters against its [`TripPolicy`], runs the storage work
//! on a blocking thread, and logs every committed change.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (display-ready  │───▶│ (trip_ops,      │───▶│   (via db/)     │
//! │  wrappers)      │    │  day_ops, ...)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Reconciler`] instances
//! - [`trip_ops`]: Trip creation, lookup, listing, editing and deletion
//! - [`day_ops`]: Day lookup and editing
//! - [`activity_ops`]: Appending, removing and ordering activities
//! - [`handlers`]: The same operations returning display wrappers
//!
//! # Example
//!
//! ```rust,no_run
//! use waypoint_core::{
//!     params::{CreateActivity, CreateTrip},
//!     ReconcilerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = ReconcilerBuilder::new()
//!     .with_database_path(Some("/tmp/waypoint.db"))
//!     .build()
//!     .await?;
//!
//! let trip = reconciler
//!     .create_trip(
//!         "alice",
//!         &CreateTrip {
//!             title: "Lisbon long weekend".to_string(),
//!             destination: "Lisbon, Portugal".to_string(),
//!             start_date: "2025-05-02".to_string(),
//!             end_date: "2025-05-05".to_string(),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! assert_eq!(trip.days.len(), 4);
//!
//! reconciler
//!     .add_activity(&CreateActivity {
//!         day_id: trip.days[0].id,
//!         title: "Tram 28".to_string(),
//!         category: Some("transport".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{ItineraryError, Result},
    policy::TripPolicy,
};

pub mod activity_ops;
pub mod builder;
pub mod day_ops;
pub mod handlers;
pub mod trip_ops;


pub use builder::ReconcilerBuilder;

/// Main interface for managing trips and their itineraries.
#[derive(Debug, Clone)]
pub struct Reconciler {
    pub(crate) db_path: PathBuf,
    pub(crate) policy: TripPolicy,
}

impl Reconciler {
    /// Creates a reconciler over an initialized database file.
    pub(crate) fn new(db_path: PathBuf, policy: TripPolicy) -> Self {
        Self { db_path, policy }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Validation policy applied to trip input.
    pub fn policy(&self) -> &TripPolicy {
        &self.policy
    }

    /// Opens the database on a blocking thread and runs `op` against it.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| ItineraryError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
