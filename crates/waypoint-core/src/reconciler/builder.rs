//! Builder for creating and configuring Reconciler instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Reconciler;
use crate::{
    db::Database,
    error::{ItineraryError, Result},
    policy::TripPolicy,
};

/// Builder for creating and configuring Reconciler instances.
#[derive(Debug, Clone, Default)]
pub struct ReconcilerBuilder {
    database_path: Option<PathBuf>,
    policy: TripPolicy,
}

impl ReconcilerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint/waypoint.db` or
    /// `~/.local/share/waypoint/waypoint.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces the whole validation policy.
    pub fn with_policy(mut self, policy: TripPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Requires a cover image on every new trip.
    pub fn require_cover_image(mut self, required: bool) -> Self {
        self.policy.require_cover_image = required;
        self
    }

    /// Caps the trip length in days. `None` removes the cap.
    pub fn max_trip_days(mut self, days: Option<u32>) -> Self {
        self.policy.max_trip_days = days;
        self
    }

    /// Builds the configured reconciler, creating the database file and its
    /// schema if needed.
    ///
    /// # Errors
    ///
    /// Returns `ItineraryError::FileSystem` if the database directory cannot
    /// be created, `ItineraryError::XdgDirectory` if no default location can
    /// be determined, and `ItineraryError::Database` if schema initialization
    /// fails.
    pub async fn build(self) -> Result<Reconciler> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ItineraryError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), ItineraryError>(())
        })
        .await
        .map_err(|e| ItineraryError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::debug!("Using database at {}", db_path.display());

        Ok(Reconciler::new(db_path, self.policy))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file("waypoint.db")
            .map_err(|e| ItineraryError::XdgDirectory(e.to_string()))
    }
}
