#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use waypoint_core::{params::CreateTrip, Reconciler, ReconcilerBuilder};

/// Helper function to create a test reconciler backed by a temp database
pub async fn create_test_reconciler() -> (TempDir, Reconciler) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let reconciler = ReconcilerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create reconciler");
    (temp_dir, reconciler)
}

/// Path of the database used by a test reconciler
pub fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("test.db")
}

/// Trip parameters for the given inclusive date range
pub fn trip_params(title: &str, start: &str, end: &str) -> CreateTrip {
    CreateTrip {
        title: title.to_string(),
        destination: "Kyoto, Japan".to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        ..Default::default()
    }
}
