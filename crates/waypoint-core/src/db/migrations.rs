//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, ItineraryError, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes depend on this, and it is per connection.
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Brings databases created by older releases up to date.
    fn apply_migrations(&self) -> Result<()> {
        // Day notes were added after the first release.
        if !self.has_column("itinerary_days", "notes")? {
            log::info!("Migrating itinerary_days: adding notes column");
            self.connection
                .execute("ALTER TABLE itinerary_days ADD COLUMN notes TEXT", [])
                .map_err(|e| {
                    ItineraryError::database_error("Failed to add notes column to itinerary_days", e)
                })?;
        }

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .db_context("Failed to inspect table columns")
    }
}
