use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ActivityCommands, DayCommands, TripCommands};

/// Plan trips day by day from the terminal
///
/// Waypoint turns a destination and a date range into a day-by-day itinerary.
/// Every date of the trip gets its own day, activities are ordered within a
/// day, and changing the trip dates reconciles the existing days instead of
/// starting over. The same operations are available to AI assistants through
/// the MCP server started with `serve`.
#[derive(Parser)]
#[command(version, about, name = "waypoint")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Owner recorded on new trips and used to filter listings
    #[arg(long, global = true, env = "WAYPOINT_USER", default_value = "default")]
    pub user: String,

    /// Reject trips that have no cover image
    #[arg(long, global = true)]
    pub require_cover_image: bool,

    /// Longest trip accepted, in days; 0 disables the limit
    #[arg(long, global = true, default_value_t = 365)]
    pub max_trip_days: u32,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Waypoint CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Inspect and annotate itinerary days
    #[command(alias = "d")]
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Manage activities within a day
    #[command(alias = "a")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },
    /// Start the MCP server on stdio
    Serve,
}

impl Args {
    /// Trip length cap handed to the reconciler
    pub fn trip_day_limit(&self) -> Option<u32> {
        (self.max_trip_days > 0).then_some(self.max_trip_days)
    }
}
