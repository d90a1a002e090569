//! Command-line interface definitions and command execution
//!
//! Argument structs here carry the clap attributes; each one converts into the
//! matching core parameter type with a `From` impl, so validation and business
//! rules stay in `waypoint-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Reconciler → Display → Renderer
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use waypoint_core::{
    params::{
        CreateActivity, CreateTrip, DeleteTrip, Id, ListTrips, MoveActivity, ReorderActivities,
        UpdateDay, UpdateTrip,
    },
    Reconciler,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Trip arguments
// ============================================================================

/// Create a trip and generate one itinerary day per date
#[derive(Args)]
pub struct CreateTripArgs {
    /// Title of the trip
    pub title: String,
    /// Where the trip goes, e.g. "Kyoto, Japan"
    #[arg(long)]
    pub destination: String,
    /// First day of the trip (YYYY-MM-DD)
    #[arg(long = "start")]
    pub start_date: String,
    /// Last day of the trip, inclusive (YYYY-MM-DD)
    #[arg(long = "end")]
    pub end_date: String,
    /// Optional description of the trip
    #[arg(short, long)]
    pub description: Option<String>,
    /// Spending limit for the whole trip
    #[arg(long)]
    pub budget: Option<f64>,
    /// URL of the cover image
    #[arg(long)]
    pub cover_image: Option<String>,
    /// Additional image URL; may be repeated
    #[arg(long = "image")]
    pub images: Vec<String>,
}

impl From<CreateTripArgs> for CreateTrip {
    fn from(val: CreateTripArgs) -> Self {
        CreateTrip {
            title: val.title,
            description: val.description,
            destination: val.destination,
            start_date: val.start_date,
            end_date: val.end_date,
            budget: val.budget,
            cover_image: val.cover_image,
            images: val.images,
            geocode: None,
        }
    }
}

/// Identify a single resource by ID
#[derive(Args)]
pub struct IdArgs {
    /// Unique identifier of the resource
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change trip fields; new dates reconcile the itinerary days
#[derive(Args)]
pub struct UpdateTripArgs {
    /// ID of the trip to update
    pub id: u64,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description; pass an empty string to clear it
    #[arg(short, long)]
    pub description: Option<String>,
    /// New destination label; clears any stored coordinates
    #[arg(long)]
    pub destination: Option<String>,
    /// New budget
    #[arg(long, conflicts_with = "clear_budget")]
    pub budget: Option<f64>,
    /// Remove the budget
    #[arg(long)]
    pub clear_budget: bool,
    /// New cover image URL; pass an empty string to remove it
    #[arg(long)]
    pub cover_image: Option<String>,
    /// New first day (YYYY-MM-DD)
    #[arg(long = "start")]
    pub start_date: Option<String>,
    /// New last day, inclusive (YYYY-MM-DD)
    #[arg(long = "end")]
    pub end_date: Option<String>,
}

impl From<UpdateTripArgs> for UpdateTrip {
    fn from(val: UpdateTripArgs) -> Self {
        UpdateTrip {
            id: val.id,
            title: val.title,
            description: val.description,
            destination: val.destination,
            budget: val.budget,
            clear_budget: val.clear_budget,
            cover_image: val.cover_image,
            start_date: val.start_date,
            end_date: val.end_date,
        }
    }
}

/// Permanently delete a trip with all of its days and activities
#[derive(Args)]
pub struct DeleteTripArgs {
    /// ID of the trip to delete
    pub id: u64,
    /// Confirm the deletion
    #[arg(short, long)]
    pub yes: bool,
}

impl From<DeleteTripArgs> for DeleteTrip {
    fn from(val: DeleteTripArgs) -> Self {
        DeleteTrip {
            id: val.id,
            confirmed: val.yes,
        }
    }
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    #[command(alias = "new")]
    Create(CreateTripArgs),
    /// List your trips, soonest first
    #[command(alias = "ls")]
    List,
    /// Show a trip with its full itinerary
    Show(IdArgs),
    /// Update a trip
    Update(UpdateTripArgs),
    /// Delete a trip
    #[command(alias = "rm")]
    Delete(DeleteTripArgs),
}

// ============================================================================
// Day arguments
// ============================================================================

/// Rename a day or change its notes
#[derive(Args)]
pub struct UpdateDayArgs {
    /// ID of the day to update
    pub id: u64,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New notes; pass an empty string to clear them
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<UpdateDayArgs> for UpdateDay {
    fn from(val: UpdateDayArgs) -> Self {
        UpdateDay {
            id: val.id,
            title: val.title,
            notes: val.notes,
        }
    }
}

#[derive(Subcommand)]
pub enum DayCommands {
    /// Show a day with its activities
    Show(IdArgs),
    /// Update a day
    Update(UpdateDayArgs),
}

// ============================================================================
// Activity arguments
// ============================================================================

/// Append an activity to a day
#[derive(Args)]
pub struct AddActivityArgs {
    /// ID of the day the activity belongs to
    pub day_id: u64,
    /// Title of the activity
    pub title: String,
    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Where the activity takes place
    #[arg(long)]
    pub location: Option<String>,
    /// Start time (HH:MM)
    #[arg(long = "start")]
    pub start_time: Option<String>,
    /// End time (HH:MM)
    #[arg(long = "end")]
    pub end_time: Option<String>,
    /// Planned cost
    #[arg(long)]
    pub cost: Option<f64>,
    /// One of: activity, accommodation, food, transport, other (default: activity)
    #[arg(short, long)]
    pub category: Option<String>,
}

impl From<AddActivityArgs> for CreateActivity {
    fn from(val: AddActivityArgs) -> Self {
        CreateActivity {
            day_id: val.day_id,
            title: val.title,
            description: val.description,
            location: val.location,
            start_time: val.start_time,
            end_time: val.end_time,
            cost: val.cost,
            category: val.category,
        }
    }
}

/// Set the complete order of a day's activities
#[derive(Args)]
pub struct ReorderArgs {
    /// ID of the day
    pub day_id: u64,
    /// Every activity ID of the day in the desired order
    #[arg(required = true, value_delimiter = ',', num_args = 1..)]
    pub activity_ids: Vec<u64>,
}

impl From<ReorderArgs> for ReorderActivities {
    fn from(val: ReorderArgs) -> Self {
        ReorderActivities {
            day_id: val.day_id,
            activity_ids: val.activity_ids,
        }
    }
}

/// Move one activity to a new position within its day
#[derive(Args)]
pub struct MoveArgs {
    /// ID of the activity to move
    pub id: u64,
    /// Zero-based target position; clamped to the last slot
    pub position: u32,
}

impl From<MoveArgs> for MoveActivity {
    fn from(val: MoveArgs) -> Self {
        MoveActivity {
            id: val.id,
            position: val.position,
        }
    }
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Add an activity to the end of a day
    Add(AddActivityArgs),
    /// Show a single activity
    Show(IdArgs),
    /// Delete an activity
    #[command(alias = "rm")]
    Delete(IdArgs),
    /// Reorder all activities of a day
    Reorder(ReorderArgs),
    /// Move an activity to another position
    #[command(alias = "mv")]
    Move(MoveArgs),
}

// ============================================================================
// Command execution
// ============================================================================

/// Runs parsed commands against a reconciler and renders the results.
pub struct Cli {
    reconciler: Reconciler,
    renderer: TerminalRenderer,
    owner_id: String,
}

impl Cli {
    pub fn new(reconciler: Reconciler, renderer: TerminalRenderer, owner_id: String) -> Self {
        Self {
            reconciler,
            renderer,
            owner_id,
        }
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Create(args) => {
                let result = self
                    .reconciler
                    .create_trip_result(&self.owner_id, &args.into())
                    .await
                    .context("Failed to create trip")?;
                self.renderer.render(&result.to_string())
            }
            TripCommands::List => self.list_trips().await,
            TripCommands::Show(args) => {
                let trip = self
                    .reconciler
                    .get_trip(&args.into())
                    .await
                    .context("Failed to get trip")?;
                self.renderer.render(&trip.to_string())
            }
            TripCommands::Update(args) => {
                let result = self
                    .reconciler
                    .update_trip_result(&args.into())
                    .await
                    .context("Failed to update trip")?;
                self.renderer.render(&result.to_string())
            }
            TripCommands::Delete(args) => {
                let result = self
                    .reconciler
                    .delete_trip_confirmed(&args.into())
                    .await
                    .context("Failed to delete trip (re-run with --yes to confirm)")?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_day_command(&self, command: DayCommands) -> Result<()> {
        match command {
            DayCommands::Show(args) => {
                let day = self
                    .reconciler
                    .get_day(&args.into())
                    .await
                    .context("Failed to get day")?;
                self.renderer.render(&day.to_string())
            }
            DayCommands::Update(args) => {
                let result = self
                    .reconciler
                    .update_day_result(&args.into())
                    .await
                    .context("Failed to update day")?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_activity_command(&self, command: ActivityCommands) -> Result<()> {
        match command {
            ActivityCommands::Add(args) => {
                let result = self
                    .reconciler
                    .add_activity_result(&args.into())
                    .await
                    .context("Failed to add activity")?;
                self.renderer.render(&result.to_string())
            }
            ActivityCommands::Show(args) => {
                let activity = self
                    .reconciler
                    .get_activity(&args.into())
                    .await
                    .context("Failed to get activity")?;
                self.renderer.render(&activity.to_string())
            }
            ActivityCommands::Delete(args) => {
                let result = self
                    .reconciler
                    .delete_activity_result(&args.into())
                    .await
                    .context("Failed to delete activity")?;
                self.renderer.render(&result.to_string())
            }
            ActivityCommands::Reorder(args) => {
                let day_id = args.day_id;
                let activities = self
                    .reconciler
                    .reorder_activities_result(&args.into())
                    .await
                    .context("Failed to reorder activities")?;
                self.renderer
                    .render(&format!("# Activities for day {day_id}\n\n{activities}"))
            }
            ActivityCommands::Move(args) => {
                let activities = self
                    .reconciler
                    .move_activity_result(&args.into())
                    .await
                    .context("Failed to move activity")?;
                self.renderer.render(&activities.to_string())
            }
        }
    }

    /// Lists the current user's trips.
    pub async fn list_trips(&self) -> Result<()> {
        let params = ListTrips {
            owner_id: self.owner_id.clone(),
        };
        let summaries = self
            .reconciler
            .list_trips_summary(&params)
            .await
            .context("Failed to list trips")?;

        if summaries.is_empty() {
            return self.renderer.render(&summaries.to_string());
        }
        self.renderer
            .render(&format!("# Trips for {}\n\n{summaries}", self.owner_id))
    }
}
