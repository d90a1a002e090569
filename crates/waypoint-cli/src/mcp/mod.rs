//! MCP server implementation for Waypoint
//!
//! Exposes trip, day and activity operations as Model Context Protocol tools
//! over stdio. The server acts for a single owner, given by `--user`.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};
use waypoint_core::Reconciler;

pub mod errors;
pub mod handlers;

pub use errors::to_mcp_error;
pub use handlers::{
    CreateActivity, CreateTrip, DeleteTrip, Id, McpHandlers, McpResult, MoveActivity,
    ReorderActivities, UpdateDay, UpdateTrip,
};

const INSTRUCTIONS: &str = r#"Waypoint builds day-by-day travel itineraries.

## Core Concepts
- **Trips**: a destination and an inclusive date range, with optional budget, description and images
- **Days**: generated automatically, one per date of the trip, numbered from 1
- **Activities**: ordered entries within a day with optional times, location, cost and category (activity, accommodation, food, transport, other)

## Workflow
1. Create a trip with `create_trip`; dates are YYYY-MM-DD and the end date is included
2. Use `show_trip` to see the generated days and their IDs
3. Add activities to a day with `add_activity`
4. Arrange them with `move_activity` or `reorder_activities` (pass every activity ID of the day)

## Changing Dates
`update_trip` with new dates keeps days that still fall inside the range (matched by day number) and re-dates them. Days beyond the new length are deleted together with their activities; missing days are added empty. Review the "Changes made" summary after every update.

## Tool Categories
- **Trips**: create_trip, list_trips, show_trip, update_trip, delete_trip
- **Days**: show_day, update_day
- **Activities**: add_activity, show_activity, delete_activity, reorder_activities, move_activity"#;

#[derive(Clone)]
pub struct WaypointMcpServer {
    reconciler: Arc<Reconciler>,
    owner_id: Arc<str>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WaypointMcpServer {
    pub fn new(reconciler: Reconciler, owner_id: String) -> Self {
        Self {
            reconciler: Arc::new(reconciler),
            owner_id: owner_id.into(),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers<'_> {
        McpHandlers::new(&self.reconciler, &self.owner_id)
    }

    #[tool(
        name = "create_trip",
        description = "Create a trip and generate one itinerary day for every date from start_date to end_date inclusive. Requires title, destination, start_date and end_date (YYYY-MM-DD). Optional: description, budget, cover_image (http/https URL), images (list of URLs) and geocode details for the destination. Returns the trip with its day IDs."
    )]
    async fn create_trip(&self, params: Parameters<CreateTrip>) -> McpResult {
        self.handlers().create_trip(params).await
    }

    #[tool(
        name = "list_trips",
        description = "List your trips ordered by start date, with status (planned/ongoing/completed), day and activity counts, planned cost and remaining budget."
    )]
    async fn list_trips(&self) -> McpResult {
        self.handlers().list_trips().await
    }

    #[tool(
        name = "show_trip",
        description = "Show a trip with its full itinerary: every day in order with its activities, times, locations and costs."
    )]
    async fn show_trip(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_trip(params).await
    }

    #[tool(
        name = "update_trip",
        description = "Update trip fields by ID. Only provided fields change; an empty description or cover_image clears it, and clear_budget=true removes the budget. Changing start_date or end_date reconciles the itinerary: surviving days keep their activities, days past the new end are deleted with their activities, new days are added empty. Changing the destination clears stored coordinates."
    )]
    async fn update_trip(&self, params: Parameters<UpdateTrip>) -> McpResult {
        self.handlers().update_trip(params).await
    }

    #[tool(
        name = "delete_trip",
        description = "Permanently delete a trip with all its days, activities and images. Requires confirmed=true; this cannot be undone."
    )]
    async fn delete_trip(&self, params: Parameters<DeleteTrip>) -> McpResult {
        self.handlers().delete_trip(params).await
    }

    #[tool(
        name = "show_day",
        description = "Show one itinerary day by ID with its notes and ordered activities."
    )]
    async fn show_day(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_day(params).await
    }

    #[tool(
        name = "update_day",
        description = "Rename an itinerary day or change its notes. An empty notes string clears them. The day's date and number are derived from the trip and cannot be edited."
    )]
    async fn update_day(&self, params: Parameters<UpdateDay>) -> McpResult {
        self.handlers().update_day(params).await
    }

    #[tool(
        name = "add_activity",
        description = "Append an activity to the end of a day. Requires day_id and title. Optional: description, location, start_time and end_time (HH:MM), cost (not negative) and category (activity, accommodation, food, transport, other; defaults to activity)."
    )]
    async fn add_activity(&self, params: Parameters<CreateActivity>) -> McpResult {
        self.handlers().add_activity(params).await
    }

    #[tool(name = "show_activity", description = "Show a single activity by ID.")]
    async fn show_activity(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_activity(params).await
    }

    #[tool(
        name = "delete_activity",
        description = "Delete an activity by ID. The remaining activities of its day close the gap."
    )]
    async fn delete_activity(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_activity(params).await
    }

    #[tool(
        name = "reorder_activities",
        description = "Set the order of a day's activities. activity_ids must list every activity of the day exactly once, in the desired order; anything else is rejected and the order stays unchanged."
    )]
    async fn reorder_activities(&self, params: Parameters<ReorderActivities>) -> McpResult {
        self.handlers().reorder_activities(params).await
    }

    #[tool(
        name = "move_activity",
        description = "Move one activity to a zero-based position within its day, shifting the others. Positions past the end move it to the last slot."
    )]
    async fn move_activity(&self, params: Parameters<MoveActivity>) -> McpResult {
        self.handlers().move_activity(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WaypointMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Serves MCP over stdio until the client disconnects or a termination
/// signal arrives.
pub async fn run_stdio_server(server: WaypointMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!(
        "Starting MCP server on stdio with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("Failed to start MCP server: {e}");
    })?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        result = service.waiting() => match result {
            Ok(reason) => debug!("MCP client disconnected: {reason:?}"),
            Err(e) => error!("MCP server task failed: {e:?}"),
        },
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down MCP server"),
        _ = sigint.recv() => info!("Received SIGINT, shutting down MCP server"),
    }

    info!("MCP server shutdown complete");
    Ok(())
}
