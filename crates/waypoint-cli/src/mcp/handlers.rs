//! MCP tool handlers implementation

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use waypoint_core::{display::OperationStatus, params as core, Reconciler};

use super::to_mcp_error;

// Core parameter types stay free of MCP concerns; this transparent wrapper
// adds deserialization and schema generation at the protocol boundary.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateTrip = McpParams<core::CreateTrip>;
pub type UpdateTrip = McpParams<core::UpdateTrip>;
pub type DeleteTrip = McpParams<core::DeleteTrip>;
pub type UpdateDay = McpParams<core::UpdateDay>;
pub type CreateActivity = McpParams<core::CreateActivity>;
pub type ReorderActivities = McpParams<core::ReorderActivities>;
pub type MoveActivity = McpParams<core::MoveActivity>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// Tool implementations acting on behalf of one trip owner.
pub struct McpHandlers<'a> {
    reconciler: &'a Reconciler,
    owner_id: &'a str,
}

impl<'a> McpHandlers<'a> {
    pub fn new(reconciler: &'a Reconciler, owner_id: &'a str) -> Self {
        Self {
            reconciler,
            owner_id,
        }
    }

    pub async fn create_trip(&self, Parameters(params): Parameters<CreateTrip>) -> McpResult {
        debug!("create_trip: {:?}", params);

        let result = self
            .reconciler
            .create_trip_result(self.owner_id, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create trip", &e))?;

        text_result(result.to_string())
    }

    pub async fn list_trips(&self) -> McpResult {
        debug!("list_trips: owner {}", self.owner_id);

        let params = core::ListTrips {
            owner_id: self.owner_id.to_string(),
        };
        let summaries = self
            .reconciler
            .list_trips_summary(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to list trips", &e))?;

        if summaries.is_empty() {
            return text_result(summaries.to_string());
        }
        text_result(format!("# Trips\n\n{summaries}"))
    }

    pub async fn show_trip(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_trip: {:?}", params);

        let trip = self
            .reconciler
            .get_trip(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get trip", &e))?;

        text_result(trip.to_string())
    }

    pub async fn update_trip(&self, Parameters(params): Parameters<UpdateTrip>) -> McpResult {
        debug!("update_trip: {:?}", params);

        let result = self
            .reconciler
            .update_trip_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update trip", &e))?;

        text_result(result.to_string())
    }

    pub async fn delete_trip(&self, Parameters(params): Parameters<DeleteTrip>) -> McpResult {
        debug!("delete_trip: {:?}", params);

        let result = self
            .reconciler
            .delete_trip_confirmed(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete trip", &e))?;

        let status = OperationStatus::success(format!(
            "{} This action cannot be undone.",
            result.to_string().trim_end()
        ));
        text_result(status.to_string())
    }

    pub async fn show_day(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_day: {:?}", params);

        let day = self
            .reconciler
            .get_day(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get day", &e))?;

        text_result(day.to_string())
    }

    pub async fn update_day(&self, Parameters(params): Parameters<UpdateDay>) -> McpResult {
        debug!("update_day: {:?}", params);

        let result = self
            .reconciler
            .update_day_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update day", &e))?;

        text_result(result.to_string())
    }

    pub async fn add_activity(
        &self,
        Parameters(params): Parameters<CreateActivity>,
    ) -> McpResult {
        debug!("add_activity: {:?}", params);

        let result = self
            .reconciler
            .add_activity_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add activity", &e))?;

        text_result(result.to_string())
    }

    pub async fn show_activity(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_activity: {:?}", params);

        let activity = self
            .reconciler
            .get_activity(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get activity", &e))?;

        text_result(activity.to_string())
    }

    pub async fn delete_activity(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_activity: {:?}", params);

        let result = self
            .reconciler
            .delete_activity_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete activity", &e))?;

        text_result(OperationStatus::success(result.to_string().trim_end()).to_string())
    }

    pub async fn reorder_activities(
        &self,
        Parameters(params): Parameters<ReorderActivities>,
    ) -> McpResult {
        debug!("reorder_activities: {:?}", params);

        let day_id = params.as_ref().day_id;
        let activities = self
            .reconciler
            .reorder_activities_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to reorder activities", &e))?;

        text_result(format!("# Activities for day {day_id}\n\n{activities}"))
    }

    pub async fn move_activity(&self, Parameters(params): Parameters<MoveActivity>) -> McpResult {
        debug!("move_activity: {:?}", params);

        let activities = self
            .reconciler
            .move_activity_result(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to move activity", &e))?;

        text_result(activities.to_string())
    }
}
