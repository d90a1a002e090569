//! Error handling utilities for MCP server

use rmcp::ErrorData;
use waypoint_core::{ErrorKind, ItineraryError};

/// Converts an itinerary error into an MCP error.
///
/// Bad input and stale references are reported as invalid parameters so the
/// caller can correct the request; storage failures are internal errors.
pub fn to_mcp_error(message: &str, error: &ItineraryError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error.kind() {
        ErrorKind::Validation | ErrorKind::NotFound => ErrorData::invalid_params(text, None),
        ErrorKind::Persistence => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_not_found_maps_to_invalid_params() {
        let error = to_mcp_error("Failed to get trip", &ItineraryError::TripNotFound { id: 4 });
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(error.message, "Failed to get trip: Trip with ID 4 not found");
    }

    #[test]
    fn test_validation_maps_to_invalid_params() {
        let error = to_mcp_error(
            "Failed to create trip",
            &ItineraryError::invalid_input("end_date").with_reason("before start"),
        );
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_configuration_maps_to_internal_error() {
        let error = to_mcp_error(
            "Failed to list trips",
            &ItineraryError::Configuration {
                message: "Task join error".to_string(),
            },
        );
        assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    }
}
