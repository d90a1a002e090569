//! Parameter structures for Waypoint operations
//!
//! These are the interface-agnostic inputs of every [`crate::Reconciler`]
//! operation. The CLI wraps them in clap argument structs and the MCP server
//! deserializes them directly (with JSON schemas generated when the `schema`
//! feature is enabled), so they carry no framework-specific attributes beyond
//! serde.
//!
//! Raw parameters hold strings exactly as the user typed them. Each type that
//! needs it has a `validate` method that applies field constraints (length
//! bounds, date parsing, URL shape, category names) and produces the typed
//! request consumed by the store. This is the input-validation collaborator:
//! by the time a request reaches [`crate::db`], only the invariants the
//! itinerary engine owns are left to check.
//!
//! ```rust
//! use waypoint_core::{params::CreateActivity, models::ActivityCategory};
//!
//! let params = CreateActivity {
//!     day_id: 3,
//!     title: "Fushimi Inari at dawn".to_string(),
//!     category: Some("activity".to_string()),
//!     ..Default::default()
//! };
//! let activity = params.validate()?;
//! assert_eq!(activity.category, ActivityCategory::Activity);
//! assert_eq!(activity.cost, 0.0);
//! # Ok::<(), waypoint_core::ItineraryError>(())
//! ```

use jiff::{
    civil::{Date, DateTime},
    tz::TimeZone,
    Timestamp,
};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ItineraryError, Result},
    models::{
        ActivityCategory, Destination, NewActivity, NewTrip, UpdateDayRequest, UpdateTripRequest,
    },
    policy::TripPolicy,
};

/// Maximum length of trip, day and activity titles.
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum length of descriptions and notes.
pub const MAX_DESCRIPTION_LEN: usize = 1000;
/// Maximum length of destination and location labels.
pub const MAX_LABEL_LEN: usize = 200;
/// Maximum length of free-text activity times.
pub const MAX_TIME_LEN: usize = 20;

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a trip together with its itinerary days.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateTrip {
    /// Title of the trip (required)
    pub title: String,
    /// Optional description of the trip
    pub description: Option<String>,
    /// Destination label, e.g. "Lisbon, Portugal" (required)
    pub destination: String,
    /// First day of the trip, `YYYY-MM-DD`
    pub start_date: String,
    /// Last day of the trip (inclusive), `YYYY-MM-DD`
    pub end_date: String,
    /// Optional overall budget
    pub budget: Option<f64>,
    /// Optional cover image URL
    pub cover_image: Option<String>,
    /// Gallery image URLs in display order
    #[serde(default)]
    pub images: Vec<String>,
    /// Geocoding details of the destination, stored as-is
    #[serde(default)]
    pub geocode: Option<Geocode>,
}

/// Geocoding fields attached to a destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Geocode {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub place_id: Option<String>,
    pub osm_id: Option<String>,
    pub osm_type: Option<String>,
    pub place_class: Option<String>,
    pub place_type: Option<String>,
    pub importance: Option<f64>,
    pub display_name: Option<String>,
    pub address: Option<serde_json::Value>,
}

/// Parameters for listing the trips of one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTrips {
    /// Owner whose trips to list
    pub owner_id: String,
}

/// Parameters for editing a trip. Omitted fields are left unchanged.
///
/// Changing either date regenerates the itinerary: days that still fit keep
/// their activities, days past the new end are removed, missing days are
/// added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTrip {
    /// Trip ID to update (required)
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub budget: Option<f64>,
    /// Remove the budget; cannot be combined with `budget`
    #[serde(default)]
    pub clear_budget: bool,
    pub cover_image: Option<String>,
    /// New first day, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// New last day, `YYYY-MM-DD`
    pub end_date: Option<String>,
}

/// Parameters for permanently deleting a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteTrip {
    /// Trip ID to delete
    pub id: u64,
    /// Must be true; guards against accidental deletion
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for renaming a day or editing its notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateDay {
    /// Itinerary day ID
    pub id: u64,
    pub title: Option<String>,
    pub notes: Option<String>,
}

/// Parameters for appending an activity to a day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateActivity {
    /// ID of the itinerary day to add the activity to
    pub day_id: u64,
    /// Title of the activity (required)
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Free-text start time, e.g. `09:30`
    pub start_time: Option<String>,
    /// Free-text end time
    pub end_time: Option<String>,
    /// Planned cost, defaults to 0
    pub cost: Option<f64>,
    /// One of activity, accommodation, food, transport, other (default activity)
    pub category: Option<String>,
}

/// Parameters for replacing the display order of a day's activities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ReorderActivities {
    /// Itinerary day whose activities are reordered
    pub day_id: u64,
    /// Every activity ID of the day, exactly once, in the new order
    pub activity_ids: Vec<u64>,
}

/// Parameters for moving one activity within its day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveActivity {
    /// Activity to move
    pub id: u64,
    /// Target position (0-indexed); clamped to the end of the day
    pub position: u32,
}

/// Parses a calendar date, accepting a full datetime and dropping its time.
///
/// Datetimes with an offset keep their local date; UTC instants such as
/// `2024-06-01T23:30:00.000Z` are taken at their UTC date.
pub fn parse_date(field: &str, value: &str) -> Result<Date> {
    let value = value.trim();
    if let Ok(date) = value.parse::<Date>() {
        return Ok(date);
    }
    if let Ok(datetime) = value.parse::<DateTime>() {
        return Ok(datetime.date());
    }
    value
        .parse::<Timestamp>()
        .map(|ts| ts.to_zoned(TimeZone::UTC).date())
        .map_err(|_| {
            ItineraryError::invalid_input(field)
                .with_reason(format!("'{value}' is not a valid date (expected YYYY-MM-DD)"))
        })
}

fn required_text(field: &str, value: &str, max: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ItineraryError::invalid_input(field).with_reason("This field is required"));
    }
    bounded_text(field, trimmed, max)
}

fn bounded_text(field: &str, value: &str, max: usize) -> Result<String> {
    if value.chars().count() > max {
        return Err(ItineraryError::invalid_input(field)
            .with_reason(format!("Must be at most {max} characters")));
    }
    Ok(value.to_string())
}

fn optional_text(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => bounded_text(field, text, max).map(Some),
    }
}

fn non_negative_amount(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ItineraryError::invalid_input(field)
            .with_reason("Must be a non-negative amount"));
    }
    Ok(value)
}

/// Checks that a string looks like an absolute http(s) URL.
pub fn validate_url(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    let host = rest.and_then(|r| r.split(['/', '?', '#']).next());
    match host {
        Some(host) if !host.is_empty() && !value.chars().any(char::is_whitespace) => {
            Ok(value.to_string())
        }
        _ => Err(ItineraryError::invalid_input(field)
            .with_reason(format!("'{value}' is not a valid http(s) URL"))),
    }
}

impl CreateTrip {
    /// Validates the raw trip fields against the policy.
    ///
    /// # Errors
    ///
    /// * `ItineraryError::InvalidInput` naming the first offending field
    pub fn validate(&self, policy: &TripPolicy) -> Result<NewTrip> {
        let title = required_text("title", &self.title, MAX_TITLE_LEN)?;
        let description = optional_text(
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )?;
        let label = required_text("destination", &self.destination, MAX_LABEL_LEN)?;
        let start_date = parse_date("start_date", &self.start_date)?;
        let end_date = parse_date("end_date", &self.end_date)?;
        crate::itinerary::validate_range(start_date, end_date)?;
        policy.check_range(start_date, end_date)?;

        let budget = self
            .budget
            .map(|b| non_negative_amount("budget", b))
            .transpose()?;

        let cover_image = match self.cover_image.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(url) => Some(validate_url("cover_image", url)?),
        };
        policy.check_cover_image(cover_image.as_deref())?;

        policy.check_images(self.images.len())?;
        let images = self
            .images
            .iter()
            .map(|url| validate_url("images", url))
            .collect::<Result<Vec<_>>>()?;

        let geocode = self.geocode.clone().unwrap_or_default();
        let destination = Destination {
            label,
            latitude: geocode.latitude,
            longitude: geocode.longitude,
            place_id: geocode.place_id,
            osm_id: geocode.osm_id,
            osm_type: geocode.osm_type,
            place_class: geocode.place_class,
            place_type: geocode.place_type,
            importance: geocode.importance,
            display_name: geocode.display_name,
            address: geocode.address,
        };

        Ok(NewTrip {
            title,
            description,
            destination,
            start_date,
            end_date,
            budget,
            cover_image,
            images,
        })
    }
}

impl CreateActivity {
    /// Validates the raw activity fields.
    ///
    /// # Errors
    ///
    /// * `ItineraryError::InvalidInput` - blank title, negative cost, unknown
    ///   category or over-long text
    pub fn validate(&self) -> Result<NewActivity> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => ActivityCategory::default(),
            Some(raw) => raw.parse::<ActivityCategory>().map_err(|reason| {
                ItineraryError::invalid_input("category").with_reason(reason)
            })?,
        };

        Ok(NewActivity {
            title: required_text("title", &self.title, MAX_TITLE_LEN)?,
            description: optional_text(
                "description",
                self.description.as_deref(),
                MAX_DESCRIPTION_LEN,
            )?,
            location: optional_text("location", self.location.as_deref(), MAX_LABEL_LEN)?,
            start_time: optional_text("start_time", self.start_time.as_deref(), MAX_TIME_LEN)?,
            end_time: optional_text("end_time", self.end_time.as_deref(), MAX_TIME_LEN)?,
            cost: non_negative_amount("cost", self.cost.unwrap_or(0.0))?,
            category,
        })
    }
}

impl TryFrom<&UpdateTrip> for UpdateTripRequest {
    type Error = ItineraryError;

    fn try_from(params: &UpdateTrip) -> Result<Self> {
        let title = params
            .title
            .as_deref()
            .map(|t| required_text("title", t, MAX_TITLE_LEN))
            .transpose()?;
        let destination = params
            .destination
            .as_deref()
            .map(|d| required_text("destination", d, MAX_LABEL_LEN))
            .transpose()?;
        let description = params
            .description
            .as_deref()
            .map(|d| bounded_text("description", d.trim(), MAX_DESCRIPTION_LEN))
            .transpose()?;
        // An empty cover image clears it.
        let cover_image = match params.cover_image.as_deref().map(str::trim) {
            None => None,
            Some("") => Some(String::new()),
            Some(url) => Some(validate_url("cover_image", url)?),
        };
        let budget = match (params.budget, params.clear_budget) {
            (Some(_), true) => {
                return Err(ItineraryError::invalid_input("budget")
                    .with_reason("Cannot both set and clear the budget"))
            }
            (Some(b), false) => Some(Some(non_negative_amount("budget", b)?)),
            (None, true) => Some(None),
            (None, false) => None,
        };
        let start_date = params
            .start_date
            .as_deref()
            .map(|d| parse_date("start_date", d))
            .transpose()?;
        let end_date = params
            .end_date
            .as_deref()
            .map(|d| parse_date("end_date", d))
            .transpose()?;

        Ok(UpdateTripRequest {
            title,
            description,
            destination,
            budget,
            cover_image,
            start_date,
            end_date,
        })
    }
}

impl TryFrom<&UpdateDay> for UpdateDayRequest {
    type Error = ItineraryError;

    fn try_from(params: &UpdateDay) -> Result<Self> {
        Ok(UpdateDayRequest {
            title: params
                .title
                .as_deref()
                .map(|t| required_text("title", t, MAX_TITLE_LEN))
                .transpose()?,
            notes: params
                .notes
                .as_deref()
                .map(|n| bounded_text("notes", n.trim(), MAX_DESCRIPTION_LEN))
                .transpose()?,
        })
    }
}

impl ReorderActivities {
    /// Rejects duplicate IDs before the store compares the set.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::with_capacity(self.activity_ids.len());
        for id in &self.activity_ids {
            if !seen.insert(*id) {
                return Err(ItineraryError::invalid_input("activity_ids")
                    .with_reason(format!("Activity {id} appears more than once")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn trip_params() -> CreateTrip {
        CreateTrip {
            title: "  Spring in Kyoto ".to_string(),
            description: Some("Temples and tea".to_string()),
            destination: "Kyoto, Japan".to_string(),
            start_date: "2025-04-01".to_string(),
            end_date: "2025-04-05".to_string(),
            budget: Some(2500.0),
            cover_image: None,
            images: vec!["https://img.example.com/1.jpg".to_string()],
            geocode: None,
        }
    }

    #[test]
    fn test_create_trip_validation_trims_and_parses() {
        let trip = trip_params().validate(&TripPolicy::default()).unwrap();
        assert_eq!(trip.title, "Spring in Kyoto");
        assert_eq!(trip.start_date, date(2025, 4, 1));
        assert_eq!(trip.end_date, date(2025, 4, 5));
        assert_eq!(trip.destination.label, "Kyoto, Japan");
        assert_eq!(trip.images.len(), 1);
    }

    #[test]
    fn test_create_trip_rejects_reversed_dates() {
        let mut params = trip_params();
        params.end_date = "2025-03-30".to_string();
        let err = params.validate(&TripPolicy::default()).unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidInput { ref field, .. } if field == "end_date"));
    }

    #[test]
    fn test_create_trip_rejects_bad_fields() {
        let policy = TripPolicy::default();

        let mut blank = trip_params();
        blank.title = "   ".to_string();
        assert!(blank.validate(&policy).is_err());

        let mut bad_date = trip_params();
        bad_date.start_date = "April 1st".to_string();
        assert!(bad_date.validate(&policy).is_err());

        let mut negative = trip_params();
        negative.budget = Some(-1.0);
        assert!(negative.validate(&policy).is_err());

        let mut bad_url = trip_params();
        bad_url.images = vec!["ftp://files.example.com/x.jpg".to_string()];
        assert!(bad_url.validate(&policy).is_err());
    }

    #[test]
    fn test_create_trip_cover_image_policy() {
        let strict = TripPolicy {
            require_cover_image: true,
            ..Default::default()
        };
        assert!(trip_params().validate(&strict).is_err());

        let mut with_cover = trip_params();
        with_cover.cover_image = Some("https://img.example.com/cover.jpg".to_string());
        assert!(with_cover.validate(&strict).is_ok());
    }

    #[test]
    fn test_parse_date_accepts_datetimes() {
        assert_eq!(
            parse_date("start_date", "2024-06-01T18:45:00").unwrap(),
            date(2024, 6, 1)
        );
        assert!(parse_date("start_date", "2024-13-01").is_err());
    }

    #[test]
    fn test_parse_date_accepts_utc_instants() {
        assert_eq!(
            parse_date("start_date", "2024-06-01T23:30:00Z").unwrap(),
            date(2024, 6, 1)
        );
        assert_eq!(
            parse_date("end_date", "2024-06-03T23:30:00.000Z").unwrap(),
            date(2024, 6, 3)
        );
        assert_eq!(
            parse_date("end_date", "2024-06-03T08:00:00+02:00").unwrap(),
            date(2024, 6, 3)
        );
    }

    #[test]
    fn test_activity_defaults() {
        let activity = CreateActivity {
            day_id: 1,
            title: "Lunch".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(activity.category, ActivityCategory::Activity);
        assert_eq!(activity.cost, 0.0);
        assert_eq!(activity.location, None);
    }

    #[test]
    fn test_activity_rejections() {
        let missing_title = CreateActivity {
            day_id: 1,
            title: String::new(),
            ..Default::default()
        };
        assert!(missing_title.validate().unwrap_err().is_validation());

        let negative_cost = CreateActivity {
            day_id: 1,
            title: "Taxi".to_string(),
            cost: Some(-5.0),
            ..Default::default()
        };
        assert!(negative_cost.validate().is_err());

        let unknown_category = CreateActivity {
            day_id: 1,
            title: "Spa".to_string(),
            category: Some("wellness".to_string()),
            ..Default::default()
        };
        let err = unknown_category.validate().unwrap_err();
        assert!(matches!(err, ItineraryError::InvalidInput { ref field, .. } if field == "category"));
    }

    #[test]
    fn test_reorder_rejects_duplicates() {
        let params = ReorderActivities {
            day_id: 1,
            activity_ids: vec![4, 5, 4],
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("images", "https://example.com/a.png").is_ok());
        assert!(validate_url("images", "http://example.com").is_ok());
        assert!(validate_url("images", "https://").is_err());
        assert!(validate_url("images", "example.com/a.png").is_err());
        assert!(validate_url("images", "https://exa mple.com").is_err());
    }
}
