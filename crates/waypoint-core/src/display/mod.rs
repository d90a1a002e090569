//! Markdown formatting for models and operation results.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes get newtype wrappers so each interface prints the
//! same text.
//!
//! - [`collections`]: [`TripSummaries`], [`Activities`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: timestamp and calendar date formatting
//!
//! ```rust
//! use waypoint_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Moved activity 12 to position 1");
//! assert!(status.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Activities, TripSummaries};
pub use datetime::{DayDate, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
