//! Trip request types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Location;

/// Minimum and maximum accepted values for `accumulated_weekly_hours`.
pub const MIN_WEEKLY_HOURS: f64 = 0.0;
pub const MAX_WEEKLY_HOURS: f64 = 70.0;

/// A read-only trip request: three waypoints plus the driver's
/// already-accumulated weekly on-duty hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    pub id: Uuid,
    pub current: Location,
    pub pickup: Location,
    pub dropoff: Location,
    pub accumulated_weekly_hours: f64,
}

/// Rejected before simulation begins; never recovered locally (§7).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TripInputError {
    #[error("accumulated_weekly_hours must be within [{MIN_WEEKLY_HOURS}, {MAX_WEEKLY_HOURS}], got {0}")]
    WeeklyHoursOutOfRange(f64),
    #[error("{0} coordinates are missing or not finite")]
    MissingCoordinates(&'static str),
}

impl TripInput {
    /// Validate the request before handing it to the simulator.
    pub fn validate(&self) -> Result<(), TripInputError> {
        // §7: rejected when < 0 or >= 70, even though the data model
        // describes the nominal domain as the closed interval [0, 70].
        if self.accumulated_weekly_hours < MIN_WEEKLY_HOURS
            || self.accumulated_weekly_hours >= MAX_WEEKLY_HOURS
        {
            return Err(TripInputError::WeeklyHoursOutOfRange(
                self.accumulated_weekly_hours,
            ));
        }

        for (name, loc) in [
            ("current", &self.current),
            ("pickup", &self.pickup),
            ("dropoff", &self.dropoff),
        ] {
            if !loc.lat.is_finite() || !loc.lon.is_finite() {
                return Err(TripInputError::MissingCoordinates(name));
            }
        }

        Ok(())
    }
}
