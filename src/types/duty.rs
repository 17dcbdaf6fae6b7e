//! Duty status and log segment types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Location;

/// The four HOS duty statuses, serialized as the literal ELD codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyStatus {
    #[serde(rename = "D")]
    Driving,
    #[serde(rename = "ON")]
    OnDuty,
    #[serde(rename = "OFF")]
    OffDuty,
    #[serde(rename = "SB")]
    Sleeper,
}

impl DutyStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Driving => "D",
            Self::OnDuty => "ON",
            Self::OffDuty => "OFF",
            Self::Sleeper => "SB",
        }
    }
}

/// A label for the driving activity currently open in the accumulator,
/// used to decide whether consecutive driving steps coalesce into one
/// log segment (§4.D).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveActivity {
    ToPickup,
    ToDropoff,
}

/// One row of the duty log: a contiguous block of time spent in a single
/// status, at a single (possibly interpolated) location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSegment {
    pub status: DutyStatus,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_hours: f64,
    pub location: Location,
    pub miles: f64,
    pub notes: String,
}

impl LogSegment {
    pub fn new(
        status: DutyStatus,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        location: Location,
        miles: f64,
        notes: impl Into<String>,
    ) -> Self {
        let duration_hours = (end_time - start_time).num_milliseconds() as f64 / 3_600_000.0;
        Self {
            status,
            start_time,
            end_time,
            duration_hours,
            location,
            miles,
            notes: notes.into(),
        }
    }
}

/// All segments for a single calendar date, in chronological order.
pub type DailyLog = Vec<LogSegment>;
