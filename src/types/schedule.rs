//! Response types produced by the Summary Builder

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DailyLog;

/// Per-day rollup: totals plus the underlying log segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub drive_hours: f64,
    pub on_duty_hours: f64,
    pub miles: f64,
    pub logs: DailyLog,
}

/// The full trip response: totals plus one `DailySummary` per calendar
/// date touched by the trip, in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EldSchedule {
    pub trip_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub total_miles: f64,
    pub total_drive_hours: f64,
    pub total_on_duty_hours: f64,
    pub total_days: u32,
    pub daily_summaries: Vec<DailySummary>,
}

/// Round half-away-from-zero to 2 decimal places, applied only at the
/// output boundary (§4.F) — internal accumulation stays full precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        // 1.005 and 1.015 are not exactly representable in f64 (they land
        // just below the nominal value), so standard round-half-away-from-zero
        // on the scaled value rounds down here — documents actual behavior.
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(1.015), 1.01);
        assert_eq!(round2(-1.015), -1.01);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(1.025), 1.02);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
    }
}
