//! Summary Builder — §4.F
//!
//! Folds completed per-day logs into totals and the overall trip summary.
//! Rounding to 2 decimal places (half-away-from-zero) happens here, at
//! the output boundary only — nowhere upstream of this module.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::types::{round2, DailyLog, DailySummary, DutyStatus, EldSchedule};

fn summarize_day(date: NaiveDate, logs: DailyLog) -> DailySummary {
    let drive_hours: f64 = logs
        .iter()
        .filter(|s| s.status == DutyStatus::Driving)
        .map(|s| s.duration_hours)
        .sum();
    let on_duty_hours: f64 = logs
        .iter()
        .filter(|s| matches!(s.status, DutyStatus::Driving | DutyStatus::OnDuty))
        .map(|s| s.duration_hours)
        .sum();
    let miles: f64 = logs.iter().map(|s| s.miles).sum();

    DailySummary {
        date,
        drive_hours: round2(drive_hours),
        on_duty_hours: round2(on_duty_hours),
        miles: round2(miles),
        logs,
    }
}

/// Fold the written per-day logs into the full trip response.
pub fn build_schedule(
    trip_id: Uuid,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    day_count: u32,
    days: BTreeMap<NaiveDate, DailyLog>,
) -> EldSchedule {
    let daily_summaries: Vec<DailySummary> = days
        .into_iter()
        .map(|(date, logs)| summarize_day(date, logs))
        .collect();

    // Totals sum the already-rounded per-day values, matching the
    // original implementation's fold-then-round-again behavior.
    let total_miles = round2(daily_summaries.iter().map(|d| d.miles).sum());
    let total_drive_hours = round2(daily_summaries.iter().map(|d| d.drive_hours).sum());
    let total_on_duty_hours = round2(daily_summaries.iter().map(|d| d.on_duty_hours).sum());

    EldSchedule {
        trip_id,
        start_time,
        end_time,
        total_miles,
        total_drive_hours,
        total_on_duty_hours,
        total_days: day_count,
        daily_summaries,
    }
}
