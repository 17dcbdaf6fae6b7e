//! Log Writer — §4.C
//!
//! Appends duty-status segments to a per-day map, splitting any segment
//! that crosses midnight into two segments with pro-rated mileage.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::{DailyLog, LogSegment};

/// Append-only per-day log. Never mutates an entry once written.
#[derive(Debug, Default)]
pub struct LogWriter {
    days: BTreeMap<NaiveDate, DailyLog>,
}

impl LogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment, splitting it at midnight if it spans two dates.
    pub fn write(&mut self, segment: LogSegment) {
        let start_date = segment.start_time.date();
        let end_date = segment.end_time.date();

        if start_date == end_date {
            self.days.entry(start_date).or_default().push(segment);
            return;
        }

        let midnight = start_date
            .and_time(NaiveTime::from_hms_opt(23, 59, 59).expect("valid static time"));
        let next_day_start: NaiveDateTime = end_date.and_time(NaiveTime::MIN);

        let total_duration = segment.duration_hours;
        let first_duration_hours =
            (midnight - segment.start_time).num_milliseconds() as f64 / 3_600_000.0;
        let first_fraction = if total_duration > 0.0 {
            first_duration_hours / total_duration
        } else {
            0.0
        };

        let first_half = LogSegment::new(
            segment.status,
            segment.start_time,
            midnight,
            segment.location.clone(),
            segment.miles * first_fraction,
            segment.notes.clone(),
        );

        let second_half = LogSegment::new(
            segment.status,
            next_day_start,
            segment.end_time,
            segment.location,
            segment.miles * (1.0 - first_fraction),
            format!("{} (continued from previous day)", segment.notes),
        );

        self.days.entry(start_date).or_default().push(first_half);
        self.days.entry(end_date).or_default().push(second_half);
    }

    /// All day buckets in chronological order.
    pub fn into_days(self) -> BTreeMap<NaiveDate, DailyLog> {
        self.days
    }

    pub fn days(&self) -> &BTreeMap<NaiveDate, DailyLog> {
        &self.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DutyStatus, Location};
    use chrono::NaiveDate;

    fn dt(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn same_day_segment_is_written_whole() {
        let mut writer = LogWriter::new();
        writer.write(LogSegment::new(
            DutyStatus::Driving,
            dt(1, 7, 0, 0),
            dt(1, 8, 0, 0),
            Location::new(0.0, 0.0, "x"),
            50.0,
            "note",
        ));

        let days = writer.into_days();
        assert_eq!(days.len(), 1);
        let log = &days[&NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()];
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].miles, 50.0);
    }

    #[test]
    fn midnight_crossing_segment_splits_with_prorated_miles() {
        let mut writer = LogWriter::new();
        // 22:00 day 1 -> 02:00 day 2, 4 hours total, 100 miles.
        writer.write(LogSegment::new(
            DutyStatus::Driving,
            dt(1, 22, 0, 0),
            dt(2, 2, 0, 0),
            Location::new(0.0, 0.0, "x"),
            100.0,
            "overnight drive",
        ));

        let days = writer.into_days();
        assert_eq!(days.len(), 2);

        let day1 = &days[&NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()];
        let day2 = &days[&NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()];

        assert_eq!(day1.len(), 1);
        assert_eq!(day2.len(), 1);

        // First half: 22:00 -> 23:59:59 is ~1.9997h out of 4h.
        let first_fraction = day1[0].duration_hours / 4.0;
        assert!((day1[0].miles - 100.0 * first_fraction).abs() < 1e-6);
        assert!((day1[0].miles + day2[0].miles - 100.0).abs() < 1e-6);

        assert!(day2[0].notes.ends_with("(continued from previous day)"));
        assert_eq!(day1[0].end_time, dt(1, 23, 59, 59));
        assert_eq!(day2[0].start_time, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_time(NaiveTime::MIN));
    }

    #[test]
    fn non_driving_segment_splits_with_zero_miles() {
        let mut writer = LogWriter::new();
        writer.write(LogSegment::new(
            DutyStatus::OffDuty,
            dt(1, 20, 0, 0),
            dt(2, 6, 30, 0),
            Location::new(0.0, 0.0, "x"),
            0.0,
            "rest",
        ));

        let days = writer.into_days();
        for log in days.values() {
            for seg in log {
                assert_eq!(seg.miles, 0.0);
            }
        }
    }

    #[test]
    fn writer_never_mutates_prior_entries() {
        let mut writer = LogWriter::new();
        writer.write(LogSegment::new(
            DutyStatus::OnDuty,
            dt(1, 6, 30, 0),
            dt(1, 7, 0, 0),
            Location::new(0.0, 0.0, "x"),
            0.0,
            "first",
        ));
        writer.write(LogSegment::new(
            DutyStatus::Driving,
            dt(1, 7, 0, 0),
            dt(1, 8, 0, 0),
            Location::new(0.0, 0.0, "x"),
            40.0,
            "second",
        ));

        let days = writer.into_days();
        let log = &days[&NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()];
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].notes, "first");
        assert_eq!(log[1].notes, "second");
    }
}
