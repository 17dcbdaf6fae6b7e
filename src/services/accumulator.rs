//! Segment Accumulator — §4.D
//!
//! Coalesces consecutive like-kind driving activity into a single log
//! segment, flushing to the Log Writer on any status change.

use chrono::NaiveDateTime;

use crate::types::{DriveActivity, DutyStatus, LogSegment, Location};

use super::log_writer::LogWriter;

struct OpenSegment {
    start: NaiveDateTime,
    miles: f64,
    location: Location,
    activity: DriveActivity,
    note: String,
}

/// Holds at most one open `DRIVING` segment at a time.
pub struct SegmentAccumulator {
    open: Option<OpenSegment>,
}

impl SegmentAccumulator {
    pub fn new() -> Self {
        Self { open: None }
    }

    /// Extend the open driving segment if it matches `activity`, otherwise
    /// flush the current one and open a new segment at `start_location`.
    pub fn record_driving(
        &mut self,
        writer: &mut LogWriter,
        now: NaiveDateTime,
        start_location: &Location,
        miles: f64,
        activity: DriveActivity,
        note: &str,
    ) {
        let matches = matches!(
            &self.open,
            Some(open) if open.activity == activity
        );

        if matches {
            let open = self.open.as_mut().expect("checked above");
            open.miles += miles;
        } else {
            self.flush(writer, now);
            self.open = Some(OpenSegment {
                start: now,
                miles,
                location: start_location.clone(),
                activity,
                note: note.to_string(),
            });
        }
    }

    /// Emit the open segment (if any) ending at `now`, and clear the open slot.
    pub fn flush(&mut self, writer: &mut LogWriter, now: NaiveDateTime) {
        if let Some(open) = self.open.take() {
            writer.write(LogSegment::new(
                DutyStatus::Driving,
                open.start,
                now,
                open.location,
                open.miles,
                open.note,
            ));
        }
    }
}

impl Default for SegmentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
