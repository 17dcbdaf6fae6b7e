//! HOS State Machine — §4.E
//!
//! The core simulator: walks each drive phase's route steps against four
//! simultaneous limit counters, inserting rest/fuel/restart events and
//! re-segmenting at day boundaries, then hands the accumulated per-day
//! logs to the Summary Builder.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{info, warn};

use crate::config::Config;
use crate::types::{
    interpolate, DriveActivity, DutyStatus, EldSchedule, Location, LogSegment, Route, RouteStep,
    TripInput, TripInputError,
};

use super::accumulator::SegmentAccumulator;
use super::log_writer::LogWriter;
use super::routing::RouteClient;
use super::summary::build_schedule;

const MAX_DRIVE_PER_DAY: f64 = 11.0;
const MAX_DRIVE_BEFORE_BREAK: f64 = 8.0;
const MAX_WEEKLY: f64 = 70.0;
const FUEL_STOP_DISTANCE: f64 = 1000.0;
const PICKUP_DROPOFF_HOURS: f64 = 1.0;
const PRE_TRIP_HOURS: f64 = 0.5;
const BREAK_HOURS: f64 = 0.5;
const FUEL_HOURS: f64 = 0.5;
const WEEKLY_RESTART_HOURS: f64 = 34.0;
const DIAGNOSTIC_HOURS: f64 = 5.0 / 60.0;

/// The four simultaneous limits, in tie-break precedence order:
/// on a tie, the earliest-declared variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
    Break,
    Fuel,
    Daily,
    Weekly,
}

fn add_hours(dt: NaiveDateTime, hours: f64) -> NaiveDateTime {
    dt + Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

struct SimulatorState {
    now: NaiveDateTime,
    truck_location: Location,
    current_day: NaiveDate,
    day_count: u32,
    daily_drive_hours: f64,
    daily_on_duty_hours: f64,
    weekly_drive_hours: f64,
    drive_hours_since_break: f64,
    miles_since_fuel: f64,
    destination_reached: bool,
}

impl SimulatorState {
    fn record_full_step(&mut self, step: &RouteStep) {
        self.daily_drive_hours += step.hours;
        self.weekly_drive_hours += step.hours;
        self.drive_hours_since_break += step.hours;
        self.miles_since_fuel += step.miles;
        self.now = add_hours(self.now, step.hours);
        self.truck_location = step.end.clone();
    }

    fn record_partial_step(&mut self, step: &RouteStep, t_limit: f64) {
        self.daily_drive_hours += t_limit;
        self.weekly_drive_hours += t_limit;
        self.drive_hours_since_break += t_limit;
        self.miles_since_fuel += step.miles * (t_limit / step.hours);
        self.now = add_hours(self.now, t_limit);
    }
}

/// Run the HOS simulation for a single trip and produce its ELD schedule.
pub async fn simulate(
    trip: &TripInput,
    route_client: &dyn RouteClient,
    config: &Config,
    base_date: NaiveDate,
) -> Result<EldSchedule, TripInputError> {
    trip.validate()?;

    let mut writer = LogWriter::new();
    let mut acc = SegmentAccumulator::new();
    let mut state = initialize(trip, config, base_date, &mut writer);
    let start_time = state.now - Duration::milliseconds((PRE_TRIP_HOURS * 3_600_000.0) as i64);

    run_drive_phase(
        DriveActivity::ToPickup,
        "Drive to Pickup",
        &trip.pickup.clone(),
        route_client,
        &mut state,
        &mut writer,
        &mut acc,
        config,
    )
    .await;
    run_activity_phase("Pickup", false, &mut state, &mut writer, &mut acc);

    run_drive_phase(
        DriveActivity::ToDropoff,
        "Drive to Dropoff",
        &trip.dropoff.clone(),
        route_client,
        &mut state,
        &mut writer,
        &mut acc,
        config,
    )
    .await;
    run_activity_phase("Dropoff", true, &mut state, &mut writer, &mut acc);

    acc.flush(&mut writer, state.now);
    if state.destination_reached {
        let day_end = state
            .current_day
            .and_time(NaiveTime::from_hms_opt(23, 59, 59).expect("valid static time"));
        writer.write(LogSegment::new(
            DutyStatus::OffDuty,
            state.now,
            day_end,
            state.truck_location.clone(),
            0.0,
            "Post-trip TIV-5mins/Off duty",
        ));
    }

    let end_time = state.now;
    Ok(build_schedule(
        trip.id,
        start_time,
        end_time,
        state.day_count,
        writer.into_days(),
    ))
}

fn initialize(
    trip: &TripInput,
    config: &Config,
    base_date: NaiveDate,
    writer: &mut LogWriter,
) -> SimulatorState {
    let shift_start = base_date.and_time(config.shift_start_time);
    let midnight = base_date.and_time(NaiveTime::MIN);

    writer.write(LogSegment::new(
        DutyStatus::OffDuty,
        midnight,
        shift_start,
        trip.current.clone(),
        0.0,
        "Off duty - Before shift start",
    ));

    let pre_trip_end = add_hours(shift_start, PRE_TRIP_HOURS);
    writer.write(LogSegment::new(
        DutyStatus::OnDuty,
        shift_start,
        pre_trip_end,
        trip.current.clone(),
        0.0,
        "Pre-trip /TIV",
    ));

    SimulatorState {
        now: pre_trip_end,
        truck_location: trip.current.clone(),
        current_day: base_date,
        day_count: 1,
        daily_drive_hours: 0.0,
        daily_on_duty_hours: 0.0,
        weekly_drive_hours: trip.accumulated_weekly_hours,
        drive_hours_since_break: 0.0,
        miles_since_fuel: 0.0,
        destination_reached: false,
    }
}

fn run_activity_phase(
    phase_name: &str,
    is_dropoff: bool,
    state: &mut SimulatorState,
    writer: &mut LogWriter,
    acc: &mut SegmentAccumulator,
) {
    acc.flush(writer, state.now);
    let end = add_hours(state.now, PICKUP_DROPOFF_HOURS);
    writer.write(LogSegment::new(
        DutyStatus::OnDuty,
        state.now,
        end,
        state.truck_location.clone(),
        0.0,
        phase_name,
    ));
    state.now = end;
    state.daily_on_duty_hours += PICKUP_DROPOFF_HOURS;
    if is_dropoff {
        state.destination_reached = true;
    }
}

async fn run_drive_phase(
    activity: DriveActivity,
    note: &str,
    destination: &Location,
    route_client: &dyn RouteClient,
    state: &mut SimulatorState,
    writer: &mut LogWriter,
    acc: &mut SegmentAccumulator,
    config: &Config,
) {
    let route: Route = match route_client.route(&state.truck_location, destination).await {
        Ok(route) => route,
        Err(err) => {
            warn!("route lookup failed for {}: {}", note, err);
            acc.flush(writer, state.now);
            let diag_end = add_hours(state.now, DIAGNOSTIC_HOURS);
            writer.write(LogSegment::new(
                DutyStatus::OnDuty,
                state.now,
                diag_end,
                state.truck_location.clone(),
                0.0,
                format!("Error fetching route: {err}"),
            ));
            state.now = diag_end;
            state.daily_on_duty_hours += DIAGNOSTIC_HOURS;
            return;
        }
    };

    for step in route.steps.iter().filter(|s| !s.is_negligible()) {
        loop {
            let step_end = add_hours(state.now, step.hours);
            if step_end.date() > state.current_day {
                day_change(state, writer, acc, config);
                continue;
            }

            let t_break = MAX_DRIVE_BEFORE_BREAK - state.drive_hours_since_break;
            let t_daily = MAX_DRIVE_PER_DAY - state.daily_drive_hours;
            let t_weekly = MAX_WEEKLY - state.weekly_drive_hours;
            let t_fuel = if step.miles > 0.0 {
                (FUEL_STOP_DISTANCE - state.miles_since_fuel) / step.miles * step.hours
            } else {
                f64::INFINITY
            };

            let candidates = [
                (Limit::Break, t_break),
                (Limit::Fuel, t_fuel),
                (Limit::Daily, t_daily),
                (Limit::Weekly, t_weekly),
            ];
            let (limit, t_limit) = candidates
                .into_iter()
                .map(|(l, t)| (l, if t > 0.0 { t } else { f64::INFINITY }))
                .fold((Limit::Weekly, f64::INFINITY), |best, candidate| {
                    if candidate.1 < best.1 {
                        candidate
                    } else {
                        best
                    }
                });

            if t_limit < step.hours {
                let fraction = t_limit / step.hours;
                acc.record_driving(
                    writer,
                    state.now,
                    &state.truck_location,
                    step.miles * fraction,
                    activity,
                    note,
                );
                state.record_partial_step(step, t_limit);
                state.truck_location = interpolate(&step.start, &step.end, fraction);
                acc.flush(writer, state.now);

                match limit {
                    Limit::Break => {
                        let end = add_hours(state.now, BREAK_HOURS);
                        writer.write(LogSegment::new(
                            DutyStatus::OffDuty,
                            state.now,
                            end,
                            state.truck_location.clone(),
                            0.0,
                            "30-min break",
                        ));
                        state.now = end;
                        state.drive_hours_since_break = 0.0;
                        state.daily_on_duty_hours += BREAK_HOURS;
                    }
                    Limit::Fuel => {
                        let end = add_hours(state.now, FUEL_HOURS);
                        writer.write(LogSegment::new(
                            DutyStatus::OnDuty,
                            state.now,
                            end,
                            state.truck_location.clone(),
                            0.0,
                            "Fuel stop",
                        ));
                        state.now = end;
                        state.miles_since_fuel = 0.0;
                        state.daily_on_duty_hours += FUEL_HOURS;
                    }
                    Limit::Daily => {
                        day_change(state, writer, acc, config);
                    }
                    Limit::Weekly => {
                        let end = add_hours(state.now, WEEKLY_RESTART_HOURS);
                        writer.write(LogSegment::new(
                            DutyStatus::OffDuty,
                            state.now,
                            end,
                            state.truck_location.clone(),
                            0.0,
                            "34-hr restart period",
                        ));
                        state.weekly_drive_hours = 0.0;
                        state.daily_drive_hours = 0.0;
                        state.daily_on_duty_hours = 0.0;
                        state.drive_hours_since_break = 0.0;
                        state.now = end;
                        state.current_day = end.date();
                        state.day_count += 1;
                    }
                }
                break;
            } else {
                acc.record_driving(
                    writer,
                    state.now,
                    &state.truck_location,
                    step.miles,
                    activity,
                    note,
                );
                state.record_full_step(step);
                break;
            }
        }
    }

    state.truck_location = destination.clone();
}

/// Closes out the current calendar day: overnight rest plus the next
/// day's pre-trip inspection, per §4.E's Day-Change action.
fn day_change(
    state: &mut SimulatorState,
    writer: &mut LogWriter,
    acc: &mut SegmentAccumulator,
    config: &Config,
) {
    acc.flush(writer, state.now);

    let rest_status = if state.destination_reached {
        DutyStatus::OffDuty
    } else {
        DutyStatus::Sleeper
    };

    let next_day = state
        .current_day
        .succ_opt()
        .expect("calendar date does not overflow within a trip's lifetime");
    let rest_end = next_day.and_time(config.shift_start_time);

    writer.write(LogSegment::new(
        rest_status,
        state.now,
        rest_end,
        state.truck_location.clone(),
        0.0,
        "Post-trip TIV/Overnight rest",
    ));

    let pre_trip_end = add_hours(rest_end, PRE_TRIP_HOURS);
    writer.write(LogSegment::new(
        DutyStatus::OnDuty,
        rest_end,
        pre_trip_end,
        state.truck_location.clone(),
        0.0,
        "Pre-trip /TIV",
    ));

    state.daily_drive_hours = 0.0;
    state.daily_on_duty_hours = 0.0;
    state.current_day = next_day;
    state.now = pre_trip_end;
    state.day_count += 1;
    info!("day change: now on day {}", state.current_day);
}
