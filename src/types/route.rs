//! Route types — canonical routed-path representation

use serde::{Deserialize, Serialize};

use super::Location;

/// A single leg of a routed path between two interpolable points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteStep {
    pub start: Location,
    pub end: Location,
    pub miles: f64,
    pub hours: f64,
    pub road_name: Option<String>,
}

impl RouteStep {
    /// Steps below this distance or duration carry no meaningful driving
    /// and are skipped by the simulator.
    pub fn is_negligible(&self) -> bool {
        self.miles < 0.1 || self.hours < 0.01
    }
}

/// A canonical route in miles and hours, normalized by the route client
/// from whatever unit system the upstream service returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub total_miles: f64,
    pub total_hours: f64,
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// Build a route, synthesizing a single step spanning the whole
    /// journey when the upstream response carried no per-step breakdown.
    pub fn with_steps_or_direct(
        total_miles: f64,
        total_hours: f64,
        steps: Vec<RouteStep>,
        from: &Location,
        to: &Location,
    ) -> Self {
        if steps.is_empty() {
            Self {
                total_miles,
                total_hours,
                steps: vec![RouteStep {
                    start: from.clone(),
                    end: to.clone(),
                    miles: total_miles,
                    hours: total_hours,
                    road_name: None,
                }],
            }
        } else {
            Self {
                total_miles,
                total_hours,
                steps,
            }
        }
    }
}

/// Errors a route client can raise; the caller (the HOS state machine)
/// recovers from all three with a diagnostic segment, per the failure
/// policy in the spec.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("no route found between the requested points")]
    Unreachable,
    #[error("transport error contacting routing service: {0}")]
    Transport(String),
    #[error("malformed response from routing service: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(lat: f64, lon: f64) -> Location {
        Location::new(lat, lon, "x")
    }

    #[test]
    fn synthesizes_single_step_when_empty() {
        let route =
            Route::with_steps_or_direct(10.0, 0.5, vec![], &loc(1.0, 1.0), &loc(2.0, 2.0));
        assert_eq!(route.steps.len(), 1);
        assert_eq!(route.steps[0].miles, 10.0);
        assert_eq!(route.steps[0].hours, 0.5);
    }

    #[test]
    fn keeps_existing_steps() {
        let step = RouteStep {
            start: loc(1.0, 1.0),
            end: loc(2.0, 2.0),
            miles: 5.0,
            hours: 0.25,
            road_name: Some("Main St".to_string()),
        };
        let route = Route::with_steps_or_direct(
            5.0,
            0.25,
            vec![step],
            &loc(1.0, 1.0),
            &loc(2.0, 2.0),
        );
        assert_eq!(route.steps.len(), 1);
        assert_eq!(route.steps[0].road_name.as_deref(), Some("Main St"));
    }

    #[test]
    fn negligible_step_detection() {
        let tiny_distance = RouteStep {
            start: loc(0.0, 0.0),
            end: loc(0.0, 0.0),
            miles: 0.05,
            hours: 1.0,
            road_name: None,
        };
        let tiny_duration = RouteStep {
            start: loc(0.0, 0.0),
            end: loc(0.0, 0.0),
            miles: 5.0,
            hours: 0.005,
            road_name: None,
        };
        let real = RouteStep {
            start: loc(0.0, 0.0),
            end: loc(0.0, 0.0),
            miles: 5.0,
            hours: 0.1,
            road_name: None,
        };
        assert!(tiny_distance.is_negligible());
        assert!(tiny_duration.is_negligible());
        assert!(!real.is_negligible());
    }
}
