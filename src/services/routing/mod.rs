//! Route Client — §4.A
//!
//! Uses OSRM for production, a Haversine-based mock for tests and for
//! offline operation when no routing service is configured.

mod osrm;

pub use osrm::{OsrmConfig, OsrmRouteClient};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::types::{Location, Route, RouteError};

/// Abstraction over the upstream routing service so the simulator never
/// depends on a concrete HTTP client.
#[async_trait]
pub trait RouteClient: Send + Sync {
    async fn route(&self, from: &Location, to: &Location) -> Result<Route, RouteError>;

    /// Service name for logging.
    fn name(&self) -> &str;
}

/// Coefficient applied to the straight-line distance to approximate a
/// road distance when no real routing service is available.
const ROAD_COEFFICIENT: f64 = 1.3;
/// Average speed in mph used to estimate travel time for the mock client.
const AVERAGE_SPEED_MPH: f64 = 55.0;

/// Deterministic offline route client: Haversine distance × a road
/// coefficient, constant speed, a single synthesized step per leg.
pub struct MockRouteClient {
    road_coefficient: f64,
    average_speed_mph: f64,
}

impl Default for MockRouteClient {
    fn default() -> Self {
        Self {
            road_coefficient: ROAD_COEFFICIENT,
            average_speed_mph: AVERAGE_SPEED_MPH,
        }
    }
}

impl MockRouteClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(road_coefficient: f64, average_speed_mph: f64) -> Self {
        Self {
            road_coefficient,
            average_speed_mph,
        }
    }
}

#[async_trait]
impl RouteClient for MockRouteClient {
    async fn route(&self, from: &Location, to: &Location) -> Result<Route, RouteError> {
        use crate::types::haversine_miles;

        let straight_line = haversine_miles(from, to);
        let miles = straight_line * self.road_coefficient;
        let hours = miles / self.average_speed_mph;

        Ok(Route::with_steps_or_direct(miles, hours, vec![], from, to))
    }

    fn name(&self) -> &str {
        "MockRouting"
    }
}

/// Build a route client from an optional OSRM base URL and the
/// configured request timeout, falling back to the mock client when no
/// URL is given.
pub fn create_route_client(
    osrm_base_url: Option<String>,
    timeout_seconds: u64,
) -> Box<dyn RouteClient> {
    match osrm_base_url {
        Some(url) => {
            info!("Using OSRM routing service at {}", url);
            let mut config = OsrmConfig::new(url);
            config.timeout_seconds = timeout_seconds;
            Box::new(OsrmRouteClient::new(config))
        }
        None => {
            warn!("No routing service configured; using mock routing");
            Box::new(MockRouteClient::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prague() -> Location {
        Location::new(50.0755, 14.4378, "Prague")
    }

    fn brno() -> Location {
        Location::new(49.1951, 16.6068, "Brno")
    }

    #[tokio::test]
    async fn mock_routing_symmetric_and_positive() {
        let client = MockRouteClient::new();
        let a_to_b = client.route(&prague(), &brno()).await.unwrap();
        let b_to_a = client.route(&brno(), &prague()).await.unwrap();

        assert!((a_to_b.total_miles - b_to_a.total_miles).abs() < 1e-6);
        assert!(a_to_b.total_miles > 0.0);
        assert!(a_to_b.total_hours > 0.0);
    }

    #[tokio::test]
    async fn mock_routing_same_point_is_zero() {
        let client = MockRouteClient::new();
        let route = client.route(&prague(), &prague()).await.unwrap();
        assert!(route.total_miles < 1e-6);
    }

    #[tokio::test]
    async fn mock_routing_custom_params_scale_distance() {
        let fast = MockRouteClient::with_params(1.0, 60.0);
        let padded = MockRouteClient::with_params(1.5, 60.0);

        let a = fast.route(&prague(), &brno()).await.unwrap();
        let b = padded.route(&prague(), &brno()).await.unwrap();

        assert!(b.total_miles > a.total_miles);
    }

    #[test]
    fn factory_falls_back_to_mock_without_a_url() {
        let client = create_route_client(None, 10);
        assert_eq!(client.name(), "MockRouting");
    }

    #[test]
    fn factory_uses_osrm_when_url_given() {
        let client = create_route_client(Some("http://localhost:5000".to_string()), 10);
        assert_eq!(client.name(), "OSRM");
    }

    #[test]
    fn factory_overrides_the_default_osrm_timeout() {
        let mut config = OsrmConfig::new("http://localhost:5000");
        config.timeout_seconds = 42;
        assert_ne!(config.timeout_seconds, OsrmConfig::default().timeout_seconds);
        assert_eq!(config.timeout_seconds, 42);
    }
}
