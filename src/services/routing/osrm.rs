//! OSRM routing engine client
//!
//! OSRM API documentation: http://project-osrm.org/docs/v5.24.0/api/#route-service

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::{Location, Route, RouteError, RouteStep};

use super::RouteClient;

/// OSRM client configuration
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server (e.g. "http://router.project-osrm.org")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl OsrmConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// OSRM routing client
pub struct OsrmRouteClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmRouteClient {
    pub fn new(config: OsrmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("failed to build OSRM HTTP client");

        Self { client, config }
    }

    fn build_url(&self, from: &Location, to: &Location) -> String {
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&steps=true&annotations=true",
            self.config.base_url, from.lon, from.lat, to.lon, to.lat
        )
    }
}

#[async_trait]
impl RouteClient for OsrmRouteClient {
    async fn route(&self, from: &Location, to: &Location) -> Result<Route, RouteError> {
        let url = self.build_url(from, to);
        debug!("Requesting route from OSRM: {} -> {}", from.name, to.name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RouteError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OSRM returned {}: {}", status, body);
            return Err(RouteError::Transport(format!(
                "OSRM returned {status}: {body}"
            )));
        }

        let parsed: OsrmResponse = response
            .json()
            .await
            .map_err(|e| RouteError::Malformed(e.to_string()))?;

        if parsed.code != "Ok" {
            return Err(RouteError::Unreachable);
        }

        let osrm_route = parsed
            .routes
            .into_iter()
            .next()
            .ok_or(RouteError::Unreachable)?;

        let total_miles = osrm_route.distance / METERS_PER_MILE;
        let total_hours = osrm_route.duration / SECONDS_PER_HOUR;

        let mut steps: Vec<RouteStep> = Vec::new();
        for leg in osrm_route.legs {
            for step in leg.steps {
                let [lon, lat] = step.maneuver.location;
                steps.push(RouteStep {
                    start: Location::synthesized(lat, lon),
                    // Filled in below once the next step's start is known;
                    // the last step's end is the requested destination.
                    end: Location::synthesized(lat, lon),
                    miles: step.distance / METERS_PER_MILE,
                    hours: step.duration / SECONDS_PER_HOUR,
                    road_name: step.name.filter(|n| !n.is_empty()),
                });
            }
        }

        for i in 0..steps.len().saturating_sub(1) {
            steps[i].end = steps[i + 1].start.clone();
        }
        if let Some(last) = steps.last_mut() {
            last.end = to.clone();
        }

        debug!(
            "OSRM route: {:.1} mi, {:.2} h, {} steps",
            total_miles,
            total_hours,
            steps.len()
        );

        Ok(Route::with_steps_or_direct(
            total_miles,
            total_hours,
            steps,
            from,
            to,
        ))
    }

    fn name(&self) -> &str {
        "OSRM"
    }
}

const METERS_PER_MILE: f64 = 1609.34;
const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    #[serde(default)]
    name: Option<String>,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    location: [f64; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_public_demo_server() {
        let config = OsrmConfig::default();
        assert_eq!(config.base_url, "http://router.project-osrm.org");
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn custom_config_overrides_base_url() {
        let config = OsrmConfig::new("http://localhost:5000");
        assert_eq!(config.base_url, "http://localhost:5000");
    }

    #[test]
    fn builds_expected_route_url() {
        let client = OsrmRouteClient::new(OsrmConfig::default());
        let from = Location::new(40.0, -74.0, "from");
        let to = Location::new(41.0, -73.0, "to");
        let url = client.build_url(&from, &to);
        assert_eq!(
            url,
            "http://router.project-osrm.org/route/v1/driving/-74,40;-73,41?overview=full&steps=true&annotations=true"
        );
    }

    #[test]
    fn client_name_is_osrm() {
        let client = OsrmRouteClient::new(OsrmConfig::default());
        assert_eq!(client.name(), "OSRM");
    }

    #[tokio::test]
    #[ignore = "Requires network access to the public OSRM demo server"]
    async fn integration_prague_to_brno() {
        let client = OsrmRouteClient::new(OsrmConfig::default());
        let prague = Location::new(50.0755, 14.4378, "Prague");
        let brno = Location::new(49.1951, 16.6068, "Brno");

        let route = client.route(&prague, &brno).await.unwrap();

        assert!(route.total_miles > 100.0 && route.total_miles < 200.0);
        assert!(!route.steps.is_empty());
    }
}
