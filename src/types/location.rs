//! Geographic location and pure interpolation helpers

use serde::{Deserialize, Serialize};

/// A geographic point with an advisory display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

impl Location {
    pub fn new(lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            name: name.into(),
        }
    }

    /// Synthesize a location from bare coordinates, matching the
    /// "Location at {lat:.4}, {lon:.4}" naming used for interpolated points.
    pub fn synthesized(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            name: synthesized_name(lat, lon),
        }
    }
}

pub fn synthesized_name(lat: f64, lon: f64) -> String {
    format!("Location at {lat:.4}, {lon:.4}")
}

/// Linear interpolation between two locations by fractional progress `p`.
///
/// `p` is not clamped; callers are expected to pass `p ∈ [0, 1]` as the
/// simulator always does when placing an inserted event mid-step.
pub fn interpolate(a: &Location, b: &Location, p: f64) -> Location {
    let lat = a.lat + (b.lat - a.lat) * p;
    let lon = a.lon + (b.lon - a.lon) * p;
    Location::synthesized(lat, lon)
}

/// Earth radius in miles, used by the mock route client for distance
/// estimation when no real routing service is configured.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two locations in miles.
pub fn haversine_miles(from: &Location, to: &Location) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MILES * c
}
