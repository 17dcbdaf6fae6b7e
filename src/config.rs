//! Configuration management — §4.G

use anyhow::Result;
use chrono::NaiveTime;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the OSRM-compatible routing service
    pub routing_base_url: String,

    /// Timeout, in seconds, for each routing request
    pub routing_timeout_seconds: u64,

    /// Local time at which a driver's shift begins
    pub shift_start_time: NaiveTime,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routing_base_url: "http://router.project-osrm.org".to_string(),
            routing_timeout_seconds: 10,
            shift_start_time: NaiveTime::from_hms_opt(6, 30, 0).expect("valid static time"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, loading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let routing_base_url =
            std::env::var("ROUTING_BASE_URL").unwrap_or(defaults.routing_base_url);

        let routing_timeout_seconds = std::env::var("ROUTING_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.routing_timeout_seconds);

        let shift_start_time = std::env::var("SHIFT_START_TIME")
            .ok()
            .and_then(|v| NaiveTime::parse_from_str(&v, "%H:%M:%S").ok())
            .unwrap_or(defaults.shift_start_time);

        Ok(Self {
            routing_base_url,
            routing_timeout_seconds,
            shift_start_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_base_url_defaults_to_public_osrm_demo() {
        std::env::remove_var("ROUTING_BASE_URL");
        let config = Config::from_env().unwrap();
        assert_eq!(config.routing_base_url, "http://router.project-osrm.org");
    }

    #[test]
    fn routing_base_url_uses_override_when_set() {
        std::env::set_var("ROUTING_BASE_URL", "http://localhost:5000");
        let config = Config::from_env().unwrap();
        assert_eq!(config.routing_base_url, "http://localhost:5000");
        std::env::remove_var("ROUTING_BASE_URL");
    }

    #[test]
    fn shift_start_time_defaults_to_six_thirty() {
        std::env::remove_var("SHIFT_START_TIME");
        let config = Config::from_env().unwrap();
        assert_eq!(config.shift_start_time, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
    }

    #[test]
    fn shift_start_time_parses_override() {
        std::env::set_var("SHIFT_START_TIME", "05:00:00");
        let config = Config::from_env().unwrap();
        assert_eq!(config.shift_start_time, NaiveTime::from_hms_opt(5, 0, 0).unwrap());
        std::env::remove_var("SHIFT_START_TIME");
    }
}
