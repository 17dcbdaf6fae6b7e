//! HOS-compliant ELD trip schedule simulator.

pub mod config;
pub mod services;
pub mod types;

pub use config::Config;
pub use services::simulate;
pub use types::{EldSchedule, RouteError, TripInput, TripInputError};
