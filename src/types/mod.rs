//! Type definitions

pub mod duty;
pub mod location;
pub mod route;
pub mod schedule;
pub mod trip;

pub use duty::*;
pub use location::*;
pub use route::*;
pub use schedule::*;
pub use trip::*;
