pub mod events;
mod geo_point;
mod log_entry;
mod school;

pub use geo_point::GeoPoint;
pub use log_entry::{CheckAction, CheckStatus, LogEntry};
pub use school::{School, SchoolDirectory};
