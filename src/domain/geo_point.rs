use serde::{Deserialize, Serialize};

/// A point on Earth's surface in decimal degrees.
///
/// Coordinates are taken as-is: nothing rejects out-of-range values, they flow
/// through the distance formula and yield a well-typed (if meaningless) number.
#[derive(Copy, Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint { latitude, longitude }
    }
}
