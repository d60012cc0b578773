use crate::domain::GeoPoint;
use crate::geo::distance_meters;
use serde::Serialize;

/// Default check-in radius around a school, in meters.
pub const DEFAULT_THRESHOLD_METERS: f64 = 100.0;

/// Outcome of a proximity check. `within_threshold` always equals
/// `distance_meters <= threshold` for the threshold the check was made with.
#[derive(Copy, Clone, PartialEq, Debug, Serialize)]
pub struct ProximityResult {
    pub distance_meters: f64,
    pub within_threshold: bool,
}

/// Compares the great-circle distance between `user` and `reference` against
/// `threshold_meters`. The comparison is inclusive: a user at exactly the
/// threshold distance is within proximity.
pub fn within_proximity(user: GeoPoint, reference: GeoPoint, threshold_meters: f64) -> ProximityResult {
    let distance = distance_meters(user, reference);

    ProximityResult {
        distance_meters: distance,
        within_threshold: distance <= threshold_meters,
    }
}
