use crate::domain::GeoPoint;

/// Mean Earth radius in meters, the default sphere for [`distance_meters`].
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Returns the great-circle distance between `a` and `b` in meters, computed
/// with the Haversine formula on a sphere with the mean Earth radius.
///
/// Total over the reals: never fails, and identical inputs collapse every
/// trigonometric term so the result is exactly `0.0`.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    distance_meters_on_sphere(a, b, EARTH_RADIUS_METERS)
}

/// Haversine distance on a sphere with an explicit radius in meters.
pub fn distance_meters_on_sphere(a: GeoPoint, b: GeoPoint, radius_meters: f64) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    radius_meters * c
}
