use geo::{HaversineDistance, Point};

use crate::models::GeoPoint;

const METERS_PER_KM: f64 = 1000.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers, on the mean Earth radius
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // geo points are (x = longitude, y = latitude)
    let from = Point::new(lon1, lat1);
    let to = Point::new(lon2, lat2);

    from.haversine_distance(&to) / METERS_PER_KM
}

/// Distance between two optional locations.
///
/// Returns `None` when either side is unknown so callers apply their own
/// missing-location policy instead of scoring a meaningless zero distance.
#[inline]
pub fn distance_between(a: Option<GeoPoint>, b: Option<GeoPoint>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => {
            let km = haversine_distance(a.lat, a.long, b.lat, b.long);
            km.is_finite().then_some(km)
        }
        _ => None,
    }
}
