//! Great-circle distance and the geofence rule.

use crate::core::model::Coordinate;

/// Mean earth radius in meters, the value the map widget uses for its
/// own distance measurements.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Radius of the circle drawn around every office, in meters.
pub const GEOFENCE_RADIUS_M: f64 = 500.0;

/// Haversine distance between two coordinates, in meters.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeofenceStatus {
    /// No office assigned, or the assigned office no longer exists.
    Unassigned,
    Inside { distance_m: f64 },
    Outside { distance_m: f64 },
}

impl GeofenceStatus {
    pub fn is_outside(&self) -> bool {
        matches!(self, GeofenceStatus::Outside { .. })
    }
}

/// The geofence rule: strictly farther than the radius is outside.
pub fn is_beyond_geofence(distance_m: f64) -> bool {
    distance_m > GEOFENCE_RADIUS_M
}

/// Classifies `position` against the geofence of an office located at
/// `office`. A distance of exactly [`GEOFENCE_RADIUS_M`] is still inside.
pub fn classify(position: Coordinate, office: Option<Coordinate>) -> GeofenceStatus {
    match office {
        None => GeofenceStatus::Unassigned,
        Some(office) => {
            let distance_m = distance_m(position, office);
            if is_beyond_geofence(distance_m) {
                GeofenceStatus::Outside { distance_m }
            } else {
                GeofenceStatus::Inside { distance_m }
            }
        }
    }
}

/// Moves `origin` due north by `meters`. Handy for placing points at a
/// known distance from an office.
pub fn offset_north(origin: Coordinate, meters: f64) -> Coordinate {
    let d_lat = (meters / EARTH_RADIUS_M).to_degrees();
    Coordinate::new(origin.latitude + d_lat, origin.longitude)
}
