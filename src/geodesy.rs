use geo::{Distance, Geodesic, Point};

use crate::models::TrackPoint;

/// Horizontal distance in meters between two track points
pub trait GroundDistance {
    fn ground_distance(&self, from: &TrackPoint, to: &TrackPoint) -> f64;
}

impl<F> GroundDistance for F
where
    F: Fn(&TrackPoint, &TrackPoint) -> f64,
{
    fn ground_distance(&self, from: &TrackPoint, to: &TrackPoint) -> f64 {
        self(from, to)
    }
}

/// Geodesic distance on the WGS84 ellipsoid.
///
/// Assumes both points are at sea level, so it slightly underestimates the
/// ground distance at altitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicDistance;

impl GroundDistance for GeodesicDistance {
    fn ground_distance(&self, from: &TrackPoint, to: &TrackPoint) -> f64 {
        Geodesic.distance(
            Point::new(from.longitude, from.latitude),
            Point::new(to.longitude, to.latitude),
        )
    }
}
