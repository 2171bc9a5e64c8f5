use serde::{Deserialize, Serialize};

/// A single recorded position along a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Elevation in meters; zero when the source omits it
    pub elevation: f64,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }
}

/// Contiguous run of points inside a track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSegment {
    pub points: Vec<TrackPoint>,
}

impl PointSegment {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }
}

/// A recorded route made of one or more point segments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: Option<String>,
    pub segments: Vec<PointSegment>,
}

impl Track {
    /// Single-segment track from an ordered point list
    pub fn from_points(points: Vec<TrackPoint>) -> Self {
        Self {
            name: None,
            segments: vec![PointSegment::new(points)],
        }
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }
}

/// Progress marker: elapsed time and cumulative distance at that moment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub time_seconds: f64,
    pub distance_meters: f64,
}

/// Whole-track statistics produced by the aggregator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackStats {
    /// Sum of 3-D segment lengths
    pub total_distance_meters: f64,

    /// Sum of positive rises (only when elevation stats are enabled)
    pub elevation_gain_meters: f64,

    /// Sum of negative rises as a positive number
    pub elevation_loss_meters: f64,

    /// Estimated moving time
    pub total_time_seconds: f64,

    /// Time spent at or below the pain speed
    pub pain_time_seconds: f64,

    /// Time spent pinned at the free speed
    pub free_time_seconds: f64,

    /// Seeded with (0, 0) when breakpoints are enabled, empty otherwise
    pub breakpoints: Vec<Breakpoint>,
}

impl TrackStats {
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_meters / 1000.0
    }

    /// Average speed over the whole track, zero for an empty track
    pub fn average_speed_kph(&self) -> f64 {
        if self.total_time_seconds > 0.0 {
            3.6 * self.total_distance_meters / self.total_time_seconds
        } else {
            0.0
        }
    }
}
