//! Whole-track time estimation
//!
//! Folds a track's segments in point order into a `TrackStats`. Each
//! non-degenerate segment contributes its length, its duration at the
//! modelled velocity, and (depending on configuration) elevation change,
//! pain time, free time and a progress breakpoint.

use tracing::{debug, trace, warn};

use crate::config::ModelConfig;
use crate::error::ConfigError;
use crate::geodesy::GroundDistance;
use crate::models::{Breakpoint, Track, TrackPoint, TrackStats};
use crate::segment::{SegmentGeometry, SegmentModel};

/// Running accumulator for one track
pub struct TrackAggregator<'a, D> {
    model: SegmentModel<'a>,
    distance: D,
    stats: TrackStats,
    skipped_segments: usize,
}

impl<'a, D: GroundDistance> TrackAggregator<'a, D> {
    pub fn new(config: &'a ModelConfig, distance: D) -> Self {
        let mut stats = TrackStats::default();
        if config.breakpoint_interval_seconds.is_some() {
            stats.breakpoints.push(Breakpoint {
                time_seconds: 0.0,
                distance_meters: 0.0,
            });
        }

        Self {
            model: SegmentModel::new(config),
            distance,
            stats,
            skipped_segments: 0,
        }
    }

    /// Number of zero-length segments skipped so far
    pub fn skipped_segments(&self) -> usize {
        self.skipped_segments
    }

    /// Walk adjacent pairs of one point segment
    pub fn push_points(&mut self, points: &[TrackPoint]) {
        for pair in points.windows(2) {
            let geometry = SegmentGeometry::between(&pair[0], &pair[1], &self.distance);
            self.push_geometry(geometry);
        }
    }

    pub fn push_geometry(&mut self, geometry: SegmentGeometry) {
        if geometry.is_degenerate() {
            self.skipped_segments += 1;
            trace!("Skipping zero-length segment");
            return;
        }

        let config = self.model.config();
        let velocity = self.model.velocity_kph(&geometry);
        let duration = 3600.0 * (geometry.hypotenuse / 1000.0) / velocity;

        let stats = &mut self.stats;
        stats.total_distance_meters += geometry.hypotenuse;
        stats.total_time_seconds += duration;

        if config.track_elevation_stats {
            if geometry.rise > 0.0 {
                stats.elevation_gain_meters += geometry.rise;
            } else if geometry.rise < 0.0 {
                stats.elevation_loss_meters -= geometry.rise;
            }
        }

        if config
            .pain_comparison
            .is_pain(velocity, config.pain_speed)
        {
            stats.pain_time_seconds += duration;
        }

        if config.free_speed == Some(velocity) {
            stats.free_time_seconds += duration;
        }

        if let Some(interval) = config.breakpoint_interval_seconds {
            let due = stats
                .breakpoints
                .last()
                .map_or(0.0, |last| last.time_seconds + interval);
            if stats.total_time_seconds >= due {
                stats.breakpoints.push(Breakpoint {
                    time_seconds: stats.total_time_seconds,
                    distance_meters: stats.total_distance_meters,
                });
            }
        }

        trace!(
            rise = geometry.rise,
            run = geometry.run,
            velocity_kph = velocity,
            duration_s = duration,
            "Segment"
        );
    }

    /// Close the breakpoint list at the true track end and hand back the totals
    pub fn finish(mut self) -> TrackStats {
        let stats = &mut self.stats;
        if let Some(last) = stats.breakpoints.last().copied() {
            if last.time_seconds != stats.total_time_seconds {
                stats.breakpoints.push(Breakpoint {
                    time_seconds: stats.total_time_seconds,
                    distance_meters: stats.total_distance_meters,
                });
            }
        }

        debug!(
            distance_m = stats.total_distance_meters,
            time_s = stats.total_time_seconds,
            pain_s = stats.pain_time_seconds,
            free_s = stats.free_time_seconds,
            skipped = self.skipped_segments,
            "Track aggregated"
        );

        self.stats
    }
}

/// Estimate one track. Pairs never straddle two point segments.
pub fn aggregate_track<D: GroundDistance>(
    config: &ModelConfig,
    track: &Track,
    distance: D,
) -> Result<TrackStats, ConfigError> {
    config.validate()?;

    let mut aggregator = TrackAggregator::new(config, distance);
    for segment in &track.segments {
        aggregator.push_points(&segment.points);
    }

    Ok(aggregator.finish())
}

/// Estimate the first track only; later tracks are ignored
pub fn aggregate_first_track<D: GroundDistance>(
    config: &ModelConfig,
    tracks: &[Track],
    distance: D,
) -> Result<Option<TrackStats>, ConfigError> {
    let Some(first) = tracks.first() else {
        warn!("No tracks to process");
        return Ok(None);
    };

    if tracks.len() > 1 {
        warn!(
            ignored = tracks.len() - 1,
            "Only the first track is processed"
        );
    }

    aggregate_track(config, first, distance).map(Some)
}
