// Library interface for ridetime
// The binary is a thin CLI over `estimate_file`

pub mod aggregator;
pub mod config;
pub mod error;
pub mod export;
pub mod geodesy;
pub mod import;
pub mod logging;
pub mod models;
pub mod segment;
pub mod solver;

use std::path::Path;

// Re-export commonly used types for convenience
pub use aggregator::{aggregate_first_track, aggregate_track, TrackAggregator};
pub use config::{AppConfig, Mode, ModelConfig, PainComparison, PhysicalConstants, ReportSettings};
pub use error::{ConfigError, RideTimeError, Result, TrackError};
pub use export::{ExportFormat, ReportOptions, TrackReport};
pub use geodesy::{GeodesicDistance, GroundDistance};
pub use models::*;
pub use segment::{SegmentGeometry, SegmentModel};
pub use solver::{Cubic, RootSolver};

/// Import a track file and estimate its first track.
///
/// Returns `None` when the file holds no tracks.
pub fn estimate_file(path: &Path, config: &AppConfig) -> Result<Option<TrackReport>> {
    config.model.validate()?;

    let tracks = import::ImportManager::new().import_file(path)?;
    let Some(stats) = aggregate_first_track(&config.model, &tracks, GeodesicDistance)? else {
        return Ok(None);
    };

    let options = ReportOptions::new(&config.model, &config.report);
    let name = tracks.first().and_then(|track| track.name.clone());

    Ok(Some(TrackReport::new(name, stats, options)))
}
