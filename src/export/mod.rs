use serde::{Deserialize, Serialize};
use std::io::Write;
use thiserror::Error;

use crate::config::{ModelConfig, ReportSettings};
use crate::models::TrackStats;

pub mod json;
pub mod text;

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unsupported export format: {}", s)),
        }
    }
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Which report sections to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub show_elevation: bool,
    pub show_free: bool,
    pub show_breakpoints: bool,
    pub show_percentages: bool,
}

impl ReportOptions {
    /// Sections follow what the model actually accumulated
    pub fn new(model: &ModelConfig, settings: &ReportSettings) -> Self {
        Self {
            show_elevation: model.track_elevation_stats,
            show_free: model.free_speed.is_some(),
            show_breakpoints: model.breakpoint_interval_seconds.is_some(),
            show_percentages: settings.show_percentages,
        }
    }
}

/// Finalized statistics for one track, ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackReport {
    pub track_name: Option<String>,
    pub stats: TrackStats,
    pub options: ReportOptions,
}

impl TrackReport {
    pub fn new(track_name: Option<String>, stats: TrackStats, options: ReportOptions) -> Self {
        Self {
            track_name,
            stats,
            options,
        }
    }
}

/// `HHhMMm` from whole elapsed minutes
pub fn format_hhmm(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor().max(0.0) as u64;
    format!("{:02}h{:02}m", minutes / 60, minutes % 60)
}

/// Share of `total` in percent; zero when there is no total
pub fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        100.0 * part / total
    } else {
        0.0
    }
}

/// Render a report in the requested format
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &TrackReport,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Text => text::write_report(writer, report),
        ExportFormat::Json => json::write_report(writer, report),
    }
}
