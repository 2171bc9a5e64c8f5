use serde::Serialize;
use std::io::Write;

use super::{percentage, ExportError, TrackReport};
use crate::models::Breakpoint;

/// Flattened report with derived shares, for machine consumption
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    track_name: Option<&'a str>,
    distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    elevation_gain_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elevation_loss_m: Option<f64>,
    total_time_seconds: f64,
    average_speed_kph: f64,
    pain_time_seconds: f64,
    pain_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    free_time_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    free_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakpoints: Option<&'a [Breakpoint]>,
}

impl<'a> JsonReport<'a> {
    fn from_report(report: &'a TrackReport) -> Self {
        let stats = &report.stats;
        let options = &report.options;
        let total = stats.total_time_seconds;

        Self {
            track_name: report.track_name.as_deref(),
            distance_km: stats.total_distance_km(),
            elevation_gain_m: options.show_elevation.then_some(stats.elevation_gain_meters),
            elevation_loss_m: options.show_elevation.then_some(stats.elevation_loss_meters),
            total_time_seconds: total,
            average_speed_kph: stats.average_speed_kph(),
            pain_time_seconds: stats.pain_time_seconds,
            pain_percent: percentage(stats.pain_time_seconds, total),
            free_time_seconds: options.show_free.then_some(stats.free_time_seconds),
            free_percent: options
                .show_free
                .then(|| percentage(stats.free_time_seconds, total)),
            breakpoints: options
                .show_breakpoints
                .then(|| stats.breakpoints.get(1..).unwrap_or(&[])),
        }
    }
}

/// Render a track report as pretty-printed JSON
pub fn render(report: &TrackReport) -> Result<String, ExportError> {
    serde_json::to_string_pretty(&JsonReport::from_report(report))
        .map_err(|e| ExportError::SerializationError(e.to_string()))
}

/// Write the JSON report followed by a newline
pub fn write_report<W: Write>(out: &mut W, report: &TrackReport) -> Result<(), ExportError> {
    let json_data = render(report)?;
    writeln!(out, "{}", json_data)?;
    Ok(())
}
