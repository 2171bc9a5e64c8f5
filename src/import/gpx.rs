use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use ::gpx::Waypoint;

use crate::error::TrackError;
use crate::import::{has_extension, TrackImporter};
use crate::models::{PointSegment, Track, TrackPoint};

/// GPX importer for GPS track data
pub struct GpxImporter;

impl GpxImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse GPX from any reader. Points without an elevation get `0.0`.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<Track>, TrackError> {
        let gpx = ::gpx::read(reader).map_err(|e| TrackError::Parse {
            format: "GPX".to_string(),
            reason: e.to_string(),
        })?;

        let mut tracks = Vec::with_capacity(gpx.tracks.len());
        for track in gpx.tracks {
            let segments = track
                .segments
                .iter()
                .map(|segment| {
                    segment
                        .points
                        .iter()
                        .map(track_point)
                        .collect::<Result<Vec<_>, _>>()
                        .map(PointSegment::new)
                })
                .collect::<Result<Vec<_>, _>>()?;

            tracks.push(Track {
                name: track.name,
                segments,
            });
        }

        Ok(tracks)
    }
}

/// Convert a waypoint, rejecting NaN or infinite coordinates
fn track_point(waypoint: &Waypoint) -> Result<TrackPoint, TrackError> {
    let point = waypoint.point();
    let elevation = waypoint.elevation.unwrap_or(0.0);

    for (field, value) in [
        ("latitude", point.y()),
        ("longitude", point.x()),
        ("elevation", elevation),
    ] {
        if !value.is_finite() {
            return Err(TrackError::Parse {
                format: "GPX".to_string(),
                reason: format!("{} is not a finite number: {}", field, value),
            });
        }
    }

    Ok(TrackPoint::new(point.y(), point.x(), elevation))
}

impl Default for GpxImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackImporter for GpxImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "gpx")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<Track>, TrackError> {
        let file = File::open(file_path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => TrackError::FileNotFound {
                path: file_path.to_path_buf(),
            },
            _ => TrackError::Io {
                path: file_path.to_path_buf(),
                source,
            },
        })?;

        Self::parse(BufReader::new(file))
    }

    fn format_name(&self) -> &'static str {
        "GPX"
    }
}
