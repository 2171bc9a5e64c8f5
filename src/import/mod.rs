use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::TrackError;
use crate::models::Track;

pub mod gpx;

/// Trait for reading tracks from different file formats
pub trait TrackImporter {
    /// Check if this importer can handle the given file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Read every track in the file, in file order
    fn import_file(&self, file_path: &Path) -> Result<Vec<Track>, TrackError>;

    /// Get the format name for this importer
    fn format_name(&self) -> &'static str;
}

/// Case-insensitive extension check shared by importers
pub(crate) fn has_extension(file_path: &Path, extension: &str) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Picks an importer for a file based on its extension
pub struct ImportManager {
    importers: Vec<Box<dyn TrackImporter>>,
}

impl ImportManager {
    /// Create a new import manager with all available importers
    pub fn new() -> Self {
        let importers: Vec<Box<dyn TrackImporter>> = vec![Box::new(gpx::GpxImporter::new())];

        Self { importers }
    }

    /// Import a single file, auto-detecting the format
    pub fn import_file(&self, file_path: &Path) -> Result<Vec<Track>, TrackError> {
        let importer = self
            .importers
            .iter()
            .find(|importer| importer.can_import(file_path))
            .ok_or_else(|| TrackError::UnsupportedFormat {
                path: PathBuf::from(file_path),
            })?;

        info!(
            path = %file_path.display(),
            format = importer.format_name(),
            "Importing track file"
        );

        let tracks = importer.import_file(file_path)?;
        info!(
            tracks = tracks.len(),
            points = tracks.iter().map(Track::point_count).sum::<usize>(),
            "Import complete"
        );

        Ok(tracks)
    }

    /// Check if this manager can import a given file
    pub fn can_import_file(&self, file_path: &Path) -> bool {
        self.importers.iter().any(|importer| importer.can_import(file_path))
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        let manager = ImportManager::new();
        assert!(manager.can_import_file(Path::new("ride.gpx")));
        assert!(manager.can_import_file(Path::new("RIDE.GPX")));
        assert!(!manager.can_import_file(Path::new("ride.fit")));
        assert!(!manager.can_import_file(Path::new("ride")));
    }

    #[test]
    fn test_unsupported_format() {
        let manager = ImportManager::new();
        let result = manager.import_file(Path::new("ride.tcx"));
        assert!(matches!(result, Err(TrackError::UnsupportedFormat { .. })));
    }
}
