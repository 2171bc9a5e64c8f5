//! Unified error hierarchy for ridetime
//!
//! Track loading and configuration each get their own error enum;
//! `RideTimeError` ties them together with report output for the library API.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all ridetime operations
#[derive(Debug, Error)]
pub enum RideTimeError {
    /// Track file loading errors
    #[error("Track error: {0}")]
    Track(#[from] TrackError),

    /// Model or application configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report rendering errors
    #[error("Export error: {0}")]
    Export(#[from] crate::export::ExportError),
}

/// Errors raised while reading a track file
#[derive(Debug, Error)]
pub enum TrackError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File contents could not be parsed
    #[error("Parse error in {format}: {reason}")]
    Parse { format: String, reason: String },

    /// No importer handles this file
    #[error("Unsupported format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Underlying read failure
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A model parameter is outside its physical range
    #[error("Invalid parameter {parameter}={value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `AppConfig`
    #[error("Failed to parse TOML configuration {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Config file could not be written
    #[error("Failed to write config file {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for ridetime operations
pub type Result<T> = std::result::Result<T, RideTimeError>;

impl RideTimeError {
    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RideTimeError::Track(TrackError::FileNotFound { path }) => {
                format!("Could not find track file: {}", path.display())
            }
            RideTimeError::Track(TrackError::Parse { format, reason }) => {
                format!("Track file is not valid {}: {}", format, reason)
            }
            RideTimeError::Track(TrackError::UnsupportedFormat { path }) => {
                format!(
                    "Don't know how to read {}. Supported formats: GPX.",
                    path.display()
                )
            }
            RideTimeError::Config(ConfigError::InvalidParameter {
                parameter, reason, ..
            }) => {
                format!("Model setting '{}' is invalid: {}", parameter, reason)
            }
            _ => self.to_string(),
        }
    }
}
