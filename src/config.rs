//! Model and application configuration
//!
//! `ModelConfig` holds every constant the speed model needs. It is built
//! explicitly (from a preset, a TOML file or CLI overrides) and passed by
//! reference into the segment model and aggregator, so several riders or
//! bikes can be modelled in one process.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// How pain time is counted against `pain_speed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PainComparison {
    /// Velocity at or below the pain speed counts
    AtOrBelow,
    /// Only velocity pinned exactly at the pain speed counts
    Exact,
}

impl PainComparison {
    pub fn is_pain(&self, velocity_kph: f64, pain_speed_kph: f64) -> bool {
        match self {
            PainComparison::AtOrBelow => velocity_kph <= pain_speed_kph,
            PainComparison::Exact => velocity_kph == pain_speed_kph,
        }
    }
}

/// Environmental constants used in the power balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,

    /// Air density (kg/m³); varies with altitude and temperature in reality
    pub air_density: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            air_density: 1.225,
        }
    }
}

/// Rider, bike and accounting parameters for the speed model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Sustained rider power output (watts)
    pub power: f64,

    /// Rider plus bike mass (kg)
    pub rider_weight: f64,

    /// Drag coefficient times frontal area, CdA (m²)
    pub drag_coefficient: f64,

    /// Rolling resistance coefficient, Crr
    pub rolling_resistance: f64,

    /// Fraction of power lost in the drivetrain, in [0, 1)
    pub drivetrain_loss: f64,

    /// Speed (kph) at or below which the rider is struggling
    pub pain_speed: f64,

    /// Artificial minimum speed (kph). Letting the model go below
    /// `pain_speed` weights steep climbs more heavily without producing
    /// absurd durations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_floor: Option<f64>,

    /// Coasting speed (kph); velocities are capped here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_speed: Option<f64>,

    /// Record a progress marker every this many seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakpoint_interval_seconds: Option<f64>,

    /// Accumulate elevation gain and loss
    #[serde(default)]
    pub track_elevation_stats: bool,

    pub pain_comparison: PainComparison,

    #[serde(default)]
    pub physics: PhysicalConstants,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::detailed()
    }
}

impl ModelConfig {
    const DEFAULT_POWER: f64 = 120.0;
    const DEFAULT_WEIGHT: f64 = 80.0;
    const DEFAULT_CDA: f64 = 0.5;
    const DEFAULT_CRR: f64 = 0.008;
    const DEFAULT_DTLOSS: f64 = 0.05;

    /// Full accounting: elevation, pain floor, free speed and hourly breakpoints
    pub fn detailed() -> Self {
        Self {
            power: Self::DEFAULT_POWER,
            rider_weight: Self::DEFAULT_WEIGHT,
            drag_coefficient: Self::DEFAULT_CDA,
            rolling_resistance: Self::DEFAULT_CRR,
            drivetrain_loss: Self::DEFAULT_DTLOSS,
            pain_speed: 6.0,
            pain_floor: Some(3.0),
            free_speed: Some(40.0),
            breakpoint_interval_seconds: Some(3600.0),
            track_elevation_stats: true,
            pain_comparison: PainComparison::AtOrBelow,
            physics: PhysicalConstants::default(),
        }
    }

    /// Pain speed floor only; pain counts only when pinned at the floor
    pub fn minimal() -> Self {
        Self {
            power: Self::DEFAULT_POWER,
            rider_weight: Self::DEFAULT_WEIGHT,
            drag_coefficient: Self::DEFAULT_CDA,
            rolling_resistance: Self::DEFAULT_CRR,
            drivetrain_loss: Self::DEFAULT_DTLOSS,
            pain_speed: 7.0,
            pain_floor: None,
            free_speed: None,
            breakpoint_interval_seconds: None,
            track_elevation_stats: false,
            pain_comparison: PainComparison::Exact,
            physics: PhysicalConstants::default(),
        }
    }

    /// Lowest velocity the model will report (kph)
    pub fn velocity_floor(&self) -> f64 {
        self.pain_floor.unwrap_or(self.pain_speed)
    }

    /// Highest velocity the model will report (kph)
    pub fn velocity_ceiling(&self) -> f64 {
        self.free_speed.unwrap_or(f64::INFINITY)
    }

    /// Reject parameter sets that would give a meaningless or unbounded solve
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("power", self.power)?;
        positive("rider_weight", self.rider_weight)?;
        positive("drag_coefficient", self.drag_coefficient)?;
        positive("physics.gravity", self.physics.gravity)?;
        positive("physics.air_density", self.physics.air_density)?;

        if !self.rolling_resistance.is_finite() || self.rolling_resistance < 0.0 {
            return Err(ConfigError::invalid(
                "rolling_resistance",
                self.rolling_resistance,
                "must be a non-negative number",
            ));
        }

        if !(0.0..1.0).contains(&self.drivetrain_loss) {
            return Err(ConfigError::invalid(
                "drivetrain_loss",
                self.drivetrain_loss,
                "must be a fraction in [0, 1)",
            ));
        }

        positive("pain_speed", self.pain_speed)?;

        if let Some(floor) = self.pain_floor {
            if !(floor > 0.0 && floor <= self.pain_speed) {
                return Err(ConfigError::invalid(
                    "pain_floor",
                    floor,
                    "must be positive and no greater than pain_speed",
                ));
            }
        }

        if let Some(free) = self.free_speed {
            if !free.is_finite() || free < self.pain_speed {
                return Err(ConfigError::invalid(
                    "free_speed",
                    free,
                    "must be finite and no lower than pain_speed",
                ));
            }
        }

        if let Some(interval) = self.breakpoint_interval_seconds {
            positive("breakpoint_interval_seconds", interval)?;
        }

        Ok(())
    }
}

fn positive(parameter: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            parameter,
            value,
            "must be a positive finite number",
        ))
    }
}

/// Output options for the rendered report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Show pain and free time as a share of total time
    pub show_percentages: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            show_percentages: true,
        }
    }
}

/// Built-in configuration presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Detailed,
    Minimal,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detailed" => Ok(Mode::Detailed),
            "minimal" => Ok(Mode::Minimal),
            _ => Err(format!("Invalid mode: {}", s)),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Speed model parameters
    pub model: ModelConfig,

    /// Report rendering options
    #[serde(default)]
    pub report: ReportSettings,
}

impl AppConfig {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Detailed => AppConfig {
                model: ModelConfig::detailed(),
                report: ReportSettings {
                    show_percentages: true,
                },
            },
            Mode::Minimal => AppConfig {
                model: ModelConfig::minimal(),
                report: ReportSettings {
                    show_percentages: false,
                },
            },
        }
    }

    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.model.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_error = |reason: String| ConfigError::Write {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }

        let toml_content = toml::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        fs::write(path, toml_content).map_err(|e| write_error(e.to_string()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ridetime")
            .join("config.toml")
    }

    /// Pick the configuration for a run.
    ///
    /// An explicit file wins. An explicit mode selects its preset. Otherwise
    /// the default file is used when it exists, else the detailed preset.
    pub fn resolve(explicit: Option<&Path>, mode: Option<Mode>) -> Result<Self, ConfigError> {
        Self::resolve_with_default(explicit, mode, &Self::default_config_path())
    }

    fn resolve_with_default(
        explicit: Option<&Path>,
        mode: Option<Mode>,
        default_path: &Path,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if let Some(mode) = mode {
                tracing::info!(?mode, path = %path.display(), "Config file replaces the mode preset");
            }
            return Self::load_from_file(path);
        }

        if let Some(mode) = mode {
            if default_path.is_file() {
                tracing::info!(?mode, path = %default_path.display(), "Mode given, skipping default config file");
            }
            return Ok(Self::for_mode(mode));
        }

        if default_path.is_file() {
            tracing::info!(path = %default_path.display(), "Using default config file");
            return Self::load_from_file(default_path);
        }

        Ok(Self::for_mode(Mode::Detailed))
    }
}
