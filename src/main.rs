use anyhow::Result;
use clap::Parser;
use colored::*;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use ridetime::config::{AppConfig, Mode};
use ridetime::export::{self, ExportFormat};
use ridetime::logging::{self, LogConfig, LogFormat, LogLevel};
use ridetime::RideTimeError;

/// ridetime - cycling route time estimator
///
/// Models the steady speed a rider holds at fixed power on every stretch of
/// a GPX track and reports total time, time spent struggling ("pain"),
/// time spent coasting ("free") and hourly progress markers.
#[derive(Parser)]
#[command(name = "ridetime")]
#[command(version)]
#[command(about = "Estimate cycling time over a GPX track", long_about = None)]
struct Cli {
    /// Track file to analyze (GPX)
    track: PathBuf,

    /// Model preset (detailed, minimal) [default: detailed]
    #[arg(short, long)]
    mode: Option<Mode>,

    /// TOML config file; replaces the preset entirely
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override rider power output (watts)
    #[arg(long)]
    power: Option<f64>,

    /// Override rider plus bike weight (kg)
    #[arg(long)]
    weight: Option<f64>,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: ExportFormat,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long, default_value = "compact")]
    log_format: LogFormat,

    /// Also write JSON logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Roll the log file daily
    #[arg(long, requires = "log_file")]
    log_rotate: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: LogLevel::from_verbosity(cli.verbose),
        format: cli.log_format,
        file_path: cli.log_file.clone(),
        rotation: cli.log_rotate,
    };
    if let Err(e) = logging::init_logging(&log_config) {
        eprintln!("{} {:#}", "warning:".yellow().bold(), e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<RideTimeError>() {
                Some(err) => err.user_message(),
                None => format!("{:#}", e),
            };
            eprintln!("{} {}", "error:".red().bold(), message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = AppConfig::resolve(cli.config.as_deref(), cli.mode)
        .map_err(RideTimeError::from)?;

    if let Some(power) = cli.power {
        config.model.power = power;
    }
    if let Some(weight) = cli.weight {
        config.model.rider_weight = weight;
    }

    let Some(report) = ridetime::estimate_file(&cli.track, &config)? else {
        tracing::warn!(path = %cli.track.display(), "Track file contains no tracks");
        return Ok(());
    };

    // Render fully before printing so a failure leaves no partial output
    let mut buffer = Vec::new();
    export::write_report(&mut buffer, &report, cli.format).map_err(RideTimeError::from)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(&buffer)?;
    handle.flush()?;

    Ok(())
}
