//! End-to-end tests: GPX file on disk through to the rendered report

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

use ridetime::config::{AppConfig, Mode};
use ridetime::export::{json, text};
use ridetime::{estimate_file, RideTimeError, TrackError};

fn gpx_document(tracks: &[Vec<Vec<(f64, f64, Option<f64>)>>]) -> String {
    let mut doc = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="ridetime-tests" xmlns="http://www.topografix.com/GPX/1/1">
"#,
    );
    for segments in tracks {
        doc.push_str("<trk>\n");
        for points in segments {
            doc.push_str("<trkseg>\n");
            for (lat, lon, ele) in points {
                match ele {
                    Some(ele) => doc.push_str(&format!(
                        "<trkpt lat=\"{}\" lon=\"{}\"><ele>{}</ele></trkpt>\n",
                        lat, lon, ele
                    )),
                    None => doc.push_str(&format!("<trkpt lat=\"{}\" lon=\"{}\"></trkpt>\n", lat, lon)),
                }
            }
            doc.push_str("</trkseg>\n");
        }
        doc.push_str("</trk>\n");
    }
    doc.push_str("</gpx>\n");
    doc
}

fn write_gpx(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Points along the equator, `step` degrees of longitude apart
fn equator_points(count: usize, step: f64) -> Vec<(f64, f64, Option<f64>)> {
    (0..count).map(|i| (0.0, i as f64 * step, Some(0.0))).collect()
}

#[test]
fn test_detailed_estimate_of_long_flat_ride() {
    let dir = TempDir::new().unwrap();
    // 0.01° at the equator is roughly 1.11 km; 60 steps is about 67 km
    let path = write_gpx(&dir, "flat.gpx", &gpx_document(&[vec![equator_points(61, 0.01)]]));

    let report = estimate_file(&path, &AppConfig::for_mode(Mode::Detailed))
        .unwrap()
        .unwrap();
    let stats = &report.stats;

    assert!((stats.total_distance_km() - 66.79).abs() < 0.05, "{}", stats.total_distance_km());
    assert!((stats.average_speed_kph() - 22.5).abs() < 0.05);
    assert_eq!(stats.pain_time_seconds, 0.0);
    assert_eq!(stats.free_time_seconds, 0.0);

    let last = stats.breakpoints.last().unwrap();
    assert_eq!(last.distance_meters, stats.total_distance_meters);
    assert_eq!(last.time_seconds, stats.total_time_seconds);
    assert_eq!(stats.breakpoints.len(), 4);

    let output = text::render(&report).unwrap();
    assert!(output.starts_with("distance: 66.7"));
    assert!(output.contains("elevation gain: 0m"));
    assert!(output.contains("pain: 00h00m (0.0%)"));
    assert!(output.contains("breakpoints:\n01h"));
}

#[test]
fn test_minimal_mode_steep_climb_is_pinned_pain() {
    let dir = TempDir::new().unwrap();
    // ~111 m north with a 30 m climb
    let points = vec![(0.0, 0.0, Some(100.0)), (0.001, 0.0, Some(130.0))];
    let path = write_gpx(&dir, "wall.gpx", &gpx_document(&[vec![points]]));

    let report = estimate_file(&path, &AppConfig::for_mode(Mode::Minimal))
        .unwrap()
        .unwrap();
    let stats = &report.stats;

    assert_eq!(stats.pain_time_seconds, stats.total_time_seconds);
    let expected = 3.6 * stats.total_distance_meters / 7.0;
    assert!((stats.total_time_seconds - expected).abs() < 1e-6);
    assert_eq!(stats.elevation_gain_meters, 0.0);
    assert!(stats.breakpoints.is_empty());

    let output = text::render(&report).unwrap();
    assert!(!output.contains('%'));
    assert!(!output.contains("free:"));
    assert!(!output.contains("breakpoints:"));
}

#[test]
fn test_only_first_track_is_estimated() {
    let dir = TempDir::new().unwrap();
    let doc = gpx_document(&[
        vec![equator_points(2, 0.01)],
        vec![equator_points(50, 0.01)],
    ]);
    let path = write_gpx(&dir, "two.gpx", &doc);

    let report = estimate_file(&path, &AppConfig::default()).unwrap().unwrap();
    assert!(report.stats.total_distance_km() < 1.2);
}

#[test]
fn test_duplicate_points_do_not_change_estimate() {
    let dir = TempDir::new().unwrap();
    let clean = vec![
        (45.0, 6.0, Some(500.0)),
        (45.002, 6.001, Some(520.0)),
        (45.004, 6.003, Some(505.0)),
    ];
    let mut noisy = clean.clone();
    noisy.insert(2, clean[1]);

    let config = AppConfig::default();
    let a = estimate_file(&write_gpx(&dir, "a.gpx", &gpx_document(&[vec![clean]])), &config)
        .unwrap()
        .unwrap();
    let b = estimate_file(&write_gpx(&dir, "b.gpx", &gpx_document(&[vec![noisy]])), &config)
        .unwrap()
        .unwrap();

    assert_eq!(a.stats, b.stats);
}

#[test]
fn test_missing_elevation_counts_as_flat() {
    let dir = TempDir::new().unwrap();
    let points = vec![(0.0, 0.0, None), (0.0, 0.01, None)];
    let path = write_gpx(&dir, "noele.gpx", &gpx_document(&[vec![points]]));

    let report = estimate_file(&path, &AppConfig::default()).unwrap().unwrap();
    assert_eq!(report.stats.elevation_gain_meters, 0.0);
    assert_eq!(report.stats.elevation_loss_meters, 0.0);
    assert!(report.stats.total_distance_meters > 1000.0);
}

#[test]
fn test_empty_track_renders_zero_percentages() {
    let dir = TempDir::new().unwrap();
    let path = write_gpx(&dir, "empty.gpx", &gpx_document(&[vec![vec![]]]));

    let report = estimate_file(&path, &AppConfig::default()).unwrap().unwrap();
    assert_eq!(report.stats.total_time_seconds, 0.0);

    let output = text::render(&report).unwrap();
    assert!(output.contains("time: 00h00m"));
    assert!(output.contains("pain: 00h00m (0.0%)"));

    let value: serde_json::Value = serde_json::from_str(&json::render(&report).unwrap()).unwrap();
    assert_eq!(value["pain_percent"], 0.0);
}

#[test]
fn test_file_without_tracks() {
    let dir = TempDir::new().unwrap();
    let path = write_gpx(&dir, "none.gpx", &gpx_document(&[]));

    assert!(estimate_file(&path, &AppConfig::default()).unwrap().is_none());
}

#[test]
fn test_malformed_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_gpx(&dir, "broken.gpx", "<gpx version=\"1.1\"><trk><trkseg><trkpt lat=");

    let result = estimate_file(&path, &AppConfig::default());
    assert!(matches!(
        result,
        Err(RideTimeError::Track(TrackError::Parse { .. }))
    ));
}

#[test]
fn test_non_finite_elevation_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut points = equator_points(3, 0.01);
    points[0].2 = Some(f64::NAN);
    let path = write_gpx(&dir, "nan.gpx", &gpx_document(&[vec![points]]));

    let result = estimate_file(&path, &AppConfig::default());
    assert!(matches!(
        result,
        Err(RideTimeError::Track(TrackError::Parse { .. }))
    ));
}

#[test]
fn test_missing_file_is_fatal() {
    let result = estimate_file(
        std::path::Path::new("/nonexistent/route.gpx"),
        &AppConfig::default(),
    );
    assert!(matches!(
        result,
        Err(RideTimeError::Track(TrackError::FileNotFound { .. }))
    ));
}

#[test]
fn test_invalid_model_is_rejected_before_import() {
    let mut config = AppConfig::default();
    config.model.power = -5.0;

    let result = estimate_file(std::path::Path::new("/nonexistent/route.gpx"), &config);
    assert!(matches!(result, Err(RideTimeError::Config(_))));
}

#[test]
fn test_config_file_drives_estimate() {
    let dir = TempDir::new().unwrap();
    let path = write_gpx(&dir, "flat.gpx", &gpx_document(&[vec![equator_points(3, 0.01)]]));

    let config_path = dir.path().join("config.toml");
    let mut strong = AppConfig::for_mode(Mode::Detailed);
    strong.model.power = 250.0;
    strong.save_to_file(&config_path).unwrap();

    let loaded = AppConfig::resolve(Some(&config_path), Some(Mode::Minimal)).unwrap();
    let fast = estimate_file(&path, &loaded).unwrap().unwrap();
    let slow = estimate_file(&path, &AppConfig::default()).unwrap().unwrap();

    assert!(fast.stats.total_time_seconds < slow.stats.total_time_seconds);
    assert_eq!(fast.stats.total_distance_meters, slow.stats.total_distance_meters);
}

fn ridetime_command(home: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ridetime"));
    command.env("HOME", home.path()).env_remove("RUST_LOG");
    command
}

#[test]
fn test_cli_writes_log_file() {
    let dir = TempDir::new().unwrap();
    let path = write_gpx(&dir, "flat.gpx", &gpx_document(&[vec![equator_points(3, 0.01)]]));
    let log_path = dir.path().join("logs").join("ridetime.log");

    let output = ridetime_command(&dir)
        .arg(&path)
        .arg("-vv")
        .arg("--log-file")
        .arg(&log_path)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("distance: "));

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Track aggregated"), "log was {:?}", log);
    for line in log.lines() {
        serde_json::from_str::<serde_json::Value>(line).unwrap();
    }
}

#[test]
fn test_cli_mode_flag_beats_default_config_file() {
    let dir = TempDir::new().unwrap();
    let path = write_gpx(&dir, "flat.gpx", &gpx_document(&[vec![equator_points(3, 0.01)]]));
    AppConfig::for_mode(Mode::Detailed)
        .save_to_file(dir.path().join(".ridetime").join("config.toml"))
        .unwrap();

    let minimal = ridetime_command(&dir)
        .arg(&path)
        .args(["--mode", "minimal"])
        .output()
        .unwrap();
    assert!(minimal.status.success());
    assert!(!String::from_utf8_lossy(&minimal.stdout).contains("free:"));

    let from_file = ridetime_command(&dir).arg(&path).output().unwrap();
    assert!(from_file.status.success());
    assert!(String::from_utf8_lossy(&from_file.stdout).contains("free:"));
}
