use std::io::Write;

use super::{format_hhmm, percentage, ExportError, TrackReport};

/// Render a track report as plain text
pub fn render(report: &TrackReport) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_report(&mut buffer, report)?;
    String::from_utf8(buffer).map_err(|e| ExportError::SerializationError(e.to_string()))
}

/// Write the plain-text report
pub fn write_report<W: Write>(out: &mut W, report: &TrackReport) -> Result<(), ExportError> {
    let stats = &report.stats;
    let options = &report.options;

    writeln!(out, "distance: {:.2}km", stats.total_distance_km())?;
    if options.show_elevation {
        writeln!(out, "elevation gain: {:.0}m", stats.elevation_gain_meters)?;
        writeln!(out, "elevation loss: {:.0}m", stats.elevation_loss_meters)?;
    }
    writeln!(out)?;

    let total = stats.total_time_seconds;
    writeln!(out, "time: {}", format_hhmm(total))?;
    write_share(out, "pain", stats.pain_time_seconds, total, options.show_percentages)?;
    if options.show_free {
        write_share(out, "free", stats.free_time_seconds, total, options.show_percentages)?;
    }

    if options.show_breakpoints {
        writeln!(out)?;
        writeln!(out, "breakpoints:")?;
        // The first entry is the (0, 0) seed
        for breakpoint in stats.breakpoints.iter().skip(1) {
            writeln!(
                out,
                "{} -- {:.2}km",
                format_hhmm(breakpoint.time_seconds),
                breakpoint.distance_meters / 1000.0
            )?;
        }
    }

    Ok(())
}

fn write_share<W: Write>(
    out: &mut W,
    label: &str,
    seconds: f64,
    total: f64,
    show_percentage: bool,
) -> Result<(), ExportError> {
    if show_percentage {
        writeln!(
            out,
            "{}: {} ({:.1}%)",
            label,
            format_hhmm(seconds),
            percentage(seconds, total)
        )?;
    } else {
        writeln!(out, "{}: {}", label, format_hhmm(seconds))?;
    }
    Ok(())
}
