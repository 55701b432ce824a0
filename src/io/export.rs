//! CSV export of simulated trajectories.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::Trajectory;

/// Column header for CSV trajectory export.
const HEADER: &str = "step,time,indoor_temp,outdoor_temp,delta,heater_on";

/// Column header for heated vs. non-heated comparison export.
const COMPARISON_HEADER: &str = "step,time,heated_temp,unheated_temp,outdoor_temp";

/// Exports a trajectory to a CSV file at the given path.
///
/// Writes a header row followed by one data row per step. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `trajectory` - Complete simulated trajectory
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(trajectory: &Trajectory, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(trajectory, buf)
}

/// Writes a trajectory as CSV to any writer.
///
/// Temperatures and deltas keep full precision so the series can be
/// re-analysed downstream.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(trajectory: &Trajectory, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in trajectory.records() {
        wtr.write_record(&[
            r.step.to_string(),
            r.time.to_string(),
            r.temperature.to_string(),
            r.outdoor_temperature.to_string(),
            r.delta.to_string(),
            r.heater_on.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports heated and non-heated runs side by side to a CSV file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_comparison_csv(
    heated: &Trajectory,
    unheated: &Trajectory,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    write_comparison_csv(heated, unheated, io::BufWriter::new(file))
}

/// Writes heated and non-heated runs side by side, one row per step.
///
/// Both runs must share a grid; rows stop at the shorter trajectory.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_comparison_csv(
    heated: &Trajectory,
    unheated: &Trajectory,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(COMPARISON_HEADER.split(','))?;

    for (h, u) in heated.records().zip(unheated.records()) {
        wtr.write_record(&[
            h.step.to_string(),
            h.time.to_string(),
            h.temperature.to_string(),
            u.temperature.to_string(),
            h.outdoor_temperature.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
