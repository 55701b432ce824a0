//! Post-hoc summary statistics of a simulated trajectory.

use std::fmt;

use super::types::Trajectory;

/// Aggregate indicators derived from a complete run.
///
/// Computed post-hoc from a [`Trajectory`] so the reported figures always
/// agree with the exported series.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalSummary {
    /// Number of integration steps.
    pub steps: usize,
    /// Lowest recorded indoor temperature.
    pub min_temperature: f64,
    /// Highest recorded indoor temperature.
    pub max_temperature: f64,
    /// Time-weighted mean indoor temperature.
    pub mean_temperature: f64,
    /// Temperature at the last grid sample.
    pub final_temperature: f64,
    /// Time-weighted mean outdoor temperature.
    pub mean_outdoor_temperature: f64,
    /// Fraction of simulated time the heater was on (0.0 to 1.0).
    pub heater_duty: f64,
    /// Heater toggles applied during the run.
    pub toggles_applied: usize,
}

impl ThermalSummary {
    /// Computes all indicators from a trajectory.
    ///
    /// Step durations come from consecutive sample times, the last one
    /// ending at `trajectory.end_time`.
    pub fn from_trajectory(trajectory: &Trajectory) -> Self {
        if trajectory.is_empty() {
            return Self {
                steps: 0,
                min_temperature: 0.0,
                max_temperature: 0.0,
                mean_temperature: 0.0,
                final_temperature: trajectory.final_temperature,
                mean_outdoor_temperature: 0.0,
                heater_duty: 0.0,
                toggles_applied: trajectory.toggles_applied,
            };
        }

        let mut min_t = f64::INFINITY;
        let mut max_t = f64::NEG_INFINITY;
        let mut weighted_sum = 0.0_f64;
        let mut outdoor_weighted_sum = 0.0_f64;
        let mut heated_time = 0.0_f64;
        let mut total_time = 0.0_f64;

        for (i, record) in trajectory.records().enumerate() {
            let next_time = trajectory
                .times
                .get(i + 1)
                .copied()
                .unwrap_or(trajectory.end_time);
            let dt = next_time - record.time;

            min_t = min_t.min(record.temperature);
            max_t = max_t.max(record.temperature);
            weighted_sum += record.temperature * dt;
            outdoor_weighted_sum += record.outdoor_temperature * dt;
            if record.heater_on {
                heated_time += dt;
            }
            total_time += dt;
        }

        let (mean_temperature, mean_outdoor_temperature, heater_duty) = if total_time > 0.0 {
            (
                weighted_sum / total_time,
                outdoor_weighted_sum / total_time,
                heated_time / total_time,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        Self {
            steps: trajectory.len(),
            min_temperature: min_t,
            max_temperature: max_t,
            mean_temperature,
            final_temperature: trajectory.final_temperature,
            mean_outdoor_temperature,
            heater_duty,
            toggles_applied: trajectory.toggles_applied,
        }
    }
}

impl fmt::Display for ThermalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(f, "Steps:                      {}", self.steps)?;
        writeln!(f, "Min indoor temperature:     {:.6}", self.min_temperature)?;
        writeln!(f, "Max indoor temperature:     {:.6}", self.max_temperature)?;
        writeln!(f, "Mean indoor temperature:    {:.6}", self.mean_temperature)?;
        writeln!(f, "Final indoor temperature:   {:.6}", self.final_temperature)?;
        writeln!(f, "Mean outdoor temperature:   {:.6}", self.mean_outdoor_temperature)?;
        writeln!(f, "Heater duty:                {:.1}%", self.heater_duty * 100.0)?;
        write!(f, "Heater toggles:             {}", self.toggles_applied)
    }
}
