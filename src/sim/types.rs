//! Core simulation types: run variants, per-step records, and trajectories.

use std::fmt;
use std::str::FromStr;

/// Which heater regime a run uses.
///
/// # Examples
///
/// ```
/// use factory_sim::sim::types::SimulationVariant;
///
/// let v: SimulationVariant = "non-heated".parse().expect("known variant");
/// assert_eq!(v, SimulationVariant::NonHeated);
/// assert!("boosted".parse::<SimulationVariant>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationVariant {
    /// Heater on for the whole run, no toggles.
    Heated,
    /// Heater starts off and follows the toggle schedule.
    Toggled,
    /// Heater off for the whole run, no toggles.
    NonHeated,
}

impl SimulationVariant {
    pub const NAMES: &[&str] = &["heated", "toggled", "non-heated"];

    pub fn name(self) -> &'static str {
        match self {
            Self::Heated => "heated",
            Self::Toggled => "toggled",
            Self::NonHeated => "non-heated",
        }
    }

    /// Initial heater state for the variant.
    pub fn heater_starts_on(self) -> bool {
        matches!(self, Self::Heated)
    }

    /// Whether the variant consults a toggle schedule.
    pub fn uses_schedule(self) -> bool {
        matches!(self, Self::Toggled)
    }
}

impl fmt::Display for SimulationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Requested simulation variant is not one of [`SimulationVariant::NAMES`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown simulation variant \"{requested}\", expected one of: heated, toggled, non-heated")]
pub struct VariantError {
    pub requested: String,
}

impl FromStr for SimulationVariant {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heated" => Ok(Self::Heated),
            "toggled" => Ok(Self::Toggled),
            "non-heated" | "nonheated" | "unheated" => Ok(Self::NonHeated),
            other => Err(VariantError {
                requested: other.to_string(),
            }),
        }
    }
}

/// Record of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    /// Step index.
    pub step: usize,
    /// Time at the start of the step.
    pub time: f64,
    /// Indoor temperature at the start of the step.
    pub temperature: f64,
    /// Outdoor (driving) temperature at the start of the step.
    pub outdoor_temperature: f64,
    /// Heater state used for the step, after any toggle at this time.
    pub heater_on: bool,
    /// Temperature change over the step.
    pub delta: f64,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "i={:>6} t={:>10.4} | indoor={:>10.5}  outdoor={:>10.5}  dT={:>+11.3e} | heater={}",
            self.step,
            self.time,
            self.temperature,
            self.outdoor_temperature,
            self.delta,
            if self.heater_on { "on" } else { "off" },
        )
    }
}

/// Output series of one run: one entry per step, i.e. one less than the
/// number of grid samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub times: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub outdoor_temperatures: Vec<f64>,
    pub heater_states: Vec<bool>,
    /// Quadrature delta per step.
    pub deltas: Vec<f64>,
    /// Time of the last grid sample (the endpoint without a step).
    pub end_time: f64,
    /// Temperature reached at `end_time`.
    pub final_temperature: f64,
    /// Heater toggles applied during the run.
    pub toggles_applied: usize,
}

impl Trajectory {
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            times: Vec::with_capacity(steps),
            temperatures: Vec::with_capacity(steps),
            outdoor_temperatures: Vec::with_capacity(steps),
            heater_states: Vec::with_capacity(steps),
            deltas: Vec::with_capacity(steps),
            ..Self::default()
        }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.times.push(record.time);
        self.temperatures.push(record.temperature);
        self.outdoor_temperatures.push(record.outdoor_temperature);
        self.heater_states.push(record.heater_on);
        self.deltas.push(record.delta);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Reassembles the record of step `i`.
    pub fn record(&self, i: usize) -> Option<StepRecord> {
        Some(StepRecord {
            step: i,
            time: *self.times.get(i)?,
            temperature: *self.temperatures.get(i)?,
            outdoor_temperature: *self.outdoor_temperatures.get(i)?,
            heater_on: *self.heater_states.get(i)?,
            delta: *self.deltas.get(i)?,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = StepRecord> + '_ {
        (0..self.len()).filter_map(|i| self.record(i))
    }

    /// `(time, indoor temperature)` pairs for display.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.temperatures.iter().copied())
    }

    /// `(time, outdoor temperature)` pairs for display.
    pub fn outdoor_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.outdoor_temperatures.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(step: usize) -> StepRecord {
        StepRecord {
            step,
            time: step as f64 * 0.5,
            temperature: 1.0 + step as f64,
            outdoor_temperature: 0.9,
            heater_on: step % 2 == 0,
            delta: 1.0,
        }
    }

    #[test]
    fn variant_names_round_trip() {
        for name in SimulationVariant::NAMES {
            let v: SimulationVariant = name.parse().expect("listed name parses");
            assert_eq!(v.name(), *name);
        }
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let err = "sometimes".parse::<SimulationVariant>().unwrap_err();
        assert_eq!(err.requested, "sometimes");
        assert!(err.to_string().contains("non-heated"));
    }

    #[test]
    fn only_heated_starts_on() {
        assert!(SimulationVariant::Heated.heater_starts_on());
        assert!(!SimulationVariant::Toggled.heater_starts_on());
        assert!(!SimulationVariant::NonHeated.heater_starts_on());
        assert!(SimulationVariant::Toggled.uses_schedule());
    }

    #[test]
    fn trajectory_records_round_trip_through_columns() {
        let mut trajectory = Trajectory::with_capacity(3);
        for i in 0..3 {
            trajectory.push(record(i));
        }
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.record(1), Some(record(1)));
        assert_eq!(trajectory.record(3), None);
        assert_eq!(trajectory.records().count(), 3);
        let points: Vec<_> = trajectory.points().collect();
        assert_eq!(points[2], (1.0, 3.0));
    }

    #[test]
    fn step_record_display_does_not_panic() {
        let s = format!("{}", record(4));
        assert!(s.contains("heater=on"));
    }
}
