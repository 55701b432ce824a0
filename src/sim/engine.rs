//! Simulation loop that steps a thermal model across a time grid.

use super::grid::step_count;
use super::model::ThermalModel;
use super::schedule::ToggleSchedule;
use super::types::{StepRecord, Trajectory};

/// Inputs the simulation loop refuses to run on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("time grid needs at least two samples, got {samples}")]
    GridTooShort { samples: usize },

    #[error("time grid must be strictly increasing, sample {index} is not")]
    NonIncreasingGrid { index: usize },

    #[error("toggle times must be non-decreasing, entry {index} is not")]
    UnorderedToggles { index: usize },
}

/// Simulation engine borrowing a model for the duration of one run.
///
/// The engine owns the toggle cursor; the model owns temperature and heater
/// state. Each step records the current state, applies a due toggle using
/// the step's start time, then integrates over `[grid[i], grid[i + 1]]`.
pub struct Engine<'a, M: ThermalModel + ?Sized> {
    model: &'a mut M,
    grid: &'a [f64],
    schedule: ToggleSchedule,
}

impl<'a, M: ThermalModel + ?Sized> Engine<'a, M> {
    /// Creates an engine over a validated grid.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::GridTooShort`] for fewer than two samples
    /// and [`SimulationError::NonIncreasingGrid`] if any sample does not
    /// exceed its predecessor.
    pub fn new(
        model: &'a mut M,
        grid: &'a [f64],
        schedule: ToggleSchedule,
    ) -> Result<Self, SimulationError> {
        if grid.len() < 2 {
            return Err(SimulationError::GridTooShort {
                samples: grid.len(),
            });
        }
        if let Some(i) = grid.windows(2).position(|w| !(w[0] < w[1])) {
            return Err(SimulationError::NonIncreasingGrid { index: i + 1 });
        }
        Ok(Self {
            model,
            grid,
            schedule,
        })
    }

    /// Number of steps the grid yields.
    pub fn steps(&self) -> usize {
        step_count(self.grid.len())
    }

    /// Executes step `i`; `i + 1` is in bounds for every `i < self.steps()`.
    fn step(&mut self, i: usize) -> StepRecord {
        let time = self.grid[i];
        let dt = self.grid[i + 1] - time;
        let temperature = self.model.temperature();

        if self.schedule.fire(time) {
            let on = self.model.heater_mut().toggle();
            log::trace!("t={time}: heater switched {}", if on { "on" } else { "off" });
        }

        let heater_on = self.model.heater().switched_on;
        let outdoor_temperature = self.model.outdoor_temperature(time);
        let delta = self.model.step(time, dt);

        StepRecord {
            step: i,
            time,
            temperature,
            outdoor_temperature,
            heater_on,
            delta,
        }
    }

    /// Executes every step and returns the collected trajectory.
    pub fn run(mut self) -> Trajectory {
        let steps = self.steps();
        log::debug!(
            "simulating {steps} steps over [{}, {}] with {} scheduled toggles",
            self.grid[0],
            self.grid[steps],
            self.schedule.len()
        );

        let mut trajectory = Trajectory::with_capacity(steps);
        for i in 0..steps {
            trajectory.push(self.step(i));
        }
        trajectory.end_time = self.grid[steps];
        trajectory.final_temperature = self.model.temperature();
        trajectory.toggles_applied = self.schedule.toggles_applied();
        trajectory
    }
}

/// Runs `model` across `grid`, flipping its heater at the given toggle times.
///
/// The trajectory has exactly `grid.len() - 1` entries. `None` and an empty
/// slice both mean no toggles.
///
/// # Errors
///
/// Returns a [`SimulationError`] for a grid shorter than two samples, a
/// grid that is not strictly increasing, or toggle times that decrease.
pub fn simulate<M: ThermalModel + ?Sized>(
    model: &mut M,
    grid: &[f64],
    toggles: Option<&[f64]>,
) -> Result<Trajectory, SimulationError> {
    let schedule = match toggles {
        Some(times) => ToggleSchedule::from_times(times.to_vec())?,
        None => ToggleSchedule::empty(),
    };
    Ok(Engine::new(model, grid, schedule)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::evenly_spaced;
    use crate::sim::model::NdFactory;

    fn drift_model(heated: bool) -> NdFactory {
        // ε = 0: pure drift at rate μ while heated.
        NdFactory::new(0.0, 1.0, 0.0, 1.0, 0.0, heated)
    }

    #[test]
    fn output_length_is_one_less_than_grid() {
        for n in [2, 3, 10, 1001] {
            let grid = evenly_spaced(0.0, 1.0, 1.0 / (n - 1) as f64);
            assert_eq!(grid.len(), n);
            let mut model = NdFactory::new(1.0, 1.0, 100.0, 1.0, 0.05, true);
            let trajectory = model.simulate(&grid, None).expect("valid grid");
            assert_eq!(trajectory.len(), n - 1);
            assert_eq!(trajectory.deltas.len(), n - 1);
        }
    }

    #[test]
    fn records_state_before_each_step() {
        let grid = [0.0, 1.0, 2.0, 3.0];
        let mut model = drift_model(true);
        let trajectory = model.simulate(&grid, None).expect("valid grid");
        assert_eq!(trajectory.temperatures, vec![0.0, 1.0, 2.0]);
        assert_eq!(trajectory.deltas, vec![1.0, 1.0, 1.0]);
        assert_eq!(trajectory.final_temperature, 3.0);
        assert_eq!(trajectory.end_time, 3.0);
    }

    #[test]
    fn variable_spacing_is_honoured() {
        let grid = [0.0, 0.5, 2.0];
        let mut model = drift_model(true);
        let trajectory = model.simulate(&grid, None).expect("valid grid");
        assert_eq!(trajectory.deltas, vec![0.5, 1.5]);
    }

    #[test]
    fn toggle_applies_to_the_step_that_reaches_it() {
        let grid = [0.0, 1.0, 2.0, 3.0, 4.0];
        let mut model = drift_model(false);
        let trajectory = model.simulate(&grid, Some(&[1.0, 3.0][..])).expect("valid");
        assert_eq!(trajectory.heater_states, vec![false, true, true, false]);
        assert_eq!(trajectory.deltas, vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(trajectory.toggles_applied, 2);
    }

    #[test]
    fn toggles_before_grid_start_fire_one_per_step() {
        let grid = [10.0, 11.0, 12.0, 13.0];
        let mut model = drift_model(false);
        let trajectory = model.simulate(&grid, Some(&[0.0, 1.0][..])).expect("valid");
        assert_eq!(trajectory.heater_states, vec![true, false, false]);
        assert!(!model.heater.switched_on);
    }

    #[test]
    fn final_heater_state_matches_toggle_parity() {
        let grid = evenly_spaced(0.0, 10.0, 0.1);
        for k in 0..6 {
            let toggles: Vec<f64> = (0..k).map(|j| 1.0 + j as f64).collect();
            for initial in [false, true] {
                let mut model = drift_model(initial);
                let trajectory = model.simulate(&grid, Some(&toggles[..])).expect("valid");
                assert_eq!(trajectory.toggles_applied, k);
                assert_eq!(model.heater.switched_on, initial ^ (k % 2 == 1));
            }
        }
    }

    #[test]
    fn toggles_beyond_horizon_never_fire() {
        let grid = [0.0, 1.0, 2.0];
        let mut model = drift_model(false);
        let trajectory = model.simulate(&grid, Some(&[5.0][..])).expect("valid");
        assert_eq!(trajectory.toggles_applied, 0);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let mut model = drift_model(false);
        assert_eq!(
            model.simulate(&[0.0], None),
            Err(SimulationError::GridTooShort { samples: 1 })
        );
        assert_eq!(
            model.simulate(&[0.0, 1.0, 1.0], None),
            Err(SimulationError::NonIncreasingGrid { index: 2 })
        );
        assert_eq!(
            model.simulate(&[0.0, 1.0], Some(&[2.0, 1.0][..])),
            Err(SimulationError::UnorderedToggles { index: 1 })
        );
    }

    #[test]
    fn identical_inputs_reproduce_identical_output() {
        let grid = evenly_spaced(0.0, 5.0, 0.01);
        let toggles = [0.5, 1.5, 2.5];
        let run = || {
            let mut model = NdFactory::new(1.0, 1.0, 3.0, 1.0, 0.05, false);
            model.simulate(&grid, Some(&toggles[..])).expect("valid")
        };
        assert_eq!(run(), run());
    }
}
