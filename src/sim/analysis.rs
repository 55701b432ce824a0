//! Steady-state detection and extremum pairing on simulated series.
//!
//! Turning points of the indoor temperature are located where consecutive
//! per-step deltas change sign. The first such point marks the steady state;
//! later ones are paired with the analytic extrema of the outdoor driver to
//! measure how far the building lags and how much it damps the cycle.

use std::fmt;

use crate::building::{Extremum, ExtremumKind};

use super::engine::SimulationError;
use super::grid::evenly_spaced;
use super::model::ThermalModel;
use super::types::Trajectory;

/// `true` when `a` and `b` have opposite signs or either is zero.
pub fn sign_change(a: f64, b: f64) -> bool {
    (a <= 0.0 && b >= 0.0) || (a >= 0.0 && b <= 0.0)
}

/// Index of the second element of the first adjacent pair that changes sign.
///
/// A zero on either side of a pair counts as a change. Returns `None` if no
/// pair qualifies.
///
/// # Examples
///
/// ```
/// use factory_sim::sim::analysis::index_of_sign_change;
///
/// assert_eq!(index_of_sign_change(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, -1.0]), Some(9));
/// assert_eq!(index_of_sign_change(&[1.0, 2.0, 3.0]), None);
/// assert_eq!(index_of_sign_change(&[0.0, -1.0]), Some(1));
/// ```
pub fn index_of_sign_change(values: &[f64]) -> Option<usize> {
    values
        .windows(2)
        .position(|w| sign_change(w[0], w[1]))
        .map(|i| i + 1)
}

/// Parameters of the steady-state search.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateSearch {
    /// First grid sample.
    pub start: f64,
    /// Initial end of the grid; extended by one driving period per retry.
    pub horizon: f64,
    /// Grid spacing.
    pub step: f64,
    /// Horizon extensions allowed before giving up.
    pub max_retries: usize,
    /// Heater toggle times applied on every attempt.
    pub toggles: Vec<f64>,
}

impl Default for SteadyStateSearch {
    fn default() -> Self {
        Self {
            start: 0.0,
            horizon: 1.0,
            step: 0.001,
            max_retries: 10,
            toggles: Vec::new(),
        }
    }
}

impl SteadyStateSearch {
    pub fn new(start: f64, horizon: f64, step: f64) -> Self {
        Self {
            start,
            horizon,
            step,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_toggles(mut self, toggles: Vec<f64>) -> Self {
        self.toggles = toggles;
        self
    }

    fn toggles(&self) -> Option<&[f64]> {
        (!self.toggles.is_empty()).then_some(self.toggles.as_slice())
    }
}

/// Failures of the steady-state analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error(
        "no steady oscillation found after {retries} horizon extensions (last horizon {horizon}); \
         the parameters likely preclude a steady state, e.g. epsilon too small or a divergent trajectory"
    )]
    SteadyStateNotFound { retries: usize, horizon: f64 },

    #[error("driving period {period} is not a positive finite number")]
    InvalidPeriod { period: f64 },

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// First turning point of a run and the run that exposed it.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyState {
    /// Index into the trajectory of the first turning point.
    pub index: usize,
    /// Time of the first turning point.
    pub time: f64,
    /// Horizon extensions needed.
    pub retries: usize,
    /// Horizon of the successful attempt.
    pub horizon: f64,
    pub trajectory: Trajectory,
}

/// Locates the first turning point of `model`'s temperature.
///
/// Each attempt simulates a fresh clone of `model` on
/// `[search.start, horizon]`. Without a sign change in the deltas the
/// horizon grows by one driving period, at most `search.max_retries` times.
///
/// # Errors
///
/// Returns [`AnalysisError::SteadyStateNotFound`] once the retries are
/// spent, [`AnalysisError::InvalidPeriod`] if the driver has no usable
/// period, and [`AnalysisError::Simulation`] for a degenerate grid.
pub fn find_steady_state<M: ThermalModel + Clone>(
    model: &M,
    search: &SteadyStateSearch,
) -> Result<SteadyState, AnalysisError> {
    let period = model.driver().period();
    if !(period.is_finite() && period > 0.0) {
        return Err(AnalysisError::InvalidPeriod { period });
    }

    let mut horizon = search.horizon;
    for retries in 0..=search.max_retries {
        let grid = evenly_spaced(search.start, horizon, search.step);
        let mut attempt = model.clone();
        let trajectory = attempt.simulate(&grid, search.toggles())?;

        if let Some(index) = index_of_sign_change(&trajectory.deltas) {
            let time = trajectory.times[index];
            log::debug!("steady state at t={time} (index {index}) after {retries} extensions");
            return Ok(SteadyState {
                index,
                time,
                retries,
                horizon,
                trajectory,
            });
        }

        if retries < search.max_retries {
            log::debug!("no turning point up to t={horizon}, extending by {period}");
            horizon += period;
        }
    }

    Err(AnalysisError::SteadyStateNotFound {
        retries: search.max_retries,
        horizon,
    })
}

/// Turning points of the trajectory, searching from index `from` onward.
///
/// After each hit the search resumes one sample past it, so a zero delta
/// sitting on a sample is reported once.
pub fn extract_extrema(trajectory: &Trajectory, from: usize) -> Vec<Extremum> {
    let deltas = &trajectory.deltas;
    let mut extrema = Vec::new();
    let mut offset = from;

    while offset < deltas.len() {
        let Some(found) = index_of_sign_change(&deltas[offset..]) else {
            break;
        };
        let index = offset + found;
        let rising = deltas[index - 1] > 0.0 || (deltas[index - 1] == 0.0 && deltas[index] < 0.0);
        extrema.push(Extremum {
            time: trajectory.times[index],
            temperature: trajectory.temperatures[index],
            kind: if rising {
                ExtremumKind::Peak
            } else {
                ExtremumKind::Trough
            },
        });
        offset = index + 1;
    }

    extrema
}

/// Mean absolute differences between index-paired extrema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagStatistics {
    /// Mean `|t_sim - t_ref|` over the pairs.
    pub mean_phase_difference: f64,
    /// Mean `|T_sim - T_ref|` over the pairs.
    pub mean_amplitude_difference: f64,
    /// Number of pairs, the length of the shorter sequence.
    pub pairs: usize,
}

impl LagStatistics {
    /// Pairs `simulated[i]` with `reference[i]`; zero pairs give zero means.
    pub fn from_pairs(simulated: &[Extremum], reference: &[Extremum]) -> Self {
        let pairs = simulated.len().min(reference.len());
        if pairs == 0 {
            return Self {
                mean_phase_difference: 0.0,
                mean_amplitude_difference: 0.0,
                pairs,
            };
        }

        let (phase_sum, amplitude_sum) = simulated
            .iter()
            .zip(reference)
            .fold((0.0, 0.0), |(p, a), (s, r)| {
                (
                    p + (s.time - r.time).abs(),
                    a + (s.temperature - r.temperature).abs(),
                )
            });

        Self {
            mean_phase_difference: phase_sum / pairs as f64,
            mean_amplitude_difference: amplitude_sum / pairs as f64,
            pairs,
        }
    }
}

/// Steady state plus the comparison of indoor and outdoor extrema.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateAnalysis {
    pub steady_state: SteadyState,
    /// Indoor turning points after the steady state.
    pub simulated_extrema: Vec<Extremum>,
    /// Outdoor extrema, starting with the last one at or before the first
    /// indoor turning point.
    pub outdoor_extrema: Vec<Extremum>,
    pub lag: LagStatistics,
}

impl SteadyStateAnalysis {
    pub fn steady_state_time(&self) -> f64 {
        self.steady_state.time
    }

    pub fn mean_phase_difference(&self) -> f64 {
        self.lag.mean_phase_difference
    }

    pub fn mean_amplitude_difference(&self) -> f64 {
        self.lag.mean_amplitude_difference
    }
}

impl fmt::Display for SteadyStateAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Steady State ---")?;
        writeln!(f, "Steady state time:          {:.6}", self.steady_state.time)?;
        writeln!(f, "Horizon extensions:         {}", self.steady_state.retries)?;
        writeln!(f, "Indoor turning points:      {}", self.simulated_extrema.len())?;
        writeln!(f, "Paired extrema:             {}", self.lag.pairs)?;
        writeln!(
            f,
            "Mean phase difference:      {:.6}",
            self.lag.mean_phase_difference
        )?;
        write!(
            f,
            "Mean amplitude difference:  {:.6}",
            self.lag.mean_amplitude_difference
        )
    }
}

/// Finds the steady state, then pairs later indoor extrema with the
/// outdoor driver's extrema.
///
/// # Errors
///
/// Propagates every [`find_steady_state`] error.
pub fn analyse_steady_state<M: ThermalModel + Clone>(
    model: &M,
    search: &SteadyStateSearch,
) -> Result<SteadyStateAnalysis, AnalysisError> {
    let steady_state = find_steady_state(model, search)?;
    let simulated_extrema = extract_extrema(&steady_state.trajectory, steady_state.index + 1);

    let outdoor_extrema = match simulated_extrema.first() {
        Some(first) => model
            .driver()
            .extrema_since(first.time, steady_state.trajectory.end_time),
        None => Vec::new(),
    };

    let lag = LagStatistics::from_pairs(&simulated_extrema, &outdoor_extrema);
    log::info!(
        "steady state at t={:.4}: {} pairs, mean phase difference {:.4}, mean amplitude difference {:.4}",
        steady_state.time,
        lag.pairs,
        lag.mean_phase_difference,
        lag.mean_amplitude_difference
    );

    Ok(SteadyStateAnalysis {
        steady_state,
        simulated_extrema,
        outdoor_extrema,
        lag,
    })
}
