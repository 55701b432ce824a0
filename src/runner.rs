//! Scenario runner: builds the configured model, simulates it, and analyses the result.

use crate::building::{Cuboid, Heater, OutdoorEnvironment};
use crate::config::{ConfigError, ModelKind, ScenarioConfig};
use crate::sim::analysis::{
    AnalysisError, SteadyStateAnalysis, SteadyStateSearch, analyse_steady_state,
};
use crate::sim::engine::SimulationError;
use crate::sim::grid::evenly_spaced;
use crate::sim::kpi::ThermalSummary;
use crate::sim::model::{Factory, NdFactory, ThermalModel};
use crate::sim::types::{SimulationVariant, Trajectory, VariantError};

/// Anything that stops a scenario from producing results.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{} invalid configuration field(s): {}", .0.len(), join_errors(.0))]
    Config(Vec<ConfigError>),

    #[error(transparent)]
    Variant(#[from] VariantError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("steady-state analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Model built from a scenario, before any simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioModel {
    NonDimensional(NdFactory),
    Dimensional(Factory),
}

impl ScenarioModel {
    /// Builds the configured model with the heater state `variant` starts in.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Config`] for an unknown model kind.
    pub fn from_config(
        config: &ScenarioConfig,
        variant: SimulationVariant,
    ) -> Result<Self, RunError> {
        let heated = variant.heater_starts_on();

        match config.model_kind() {
            Some(ModelKind::NonDimensional) => {
                let nd = &config.nondimensional;
                Ok(Self::NonDimensional(
                    NdFactory::new(
                        nd.initial_temp,
                        nd.mu,
                        nd.epsilon,
                        nd.env_mean_temp,
                        nd.env_temp_half_width,
                        heated,
                    )
                    .with_angular_frequency(nd.angular_frequency),
                ))
            }
            Some(ModelKind::Dimensional) => {
                let d = &config.dimensional;
                Ok(Self::Dimensional(Factory::new(
                    d.initial_temp,
                    Cuboid::new(d.length, d.width, d.height),
                    d.material,
                    Heater::with_state(d.heat_output_rate, heated),
                    OutdoorEnvironment::new(d.outdoor_mean_temp, d.outdoor_half_range),
                    d.wall_thickness,
                )))
            }
            None => Err(RunError::Config(vec![ConfigError {
                field: "simulation.model".to_string(),
                message: format!("unknown model \"{}\"", config.simulation.model),
            }])),
        }
    }
}

/// Everything a scenario run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub variant: SimulationVariant,
    pub trajectory: Trajectory,
    pub summary: ThermalSummary,
    /// Present when the analysis is enabled in the scenario.
    pub analysis: Option<SteadyStateAnalysis>,
}

/// Heated and non-heated runs of the same factory on the same grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub heated: RunResult,
    pub unheated: RunResult,
}

impl Comparison {
    /// Final indoor temperature of the heated run minus the non-heated one.
    pub fn final_temperature_gap(&self) -> f64 {
        self.heated.summary.final_temperature - self.unheated.summary.final_temperature
    }
}

/// Validates `config` and returns the variant it selects.
fn validated_variant(config: &ScenarioConfig) -> Result<SimulationVariant, RunError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(RunError::Config(errors));
    }
    Ok(config.simulation.variant.parse()?)
}

fn run_variant(
    config: &ScenarioConfig,
    variant: SimulationVariant,
) -> Result<RunResult, RunError> {
    match ScenarioModel::from_config(config, variant)? {
        ScenarioModel::NonDimensional(model) => run_model(model, variant, config),
        ScenarioModel::Dimensional(model) => run_model(model, variant, config),
    }
}

/// Validates `config`, simulates the selected variant and, if enabled,
/// runs the steady-state analysis.
///
/// # Errors
///
/// Returns [`RunError::Config`] with every validation failure, or the first
/// simulation or analysis error.
pub fn run_scenario(config: &ScenarioConfig) -> Result<RunResult, RunError> {
    let variant = validated_variant(config)?;
    run_variant(config, variant)
}

/// Runs the configured factory twice, heater on throughout and heater off
/// throughout, ignoring the configured variant and toggle times.
///
/// # Errors
///
/// Same as [`run_scenario`].
pub fn run_comparison(config: &ScenarioConfig) -> Result<Comparison, RunError> {
    validated_variant(config)?;
    let heated = run_variant(config, SimulationVariant::Heated)?;
    let unheated = run_variant(config, SimulationVariant::NonHeated)?;
    log::info!(
        "heated run ends {:.4} above the non-heated run",
        heated.summary.final_temperature - unheated.summary.final_temperature
    );
    Ok(Comparison { heated, unheated })
}

/// Runs an already-built model under the scenario's grid, toggles and analysis settings.
///
/// The analysis starts from the same initial state as the simulation.
///
/// # Errors
///
/// Returns the first simulation or analysis error.
pub fn run_model<M: ThermalModel + Clone>(
    model: M,
    variant: SimulationVariant,
    config: &ScenarioConfig,
) -> Result<RunResult, RunError> {
    let s = &config.simulation;
    let grid = evenly_spaced(s.start, s.end, s.step);
    let toggles = if variant.uses_schedule() {
        if s.toggle_times.is_empty() {
            log::warn!("toggled variant without toggle times; heater stays off");
        }
        s.toggle_times.clone()
    } else {
        Vec::new()
    };

    let initial = model.clone();
    let mut model = model;
    let trajectory = model.simulate(&grid, Some(&toggles[..]))?;
    let summary = ThermalSummary::from_trajectory(&trajectory);
    log::info!(
        "{variant} run: {} steps, final temperature {:.4}, heater duty {:.1}%",
        summary.steps,
        summary.final_temperature,
        summary.heater_duty * 100.0
    );

    let analysis = if config.analysis.enabled {
        let search = SteadyStateSearch::new(s.start, s.end, s.step)
            .with_max_retries(config.analysis.max_retries)
            .with_toggles(toggles);
        Some(analyse_steady_state(&initial, &search)?)
    } else {
        None
    };

    Ok(RunResult {
        variant,
        trajectory,
        summary,
        analysis,
    })
}
