//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::building::ThermalConductivity;
use crate::sim::types::SimulationVariant;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Model selection, time grid and heater regime.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Parameters of the non-dimensional model.
    #[serde(default)]
    pub nondimensional: NonDimensionalConfig,
    /// Parameters of the dimensional model.
    #[serde(default)]
    pub dimensional: DimensionalConfig,
    /// Steady-state analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Which equation a scenario integrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    NonDimensional,
    Dimensional,
}

impl ModelKind {
    pub const NAMES: &[&str] = &["nondimensional", "dimensional"];

    fn parse(name: &str) -> Option<Self> {
        match name {
            "nondimensional" => Some(Self::NonDimensional),
            "dimensional" => Some(Self::Dimensional),
            _ => None,
        }
    }
}

/// Model selection, time grid and heater regime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Model: `"nondimensional"` or `"dimensional"`.
    pub model: String,
    /// Heater regime: `"heated"`, `"toggled"` or `"non-heated"`.
    pub variant: String,
    /// First grid sample.
    pub start: f64,
    /// Last grid sample (must be > start).
    pub end: f64,
    /// Grid spacing (must be > 0).
    pub step: f64,
    /// Heater toggle times for the toggled variant (non-decreasing).
    pub toggle_times: Vec<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            model: "nondimensional".to_string(),
            variant: "heated".to_string(),
            start: 0.0,
            end: 1.0,
            step: 0.001,
            toggle_times: Vec::new(),
        }
    }
}

/// Parameters of the non-dimensional model.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NonDimensionalConfig {
    /// Initial non-dimensional indoor temperature.
    pub initial_temp: f64,
    /// Heating strength μ.
    pub mu: f64,
    /// Coupling to the outdoors ε (>= 0).
    pub epsilon: f64,
    /// Mean outdoor temperature T₀ (non-zero).
    pub env_mean_temp: f64,
    /// Outdoor half-range T₁.
    pub env_temp_half_width: f64,
    /// Angular frequency of the outdoor cycle (> 0).
    pub angular_frequency: f64,
}

impl Default for NonDimensionalConfig {
    fn default() -> Self {
        Self {
            initial_temp: 1.0,
            mu: 1.0,
            epsilon: 100.0,
            env_mean_temp: 1.0,
            env_temp_half_width: 0.05,
            angular_frequency: 1.0,
        }
    }
}

/// Parameters of the dimensional model; time in hours.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DimensionalConfig {
    /// Initial indoor temperature.
    pub initial_temp: f64,
    /// Enclosure length (m).
    pub length: f64,
    /// Enclosure width (m).
    pub width: f64,
    /// Enclosure height (m).
    pub height: f64,
    /// Wall material: `"concrete"` or `"steel"`.
    pub material: ThermalConductivity,
    /// Wall thickness (m).
    pub wall_thickness: f64,
    /// Heater output rate while on.
    pub heat_output_rate: f64,
    /// Daily mean outdoor temperature.
    pub outdoor_mean_temp: f64,
    /// Daily outdoor half-range.
    pub outdoor_half_range: f64,
}

impl Default for DimensionalConfig {
    fn default() -> Self {
        Self {
            initial_temp: 283.0,
            length: 50.0,
            width: 100.0,
            height: 20.0,
            material: ThermalConductivity::Concrete,
            wall_thickness: 0.05,
            heat_output_rate: 3e5,
            outdoor_mean_temp: 281.0,
            outdoor_half_range: 4.0,
        }
    }
}

/// Steady-state analysis settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Whether to run the steady-state analysis after the simulation.
    pub enabled: bool,
    /// Horizon extensions allowed while searching for a steady state.
    pub max_retries: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 10,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.step"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: heated non-dimensional factory on `[0, 1]`.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the unheated preset: same factory with the heater off.
    pub fn unheated() -> Self {
        Self {
            simulation: SimulationConfig {
                variant: "non-heated".to_string(),
                ..SimulationConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the toggled preset: weak coupling, heater cycled on and off.
    pub fn toggled() -> Self {
        Self {
            simulation: SimulationConfig {
                variant: "toggled".to_string(),
                end: 12.0,
                step: 0.001,
                toggle_times: vec![1.0, 3.0, 5.0, 7.0],
                ..SimulationConfig::default()
            },
            nondimensional: NonDimensionalConfig {
                epsilon: 2.0,
                ..NonDimensionalConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the factory preset: concrete hall in physical units over three days.
    pub fn factory() -> Self {
        Self {
            simulation: SimulationConfig {
                model: "dimensional".to_string(),
                end: 72.0,
                step: 0.01,
                ..SimulationConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "unheated", "toggled", "factory"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "unheated" => Ok(Self::unheated()),
            "toggled" => Ok(Self::toggled()),
            "factory" => Ok(Self::factory()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Selected model, if the name is valid.
    pub fn model_kind(&self) -> Option<ModelKind> {
        ModelKind::parse(&self.simulation.model)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Parameters that
    /// would make the model divide by zero are rejected here; the numeric
    /// core does not check them.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        let kind = self.model_kind();
        if kind.is_none() {
            errors.push(ConfigError::new(
                "simulation.model",
                format!(
                    "must be one of {}, got \"{}\"",
                    ModelKind::NAMES.join(", "),
                    s.model
                ),
            ));
        }
        if let Err(e) = s.variant.parse::<SimulationVariant>() {
            errors.push(ConfigError::new("simulation.variant", e.to_string()));
        }
        if !(s.step.is_finite() && s.step > 0.0) {
            errors.push(ConfigError::new("simulation.step", "must be a finite number > 0"));
        }
        if !(s.start.is_finite() && s.end.is_finite() && s.end > s.start) {
            errors.push(ConfigError::new(
                "simulation.end",
                "must be finite and > simulation.start",
            ));
        }
        if let Some(i) = s.toggle_times.windows(2).position(|w| !(w[0] <= w[1])) {
            errors.push(ConfigError::new(
                "simulation.toggle_times",
                format!("must be non-decreasing, entry {} is not", i + 1),
            ));
        }

        match kind {
            Some(ModelKind::NonDimensional) => self.validate_nondimensional(&mut errors),
            Some(ModelKind::Dimensional) => self.validate_dimensional(&mut errors),
            None => {}
        }

        errors
    }

    fn validate_nondimensional(&self, errors: &mut Vec<ConfigError>) {
        let nd = &self.nondimensional;
        if !(nd.epsilon.is_finite() && nd.epsilon >= 0.0) {
            errors.push(ConfigError::new("nondimensional.epsilon", "must be >= 0"));
        }
        if nd.env_mean_temp == 0.0 || !nd.env_mean_temp.is_finite() {
            errors.push(ConfigError::new(
                "nondimensional.env_mean_temp",
                "must be finite and non-zero",
            ));
        }
        if !(nd.angular_frequency.is_finite() && nd.angular_frequency > 0.0) {
            errors.push(ConfigError::new(
                "nondimensional.angular_frequency",
                "must be a finite number > 0",
            ));
        }
    }

    fn validate_dimensional(&self, errors: &mut Vec<ConfigError>) {
        let d = &self.dimensional;
        for (field, value) in [
            ("dimensional.length", d.length),
            ("dimensional.width", d.width),
            ("dimensional.height", d.height),
            ("dimensional.wall_thickness", d.wall_thickness),
        ] {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ConfigError::new(field, "must be a finite number > 0"));
            }
        }
        if d.heat_output_rate < 0.0 {
            errors.push(ConfigError::new("dimensional.heat_output_rate", "must be >= 0"));
        }
    }
}
