//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use factory_sim::building::{Cuboid, Heater, OutdoorEnvironment, ThermalConductivity};
use factory_sim::sim::grid::evenly_spaced;
use factory_sim::sim::model::{Factory, NdFactory};

/// Non-dimensional factory at T = 1 with μ = 1, ε = 100, T₀ = 1, T₁ = 0.05.
pub fn tight_coupling(heated: bool) -> NdFactory {
    NdFactory::new(1.0, 1.0, 100.0, 1.0, 0.05, heated)
}

/// Non-dimensional factory with no coupling to the outdoors.
pub fn isolated(heated: bool) -> NdFactory {
    NdFactory::new(1.0, 1.0, 0.0, 1.0, 0.05, heated)
}

/// Concrete hall, 50 × 100 × 20 m, 5 cm walls, 300 kW heater, 281 ± 4 outdoors.
pub fn concrete_hall(heated: bool) -> Factory {
    Factory::new(
        283.0,
        Cuboid::new(50.0, 100.0, 20.0),
        ThermalConductivity::Concrete,
        Heater::with_state(3e5, heated),
        OutdoorEnvironment::new(281.0, 4.0),
        0.05,
    )
}

/// 1001 samples over `[0, 1]`, 1000 steps of 0.001.
pub fn unit_grid() -> Vec<f64> {
    evenly_spaced(0.0, 1.0, 0.001)
}

/// Extracts the numeric value of a `Label:   value[unit]` report line.
pub fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    raw.strip_suffix(unit)
        .unwrap_or(raw)
        .trim()
        .parse::<f64>()
        .unwrap_or_else(|e| panic!("failed to parse `{raw}` as f64: {e}"))
}
