//! Indoor temperature simulation of a heated factory hall.
//!
//! A factory is driven by a sinusoidal outdoor temperature and an on/off
//! heater. The crate integrates the indoor temperature with the trapezoidal
//! rule, locates the onset of steady oscillation, and measures how far the
//! indoor cycle lags and deviates from the outdoor one.

pub mod building;
pub mod cli;
pub mod config;
pub mod io;
#[cfg(feature = "plot")]
pub mod plot;
pub mod runner;
/// Thermal models, simulation loop, and steady-state analysis.
pub mod sim;
