/// Steady-state detection and extremum pairing.
pub mod analysis;
/// Simulation loop over a time grid.
pub mod engine;
/// Time grid construction.
pub mod grid;
pub mod kpi;
/// Thermal models and the trait they share.
pub mod model;
pub mod quadrature;
/// Heater toggle schedule.
pub mod schedule;
pub mod types;

pub use analysis::{AnalysisError, SteadyStateAnalysis, SteadyStateSearch};
pub use engine::{Engine, SimulationError};
pub use model::{AIR_SPECIFIC_HEAT_CAPACITY, Factory, NdFactory, ThermalModel};
pub use types::{SimulationVariant, Trajectory};
