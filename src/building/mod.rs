//! Physical collaborators of the factory model: heater, enclosure, outdoors.

/// Rectangular enclosure geometry and wall materials.
pub mod enclosure;
/// Sinusoidal outdoor temperature driver.
pub mod environment;
/// On/off heater.
pub mod heater;

pub use enclosure::{Cuboid, ThermalConductivity};
pub use environment::{Extremum, ExtremumKind, OutdoorEnvironment, Sinusoid};
pub use heater::Heater;
