//! Indoor temperature models of the heated factory.
//!
//! Both models integrate a first-order ODE for the indoor temperature driven
//! by a sinusoidal outdoor temperature and an on/off heater. [`Factory`] works
//! in physical units; [`NdFactory`] is its non-dimensional form:
//!
//! ```text
//! Factory:    dT/dt = P_in/C - k·A·(T - T_out(t)) / (L·C),  C = c_air · V
//! NdFactory:  dT/dt = μ·[heated] - ε·(T - 1 - (T₁/T₀)·sin(ωt))
//! ```

use crate::building::{Cuboid, Heater, OutdoorEnvironment, Sinusoid, ThermalConductivity};

use super::engine::{self, SimulationError};
use super::quadrature::trapezoidal;
use super::types::Trajectory;

/// Volumetric heat capacity of air (kJ m⁻³ K⁻¹).
pub const AIR_SPECIFIC_HEAT_CAPACITY: f64 = 1.2;

/// A single-state thermal model stepped by the trapezoidal rule.
///
/// Implementors provide the state, the heater, the outdoor driver and the
/// time derivative; stepping and simulation come for free.
pub trait ThermalModel {
    /// Current indoor temperature.
    fn temperature(&self) -> f64;

    fn set_temperature(&mut self, temperature: f64);

    fn heater(&self) -> &Heater;

    fn heater_mut(&mut self) -> &mut Heater;

    /// Outdoor temperature sinusoid, in the model's own units.
    fn driver(&self) -> Sinusoid;

    /// Time derivative of the indoor temperature at `time`, holding the
    /// current temperature and heater state fixed.
    fn derivative(&self, time: f64) -> f64;

    fn outdoor_temperature(&self, time: f64) -> f64 {
        self.driver().value(time)
    }

    /// Advances the temperature over `[time, time + dt]` and returns the change.
    fn step(&mut self, time: f64, dt: f64) -> f64 {
        let delta = trapezoidal(|t| self.derivative(t), time, dt);
        self.set_temperature(self.temperature() + delta);
        delta
    }

    /// Runs the model across `grid`, flipping the heater at `toggles`.
    ///
    /// # Errors
    ///
    /// See [`engine::simulate`].
    fn simulate(
        &mut self,
        grid: &[f64],
        toggles: Option<&[f64]>,
    ) -> Result<Trajectory, SimulationError> {
        engine::simulate(self, grid, toggles)
    }
}

/// Factory hall in physical units; time in hours.
///
/// # Examples
///
/// ```
/// use factory_sim::building::{Cuboid, Heater, OutdoorEnvironment, ThermalConductivity};
/// use factory_sim::sim::model::{Factory, ThermalModel};
///
/// // Starts below the heated equilibrium, so the first step warms the hall.
/// let mut factory = Factory::new(
///     275.0,
///     Cuboid::new(50.0, 100.0, 20.0),
///     ThermalConductivity::Concrete,
///     Heater::with_state(3e5, true),
///     OutdoorEnvironment::new(281.0, 4.0),
///     0.05,
/// );
/// let before = factory.temperature();
/// factory.step(0.0, 0.1);
/// assert!(factory.temperature() > before);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Factory {
    pub indoor_temp: f64,
    pub enclosure: Cuboid,
    pub conductivity: ThermalConductivity,
    pub heater: Heater,
    pub outdoors: OutdoorEnvironment,
    pub wall_thickness: f64,
}

impl Factory {
    pub fn new(
        indoor_temp: f64,
        enclosure: Cuboid,
        conductivity: ThermalConductivity,
        heater: Heater,
        outdoors: OutdoorEnvironment,
        wall_thickness: f64,
    ) -> Self {
        Self {
            indoor_temp,
            enclosure,
            conductivity,
            heater,
            outdoors,
            wall_thickness,
        }
    }

    /// Heat capacity of the enclosed air.
    pub fn heat_capacity(&self) -> f64 {
        AIR_SPECIFIC_HEAT_CAPACITY * self.enclosure.volume()
    }

    /// Equivalent non-dimensional coupling `k·A / (L·C)`.
    pub fn loss_coefficient(&self) -> f64 {
        self.conductivity.value() * self.enclosure.surface_area()
            / (self.wall_thickness * self.heat_capacity())
    }
}

impl ThermalModel for Factory {
    fn temperature(&self) -> f64 {
        self.indoor_temp
    }

    fn set_temperature(&mut self, temperature: f64) {
        self.indoor_temp = temperature;
    }

    fn heater(&self) -> &Heater {
        &self.heater
    }

    fn heater_mut(&mut self) -> &mut Heater {
        &mut self.heater
    }

    fn driver(&self) -> Sinusoid {
        self.outdoors.sinusoid()
    }

    fn derivative(&self, time: f64) -> f64 {
        let heat_capacity = self.heat_capacity();
        let p_in = self.heater.current_rate();
        let outdoor = self.outdoors.temperature_at(time);
        p_in / heat_capacity
            - self.conductivity.value() * self.enclosure.surface_area() * (self.indoor_temp - outdoor)
                / (self.wall_thickness * heat_capacity)
    }
}

/// Non-dimensional factory model.
///
/// The heater's `heat_output_rate` holds the heating strength μ.
#[derive(Debug, Clone, PartialEq)]
pub struct NdFactory {
    /// Non-dimensional indoor temperature.
    pub temperature: f64,
    pub heater: Heater,
    /// Coupling to the outdoors.
    pub epsilon: f64,
    /// Mean outdoor temperature T₀.
    pub env_mean_temp: f64,
    /// Outdoor half-range T₁.
    pub env_temp_half_width: f64,
    /// Angular frequency ω of the outdoor cycle.
    pub angular_frequency: f64,
}

impl NdFactory {
    /// Angular frequency of `sin(t)`.
    pub const DEFAULT_ANGULAR_FREQUENCY: f64 = 1.0;

    pub fn new(
        temperature: f64,
        mu: f64,
        epsilon: f64,
        env_mean_temp: f64,
        env_temp_half_width: f64,
        heated: bool,
    ) -> Self {
        Self {
            temperature,
            heater: Heater::with_state(mu, heated),
            epsilon,
            env_mean_temp,
            env_temp_half_width,
            angular_frequency: Self::DEFAULT_ANGULAR_FREQUENCY,
        }
    }

    pub fn with_angular_frequency(mut self, angular_frequency: f64) -> Self {
        self.angular_frequency = angular_frequency;
        self
    }

    pub fn mu(&self) -> f64 {
        self.heater.heat_output_rate
    }

    pub fn heated(&self) -> bool {
        self.heater.switched_on
    }
}

impl ThermalModel for NdFactory {
    fn temperature(&self) -> f64 {
        self.temperature
    }

    fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }

    fn heater(&self) -> &Heater {
        &self.heater
    }

    fn heater_mut(&mut self) -> &mut Heater {
        &mut self.heater
    }

    fn driver(&self) -> Sinusoid {
        Sinusoid::new(
            1.0,
            self.env_temp_half_width / self.env_mean_temp,
            self.angular_frequency,
            0.0,
        )
    }

    fn derivative(&self, time: f64) -> f64 {
        self.heater.current_rate() - self.epsilon * (self.temperature - self.driver().value(time))
    }
}
