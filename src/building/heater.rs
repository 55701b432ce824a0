/// An on/off heater with a constant heat output rate.
///
/// The non-dimensional model reuses the same type with `heat_output_rate`
/// holding the heating strength μ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heater {
    /// Heat delivered per unit time while switched on.
    pub heat_output_rate: f64,

    /// Whether the heater is currently running.
    pub switched_on: bool,
}

impl Heater {
    /// Creates a heater that starts switched off.
    pub fn new(heat_output_rate: f64) -> Self {
        Self {
            heat_output_rate,
            switched_on: false,
        }
    }

    /// Creates a heater with an explicit initial state.
    pub fn with_state(heat_output_rate: f64, switched_on: bool) -> Self {
        Self {
            heat_output_rate,
            switched_on,
        }
    }

    /// Heat output rate right now: the configured rate when on, otherwise `0.0`.
    pub fn current_rate(&self) -> f64 {
        if self.switched_on {
            self.heat_output_rate
        } else {
            0.0
        }
    }

    /// Heat delivered over `interval` at the current state.
    pub fn heat_output(&self, interval: f64) -> f64 {
        self.current_rate() * interval
    }

    pub fn switch_on(&mut self) {
        self.switched_on = true;
    }

    pub fn switch_off(&mut self) {
        self.switched_on = false;
    }

    /// Flips the heater state and returns the new one.
    pub fn toggle(&mut self) -> bool {
        self.switched_on = !self.switched_on;
        self.switched_on
    }
}
