use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Wall material thermal conductivity.
///
/// # Examples
///
/// ```
/// use factory_sim::building::ThermalConductivity;
///
/// assert_eq!(ThermalConductivity::Concrete.value(), 0.8);
/// assert_eq!("steel".parse::<ThermalConductivity>().ok(), Some(ThermalConductivity::Steel));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalConductivity {
    Concrete,
    Steel,
}

impl ThermalConductivity {
    /// Every selectable material, in declaration order.
    pub const ALL: [Self; 2] = [Self::Concrete, Self::Steel];

    /// Conductivity constant of the material.
    pub fn value(self) -> f64 {
        match self {
            Self::Concrete => 0.8,
            Self::Steel => 50.2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Concrete => "concrete",
            Self::Steel => "steel",
        }
    }
}

impl fmt::Display for ThermalConductivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThermalConductivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown material \"{s}\", expected \"concrete\" or \"steel\""))
    }
}

/// Rectangular box enclosing the factory floor.
///
/// Heat is lost through the four walls and the roof; the floor is treated
/// as adiabatic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Cuboid {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Area of the walls plus the flat roof.
    pub fn surface_area(&self) -> f64 {
        2.0 * self.length * self.height + 2.0 * self.width * self.height + self.length * self.width
    }

    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    pub fn surface_area_to_volume_ratio(&self) -> f64 {
        self.surface_area() / self.volume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_hall_dimensions() {
        let hall = Cuboid::new(50.0, 100.0, 20.0);
        assert_eq!(hall.volume(), 100_000.0);
        // 2*50*20 + 2*100*20 + 50*100
        assert_eq!(hall.surface_area(), 11_000.0);
        assert!((hall.surface_area_to_volume_ratio() - 0.11).abs() < 1e-12);
    }

    #[test]
    fn material_constants() {
        assert_eq!(ThermalConductivity::Concrete.value(), 0.8);
        assert_eq!(ThermalConductivity::Steel.value(), 50.2);
    }

    #[test]
    fn material_parsing_is_case_insensitive() {
        assert_eq!(
            "CONCRETE".parse::<ThermalConductivity>(),
            Ok(ThermalConductivity::Concrete)
        );
        assert!("wood".parse::<ThermalConductivity>().is_err());
    }
}
