//! Unit tags and conversions.
//!
//! Every component variable carries a unit tag such as `"A"`, `"kW"` or
//! `"degK"`. The external runtime converts values at connection boundaries,
//! so a tag that is misspelled, or that names the wrong dimension, silently
//! scales a connection. This module is the single conversion table for the
//! tags used in this crate.
//!
//! Conversion factors are derived from [`uom`] rather than typed in by hand:
//!
//! ```
//! use powertrain_models::support::units::convert;
//!
//! let watts = convert(2.5, "kW", "W").unwrap();
//! assert!((watts - 2500.0).abs() < 1e-9);
//!
//! let kelvin = convert(15.0, "degC", "degK").unwrap();
//! assert!((kelvin - 288.15).abs() < 1e-9);
//!
//! assert!(convert(1.0, "A", "V").is_err());
//! ```

use std::fmt;

use thiserror::Error;
use uom::si::{
    angular_velocity::{radian_per_second, revolution_per_minute},
    energy::{joule, kilowatt_hour},
    f64::{AngularVelocity, Energy, Mass, Power, Pressure, ThermodynamicTemperature, Time, Volume},
    mass::{gram, kilogram},
    power::{kilowatt, watt},
    pressure::{bar, pascal},
    thermodynamic_temperature::{degree_celsius, kelvin},
    time::{hour, minute, second},
    volume::{cubic_centimeter, cubic_meter, liter},
};

/// Errors raised when parsing or converting unit tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("unknown unit tag `{tag}`")]
    Unknown { tag: String },

    #[error("cannot convert `{from}` to `{to}`: dimensions differ")]
    Incompatible { from: String, to: String },
}

/// Exponents of the base dimensions of a unit.
///
/// Plane angle is tracked as its own dimension so that `"rpm"` and `"Hz"`
/// are not silently interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimension {
    pub length: i8,
    pub mass: i8,
    pub time: i8,
    pub current: i8,
    pub temperature: i8,
    pub angle: i8,
}

impl Dimension {
    const NONE: Self = Self::of(0, 0, 0, 0, 0);

    const fn of(length: i8, mass: i8, time: i8, current: i8, temperature: i8) -> Self {
        Self {
            length,
            mass,
            time,
            current,
            temperature,
            angle: 0,
        }
    }

    const fn with_angle(mut self, angle: i8) -> Self {
        self.angle = angle;
        self
    }
}

/// A parsed unit tag.
///
/// Values convert to SI as `value * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    tag: &'static str,
    dimension: Dimension,
    scale: f64,
    offset: f64,
}

impl Unit {
    /// Parses a unit tag.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Unknown`] if the tag is not in the table.
    pub fn parse(tag: &str) -> Result<Self, UnitError> {
        let linear = |tag: &'static str, dimension: Dimension, scale: f64| Self {
            tag,
            dimension,
            scale,
            offset: 0.0,
        };

        let unit = match tag {
            "unitless" => linear("unitless", Dimension::NONE, 1.0),
            "percent" => linear("percent", Dimension::NONE, 0.01),
            "m" => linear("m", Dimension::of(1, 0, 0, 0, 0), 1.0),
            "m**2" => linear("m**2", Dimension::of(2, 0, 0, 0, 0), 1.0),
            "m**3" => linear("m**3", Dimension::of(3, 0, 0, 0, 0), 1.0),
            "m**4" => linear("m**4", Dimension::of(4, 0, 0, 0, 0), 1.0),
            "L" => linear(
                "L",
                Dimension::of(3, 0, 0, 0, 0),
                Volume::new::<liter>(1.0).get::<cubic_meter>(),
            ),
            "cm**3" => linear(
                "cm**3",
                Dimension::of(3, 0, 0, 0, 0),
                Volume::new::<cubic_centimeter>(1.0).get::<cubic_meter>(),
            ),
            "kg" => linear("kg", Dimension::of(0, 1, 0, 0, 0), 1.0),
            "g" => linear(
                "g",
                Dimension::of(0, 1, 0, 0, 0),
                Mass::new::<gram>(1.0).get::<kilogram>(),
            ),
            "s" => linear("s", Dimension::of(0, 0, 1, 0, 0), 1.0),
            "min" => linear(
                "min",
                Dimension::of(0, 0, 1, 0, 0),
                Time::new::<minute>(1.0).get::<second>(),
            ),
            "h" => linear(
                "h",
                Dimension::of(0, 0, 1, 0, 0),
                Time::new::<hour>(1.0).get::<second>(),
            ),
            "Hz" => linear("Hz", Dimension::of(0, 0, -1, 0, 0), 1.0),
            "rad/s" => linear(
                "rad/s",
                Dimension::of(0, 0, -1, 0, 0).with_angle(1),
                AngularVelocity::new::<radian_per_second>(1.0).get::<radian_per_second>(),
            ),
            "rpm" => linear(
                "rpm",
                Dimension::of(0, 0, -1, 0, 0).with_angle(1),
                AngularVelocity::new::<revolution_per_minute>(1.0).get::<radian_per_second>(),
            ),
            "m/s" => linear("m/s", Dimension::of(1, 0, -1, 0, 0), 1.0),
            "A" => linear("A", Dimension::of(0, 0, 0, 1, 0), 1.0),
            "A/m**2" => linear("A/m**2", Dimension::of(-2, 0, 0, 1, 0), 1.0),
            "V" => linear("V", Dimension::of(2, 1, -3, -1, 0), 1.0),
            "ohm" => linear("ohm", Dimension::of(2, 1, -3, -2, 0), 1.0),
            "H" => linear("H", Dimension::of(2, 1, -2, -2, 0), 1.0),
            "F" => linear("F", Dimension::of(-2, -1, 4, 2, 0), 1.0),
            "T" => linear("T", Dimension::of(0, 1, -2, -1, 0), 1.0),
            "W" => linear("W", Dimension::of(2, 1, -3, 0, 0), 1.0),
            "kW" => linear(
                "kW",
                Dimension::of(2, 1, -3, 0, 0),
                Power::new::<kilowatt>(1.0).get::<watt>(),
            ),
            "kW/kg" => linear(
                "kW/kg",
                Dimension::of(2, 0, -3, 0, 0),
                Power::new::<kilowatt>(1.0).get::<watt>(),
            ),
            "W/m**2" => linear("W/m**2", Dimension::of(0, 1, -3, 0, 0), 1.0),
            "J" => linear("J", Dimension::of(2, 1, -2, 0, 0), 1.0),
            "J/A" => linear("J/A", Dimension::of(2, 1, -2, -1, 0), 1.0),
            "J/A**2" => linear("J/A**2", Dimension::of(2, 1, -2, -2, 0), 1.0),
            "J/kg" => linear("J/kg", Dimension::of(2, 0, -2, 0, 0), 1.0),
            "N*m" => linear("N*m", Dimension::of(2, 1, -2, 0, 0).with_angle(-1), 1.0),
            "Pa" => linear("Pa", Dimension::of(-1, 1, -2, 0, 0), 1.0),
            "bar" => linear(
                "bar",
                Dimension::of(-1, 1, -2, 0, 0),
                Pressure::new::<bar>(1.0).get::<pascal>(),
            ),
            "g/kW/h" => linear(
                "g/kW/h",
                Dimension::of(-2, 0, 2, 0, 0),
                Mass::new::<gram>(1.0).get::<kilogram>()
                    / Energy::new::<kilowatt_hour>(1.0).get::<joule>(),
            ),
            "kg/m**3" => linear("kg/m**3", Dimension::of(-3, 1, 0, 0, 0), 1.0),
            "m**2/s" => linear("m**2/s", Dimension::of(2, 0, -1, 0, 0), 1.0),
            "degK" | "K" => linear(
                if tag == "K" { "K" } else { "degK" },
                Dimension::of(0, 0, 0, 0, 1),
                1.0,
            ),
            "degC" => Self {
                tag: "degC",
                dimension: Dimension::of(0, 0, 0, 0, 1),
                scale: 1.0,
                offset: ThermodynamicTemperature::new::<degree_celsius>(0.0).get::<kelvin>(),
            },
            "degK**-1" => linear("degK**-1", Dimension::of(0, 0, 0, 0, -1), 1.0),
            "K/W" => linear("K/W", Dimension::of(-2, -1, 3, 0, 1), 1.0),
            "W/m/K" => linear("W/m/K", Dimension::of(1, 1, -3, 0, -1), 1.0),
            "W/m**2/K" => linear("W/m**2/K", Dimension::of(0, 1, -3, 0, -1), 1.0),
            "W/m**2/K**4" => linear("W/m**2/K**4", Dimension::of(0, 1, -3, 0, -4), 1.0),
            _ => {
                return Err(UnitError::Unknown {
                    tag: tag.to_owned(),
                });
            }
        };

        Ok(unit)
    }

    /// The tag this unit was parsed from.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Converts a value expressed in this unit to SI.
    #[must_use]
    pub fn to_si(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    /// Converts an SI value to this unit.
    #[must_use]
    pub fn from_si(&self, value: f64) -> f64 {
        (value - self.offset) / self.scale
    }

    /// Returns `true` if values can be converted between the two units.
    #[must_use]
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)
    }
}

/// Converts `value` from the unit tagged `from` to the unit tagged `to`.
///
/// # Errors
///
/// Returns a [`UnitError`] if either tag is unknown or the dimensions differ.
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64, UnitError> {
    let source = Unit::parse(from)?;
    let target = Unit::parse(to)?;

    if !source.is_compatible(&target) {
        return Err(UnitError::Incompatible {
            from: from.to_owned(),
            to: to.to_owned(),
        });
    }

    Ok(target.from_si(source.to_si(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn scaled_units() {
        assert_relative_eq!(convert(1.0, "h", "s").unwrap(), 3600.0);
        assert_relative_eq!(convert(2.0, "bar", "Pa").unwrap(), 2.0e5);
        assert_relative_eq!(convert(1000.0, "cm**3", "L").unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            convert(60.0, "rpm", "rad/s").unwrap(),
            2.0 * std::f64::consts::PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn specific_fuel_consumption() {
        // 250 g/kW/h is about 6.94e-8 kg/J.
        let si = Unit::parse("g/kW/h").unwrap().to_si(250.0);
        assert_relative_eq!(si, 250.0e-3 / 3.6e6, max_relative = 1e-12);
    }

    #[test]
    fn temperatures_are_affine() {
        assert_relative_eq!(convert(300.0, "degK", "degC").unwrap(), 26.85, epsilon = 1e-9);
        assert_relative_eq!(convert(300.0, "K", "degK").unwrap(), 300.0);
    }

    #[test]
    fn rejects_unknown_and_incompatible_tags() {
        assert_eq!(
            Unit::parse("furlong"),
            Err(UnitError::Unknown {
                tag: "furlong".into()
            })
        );
        assert!(matches!(
            convert(1.0, "Hz", "rpm"),
            Err(UnitError::Incompatible { .. })
        ));
        assert!(matches!(
            convert(1.0, "W", "J"),
            Err(UnitError::Incompatible { .. })
        ));
    }
}
