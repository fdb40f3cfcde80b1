//! International Standard Atmosphere, troposphere and lower stratosphere.
//!
//! Provides the free-stream properties needed by external heat transfer
//! models, each with its derivative with respect to altitude so components
//! can build exact partials.
//!
//! Valid from sea level to 20 km geopotential altitude. Above 11 km the
//! temperature is constant and pressure decays exponentially.

use uom::si::{
    f64::{Length, MassDensity, Pressure, ThermodynamicTemperature},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

/// Sea-level temperature, K.
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15;
/// Sea-level pressure, Pa.
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;
/// Tropospheric temperature lapse rate, K/m.
pub const LAPSE_RATE: f64 = 0.0065;
/// Tropopause altitude, m.
pub const TROPOPAUSE_ALTITUDE: f64 = 11_000.0;
/// Specific gas constant of dry air, J/kg/K.
pub const AIR_GAS_CONSTANT: f64 = 287.052_87;
/// Standard gravity, m/s².
pub const GRAVITY: f64 = 9.806_65;

const SUTHERLAND_BETA: f64 = 1.458e-6;
const SUTHERLAND_S: f64 = 110.4;

const CONDUCTIVITY_COEFF: f64 = 2.646_38e-3;
const CONDUCTIVITY_A: f64 = 245.4;
const CONDUCTIVITY_B: f64 = 12.0;

/// Free-stream properties at one altitude, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Properties {
    /// K
    pub temperature: f64,
    /// Pa
    pub pressure: f64,
    /// kg/m³
    pub density: f64,
    /// Pa·s
    pub dynamic_viscosity: f64,
    /// m²/s
    pub kinematic_viscosity: f64,
    /// W/m/K
    pub thermal_conductivity: f64,
}

/// Properties and their derivatives with respect to altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: Properties,
    /// Each field holds d(property)/d(altitude), per metre.
    pub d_altitude: Properties,
}

/// Evaluates the standard atmosphere at `altitude` (m).
#[must_use]
pub fn sample(altitude: f64) -> Sample {
    let (temperature, d_temperature, pressure, d_pressure) = if altitude <= TROPOPAUSE_ALTITUDE {
        let t = SEA_LEVEL_TEMPERATURE - LAPSE_RATE * altitude;
        let exponent = GRAVITY / (AIR_GAS_CONSTANT * LAPSE_RATE);
        let p = SEA_LEVEL_PRESSURE * (t / SEA_LEVEL_TEMPERATURE).powf(exponent);
        let dt = -LAPSE_RATE;
        (t, dt, p, exponent * p / t * dt)
    } else {
        let t = SEA_LEVEL_TEMPERATURE - LAPSE_RATE * TROPOPAUSE_ALTITUDE;
        let exponent = GRAVITY / (AIR_GAS_CONSTANT * LAPSE_RATE);
        let p_tropopause = SEA_LEVEL_PRESSURE * (t / SEA_LEVEL_TEMPERATURE).powf(exponent);
        let scale = GRAVITY / (AIR_GAS_CONSTANT * t);
        let p = p_tropopause * (-scale * (altitude - TROPOPAUSE_ALTITUDE)).exp();
        (t, 0.0, p, -scale * p)
    };

    let density = pressure / (AIR_GAS_CONSTANT * temperature);
    let d_density = (d_pressure * temperature - pressure * d_temperature)
        / (AIR_GAS_CONSTANT * temperature * temperature);

    let (mu, d_mu_d_t) = dynamic_viscosity(temperature);
    let d_mu = d_mu_d_t * d_temperature;

    let nu = mu / density;
    let d_nu = d_mu / density - mu * d_density / (density * density);

    let (k, d_k_d_t) = thermal_conductivity(temperature);

    Sample {
        value: Properties {
            temperature,
            pressure,
            density,
            dynamic_viscosity: mu,
            kinematic_viscosity: nu,
            thermal_conductivity: k,
        },
        d_altitude: Properties {
            temperature: d_temperature,
            pressure: d_pressure,
            density: d_density,
            dynamic_viscosity: d_mu,
            kinematic_viscosity: d_nu,
            thermal_conductivity: d_k_d_t * d_temperature,
        },
    }
}

/// Sutherland's law. Returns the viscosity (Pa·s) and its temperature
/// derivative.
#[must_use]
pub fn dynamic_viscosity(temperature: f64) -> (f64, f64) {
    let t = temperature;
    let mu = SUTHERLAND_BETA * t.powf(1.5) / (t + SUTHERLAND_S);
    let d_mu = SUTHERLAND_BETA * t.sqrt() * (0.5 * t + 1.5 * SUTHERLAND_S)
        / ((t + SUTHERLAND_S) * (t + SUTHERLAND_S));
    (mu, d_mu)
}

/// Thermal conductivity of air (W/m/K) and its temperature derivative.
#[must_use]
pub fn thermal_conductivity(temperature: f64) -> (f64, f64) {
    let t = temperature;
    let exp_term = 10f64.powf(-CONDUCTIVITY_B / t);
    let denom = t + CONDUCTIVITY_A * exp_term;
    let d_denom = 1.0 + CONDUCTIVITY_A * exp_term * std::f64::consts::LN_10 * CONDUCTIVITY_B / (t * t);

    let k = CONDUCTIVITY_COEFF * t.powf(1.5) / denom;
    let d_k = CONDUCTIVITY_COEFF * (1.5 * t.sqrt() * denom - t.powf(1.5) * d_denom) / (denom * denom);
    (k, d_k)
}

/// Standard-atmosphere state with units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub density: MassDensity,
}

impl Atmosphere {
    /// Evaluates the standard atmosphere at the given altitude.
    #[must_use]
    pub fn at(altitude: Length) -> Self {
        let properties = sample(altitude.get::<meter>()).value;
        Self {
            temperature: ThermodynamicTemperature::new::<kelvin>(properties.temperature),
            pressure: Pressure::new::<pascal>(properties.pressure),
            density: MassDensity::new::<kilogram_per_cubic_meter>(properties.density),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::foot;

    #[test]
    fn sea_level() {
        let atm = Atmosphere::at(Length::new::<meter>(0.0));
        assert_relative_eq!(atm.temperature.get::<kelvin>(), 288.15);
        assert_relative_eq!(atm.pressure.get::<pascal>(), 101_325.0);
        assert_relative_eq!(
            atm.density.get::<kilogram_per_cubic_meter>(),
            1.225,
            epsilon = 1e-3
        );

        let properties = sample(0.0).value;
        assert_relative_eq!(properties.dynamic_viscosity, 1.789e-5, max_relative = 1e-3);
        assert_relative_eq!(properties.kinematic_viscosity, 1.461e-5, max_relative = 1e-3);
        assert_relative_eq!(properties.thermal_conductivity, 0.02533, max_relative = 1e-3);
    }

    #[test]
    fn cruise_and_stratosphere() {
        let atm = Atmosphere::at(Length::new::<foot>(10_000.0));
        assert_relative_eq!(atm.temperature.get::<kelvin>(), 268.338, epsilon = 1e-2);
        assert_relative_eq!(atm.pressure.get::<pascal>(), 69_682.0, max_relative = 1e-3);

        let high = sample(15_000.0).value;
        assert_relative_eq!(high.temperature, 216.65);
        assert_relative_eq!(high.pressure, 12_045.0, max_relative = 2e-3);
    }

    #[test]
    fn derivatives_match_central_differences() {
        for altitude in [500.0, 3_000.0, 9_000.0, 14_000.0] {
            let h = 1e-2;
            let center = sample(altitude).d_altitude;
            let up = sample(altitude + h).value;
            let down = sample(altitude - h).value;

            let fd = |f: fn(&Properties) -> f64| (f(&up) - f(&down)) / (2.0 * h);

            assert_relative_eq!(center.temperature, fd(|p| p.temperature), epsilon = 1e-9);
            assert_relative_eq!(center.pressure, fd(|p| p.pressure), max_relative = 1e-6);
            assert_relative_eq!(center.density, fd(|p| p.density), max_relative = 1e-6);
            assert_relative_eq!(
                center.kinematic_viscosity,
                fd(|p| p.kinematic_viscosity),
                max_relative = 1e-5,
                epsilon = 1e-16
            );
            assert_relative_eq!(
                center.thermal_conductivity,
                fd(|p| p.thermal_conductivity),
                max_relative = 1e-5,
                epsilon = 1e-14
            );
        }
    }
}
