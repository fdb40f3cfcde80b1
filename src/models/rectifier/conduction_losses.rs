use std::{
    f64::consts::{FRAC_PI_4, PI, SQRT_2},
    num::NonZeroUsize,
};

use crate::support::{
    clip::{CLIPPED_GRADIENT, Clipped, clip},
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    naming::ComponentPaths,
};

use super::{AC_CURRENT, Device, MODULATION_INDEX, SUBSYSTEM};

/// Upper bound of the modulation index in the loss formulas.
///
/// Slightly above one so that the converged modulation index, which may
/// overshoot by the solver tolerance, is never clipped.
pub const MODULATION_INDEX_UPPER: f64 = 1.001;

/// Weight of the modulation term in the threshold-voltage losses.
const VOLTAGE_WEIGHT: f64 = FRAC_PI_4;

/// Weight of the modulation term in the resistive losses, `8 / (3 pi)`.
const RESISTIVE_WEIGHT: f64 = 8.0 / (3.0 * PI);

impl Device {
    /// In a rectifier the diodes carry the larger share of the current.
    fn modulation_sign(self) -> f64 {
        match self {
            Device::Diode => 1.0,
            Device::Igbt => -1.0,
        }
    }
}

/// Evaluated terms of the conduction loss formula at one point.
struct Terms {
    /// `sqrt(2) * I_rms / (2 pi)`
    voltage_factor: f64,
    /// `I_peak^2 / 8 = I_rms^2 / 4`
    resistive_factor: f64,
    /// `1 + sign * pi/4 * m * cos_phi`
    voltage_share: f64,
    /// `1 + sign * 8/(3 pi) * m * cos_phi`
    resistive_share: f64,
}

impl Terms {
    fn new(sign: f64, current: f64, m: f64, cos_phi: f64) -> Self {
        Self {
            voltage_factor: SQRT_2 * current / (2.0 * PI),
            resistive_factor: current * current / 4.0,
            voltage_share: 1.0 + sign * VOLTAGE_WEIGHT * m * cos_phi,
            resistive_share: 1.0 + sign * RESISTIVE_WEIGHT * m * cos_phi,
        }
    }
}

/// Conduction losses of the IGBT and the diode of one rectifier leg.
///
/// For each device, with `I_peak = sqrt(2) * I_rms`:
///
/// ```text
/// P = V_th * I_peak / (2 pi) * (1 ± pi/4 * m * cos_phi)
///   + R * I_peak^2 / 8 * (1 ± 8/(3 pi) * m * cos_phi)
/// ```
///
/// with `+` for the diode and `-` for the IGBT. The modulation index is
/// clipped to `[0, 1.001]`; where it was clipped, the partial with respect
/// to it is the [`CLIPPED_GRADIENT`] stand-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesConductionLosses {
    power_factor: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesConductionLosses {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            power_factor: ComponentPaths::new(SUBSYSTEM, id).settings("power_factor"),
            number_of_points,
        }
    }

    fn modulation_index(inputs: &Variables, n: usize) -> ComponentResult<Vec<Clipped>> {
        Ok(inputs
            .array(MODULATION_INDEX, n)?
            .iter()
            .map(|m| clip(*m, 0.0, MODULATION_INDEX_UPPER))
            .collect())
    }
}

impl ExplicitComponent for PerformancesConductionLosses {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(AC_CURRENT, "A", Shape::Points);
        interface.add_input(MODULATION_INDEX, "unitless", Shape::Points);
        interface
            .add_input(&self.power_factor, "unitless", Shape::Scalar)
            .val(1.0);

        for device in Device::ALL {
            interface.add_input(device.resistance(), "ohm", Shape::Points);
            interface.add_input(device.gate_voltage(), "V", Shape::Points);
        }

        for device in Device::ALL {
            let output = device.conduction_losses();
            interface.add_output(output, "W", Shape::Points);
            for wrt in [
                AC_CURRENT,
                MODULATION_INDEX,
                device.resistance(),
                device.gate_voltage(),
            ] {
                interface.declare_partials(output, wrt, Sparsity::Diagonal);
            }
            interface.declare_partials(output, &self.power_factor, Sparsity::Column);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let current = inputs.array(AC_CURRENT, n)?;
        let m = Self::modulation_index(inputs, n)?;
        let cos_phi = inputs.scalar(&self.power_factor)?;

        for device in Device::ALL {
            let resistance = inputs.array(device.resistance(), n)?;
            let voltage = inputs.array(device.gate_voltage(), n)?;
            let sign = device.modulation_sign();

            let losses: Vec<f64> = (0..n)
                .map(|i| {
                    let t = Terms::new(sign, current[i], m[i].value, cos_phi);
                    voltage[i] * t.voltage_factor * t.voltage_share
                        + resistance[i] * t.resistive_factor * t.resistive_share
                })
                .collect();
            outputs.set(device.conduction_losses(), losses);
        }
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let current = inputs.array(AC_CURRENT, n)?;
        let m = Self::modulation_index(inputs, n)?;
        let cos_phi = inputs.scalar(&self.power_factor)?;

        for device in Device::ALL {
            let output = device.conduction_losses();
            let resistance = inputs.array(device.resistance(), n)?;
            let voltage = inputs.array(device.gate_voltage(), n)?;
            let sign = device.modulation_sign();

            let terms: Vec<Terms> = (0..n)
                .map(|i| Terms::new(sign, current[i], m[i].value, cos_phi))
                .collect();

            // d/d(m * cos_phi) of the loss, shared by both partials.
            let d_modulation: Vec<f64> = (0..n)
                .map(|i| {
                    sign * (voltage[i] * terms[i].voltage_factor * VOLTAGE_WEIGHT
                        + resistance[i] * terms[i].resistive_factor * RESISTIVE_WEIGHT)
                })
                .collect();

            partials.set(
                output,
                AC_CURRENT,
                Partial::Diagonal(
                    (0..n)
                        .map(|i| {
                            let t = &terms[i];
                            voltage[i] * SQRT_2 / (2.0 * PI) * t.voltage_share
                                + resistance[i] * current[i] / 2.0 * t.resistive_share
                        })
                        .collect(),
                ),
            );
            partials.set(
                output,
                MODULATION_INDEX,
                Partial::Diagonal(
                    (0..n)
                        .map(|i| m[i].mask(d_modulation[i] * cos_phi, CLIPPED_GRADIENT))
                        .collect(),
                ),
            );
            partials.set(
                output,
                &self.power_factor,
                Partial::Column((0..n).map(|i| d_modulation[i] * m[i].value).collect()),
            );
            partials.set(
                output,
                device.resistance(),
                Partial::Diagonal(
                    terms
                        .iter()
                        .map(|t| t.resistive_factor * t.resistive_share)
                        .collect(),
                ),
            );
            partials.set(
                output,
                device.gate_voltage(),
                Partial::Diagonal(
                    terms
                        .iter()
                        .map(|t| t.voltage_factor * t.voltage_share)
                        .collect(),
                ),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    fn inputs(m: [f64; 3]) -> Variables {
        Variables::new()
            .with(AC_CURRENT, [100.0, 250.0, 180.0])
            .with(MODULATION_INDEX, m)
            .with(
                ComponentPaths::new(SUBSYSTEM, "rectifier_1").settings("power_factor"),
                [0.95],
            )
            .with("resistance_igbt", [1.2e-3, 1.3e-3, 1.4e-3])
            .with("resistance_diode", [1.0e-3, 1.1e-3, 1.2e-3])
            .with("gate_voltage_igbt", [0.9, 0.95, 1.0])
            .with("gate_voltage_diode", [1.1, 1.15, 1.2])
    }

    #[test]
    fn diode_losses_match_closed_form() {
        let component = PerformancesConductionLosses::new("rectifier_1", points(3));
        let outputs = evaluate(&component, &inputs([0.8, 0.9, 0.95]));

        let i_peak = SQRT_2 * 100.0;
        let mc = 0.8 * 0.95;
        let expected = 1.1 * i_peak / (2.0 * PI) * (1.0 + mc * PI / 4.0)
            + 1.0e-3 * i_peak * i_peak / 8.0 * (1.0 + mc * 8.0 / (3.0 * PI));
        assert_relative_eq!(
            outputs.get("conduction_losses_diode").unwrap()[0],
            expected,
            epsilon = 1e-9
        );

        // The IGBT only conducts the complement.
        let igbt = outputs.get("conduction_losses_IGBT").unwrap()[0];
        assert!(igbt < expected);
    }

    #[test]
    fn clipped_modulation_index_uses_stand_in_partial() {
        let component = PerformancesConductionLosses::new("rectifier_1", points(3));
        let at_bound = evaluate(&component, &inputs([0.5, MODULATION_INDEX_UPPER, 0.0]));
        let beyond = evaluate(&component, &inputs([0.5, 1.2, -0.3]));

        for device in Device::ALL {
            assert_eq!(
                at_bound.get(device.conduction_losses()).unwrap(),
                beyond.get(device.conduction_losses()).unwrap()
            );
        }

        let partials = component.jacobian(&inputs([0.5, 1.2, -0.3])).unwrap();
        let Some(Partial::Diagonal(d_m)) = partials.get("conduction_losses_diode", MODULATION_INDEX)
        else {
            panic!("diagonal partial expected");
        };
        assert!(d_m[0] > CLIPPED_GRADIENT);
        assert_eq!(d_m[1], CLIPPED_GRADIENT);
        assert_eq!(d_m[2], CLIPPED_GRADIENT);
    }

    #[test]
    fn partials() {
        let component = PerformancesConductionLosses::new("rectifier_1", points(3));
        assert_partials(&component, &inputs([0.3, 0.8, 0.99]));
        assert_partials(&component, &inputs([0.3, 1.2, -0.5]));
    }
}
