use std::{f64::consts::SQRT_2, num::NonZeroUsize};

use crate::support::{
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    naming::ComponentPaths,
};

use super::{AC_CURRENT, DC_VOLTAGE, Device, SUBSYSTEM, SWITCHING_FREQUENCY};

/// Quadratic fit of a switching energy in the peak current,
/// `E(I) = a + b * I + c * I^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EnergyFit {
    a: String,
    b: String,
    c: String,
}

impl EnergyFit {
    fn new(paths: &ComponentPaths, device: Device, energy: &str) -> Self {
        let key = device.key();
        Self {
            a: paths.data(&format!("{key}:{energy}:a")),
            b: paths.data(&format!("{key}:{energy}:b")),
            c: paths.data(&format!("{key}:{energy}:c")),
        }
    }

    fn declare(&self, interface: &mut Interface, output: &str) {
        interface.add_input(&self.a, "J", Shape::Scalar);
        interface.add_input(&self.b, "J/A", Shape::Scalar);
        interface.add_input(&self.c, "J/A**2", Shape::Scalar);
        for wrt in [&self.a, &self.b, &self.c] {
            interface.declare_partials(output, wrt, Sparsity::Column);
        }
    }

    fn coefficients(&self, inputs: &Variables) -> ComponentResult<[f64; 3]> {
        Ok([
            inputs.scalar(&self.a)?,
            inputs.scalar(&self.b)?,
            inputs.scalar(&self.c)?,
        ])
    }
}

fn energy([a, b, c]: [f64; 3], current: f64) -> f64 {
    a + b * current + c * current * current
}

fn d_energy([_, b, c]: [f64; 3], current: f64) -> f64 {
    b + 2.0 * c * current
}

/// Energies dissipated by one device at each commutation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DeviceEnergies {
    device: Device,
    fits: Vec<EnergyFit>,
}

/// Switching losses of one rectifier leg.
///
/// `P_igbt = f * (E_on + E_off) * V_dc / V_ref` and
/// `P_diode = f * E_rr * V_dc / V_ref`, with energies fitted in the peak
/// phase current at the characterisation voltage `V_ref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesSwitchingLosses {
    voltage_reference: String,
    devices: Vec<DeviceEnergies>,
    number_of_points: NonZeroUsize,
}

impl PerformancesSwitchingLosses {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        let paths = ComponentPaths::new(SUBSYSTEM, id);
        let devices = vec![
            DeviceEnergies {
                device: Device::Igbt,
                fits: vec![
                    EnergyFit::new(&paths, Device::Igbt, "energy_on"),
                    EnergyFit::new(&paths, Device::Igbt, "energy_off"),
                ],
            },
            DeviceEnergies {
                device: Device::Diode,
                fits: vec![EnergyFit::new(&paths, Device::Diode, "energy_rr")],
            },
        ];
        Self {
            voltage_reference: paths.data("voltage_reference"),
            devices,
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesSwitchingLosses {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(AC_CURRENT, "A", Shape::Points);
        interface.add_input(SWITCHING_FREQUENCY, "Hz", Shape::Points);
        interface.add_input(DC_VOLTAGE, "V", Shape::Points);
        interface.add_input(&self.voltage_reference, "V", Shape::Scalar);

        for energies in &self.devices {
            let output = energies.device.switching_losses();
            interface.add_output(output, "W", Shape::Points);
            for wrt in [AC_CURRENT, SWITCHING_FREQUENCY, DC_VOLTAGE] {
                interface.declare_partials(output, wrt, Sparsity::Diagonal);
            }
            interface.declare_partials(output, &self.voltage_reference, Sparsity::Column);
            for fit in &energies.fits {
                fit.declare(&mut interface, output);
            }
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let current = inputs.array(AC_CURRENT, n)?;
        let frequency = inputs.array(SWITCHING_FREQUENCY, n)?;
        let voltage = inputs.array(DC_VOLTAGE, n)?;
        let v_ref = inputs.scalar(&self.voltage_reference)?;

        for energies in &self.devices {
            let fits = energies
                .fits
                .iter()
                .map(|fit| fit.coefficients(inputs))
                .collect::<ComponentResult<Vec<_>>>()?;

            let losses: Vec<f64> = (0..n)
                .map(|i| {
                    let peak = SQRT_2 * current[i];
                    let total: f64 = fits.iter().map(|fit| energy(*fit, peak)).sum();
                    frequency[i] * total * voltage[i] / v_ref
                })
                .collect();
            outputs.set(energies.device.switching_losses(), losses);
        }
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let current = inputs.array(AC_CURRENT, n)?;
        let frequency = inputs.array(SWITCHING_FREQUENCY, n)?;
        let voltage = inputs.array(DC_VOLTAGE, n)?;
        let v_ref = inputs.scalar(&self.voltage_reference)?;

        for energies in &self.devices {
            let output = energies.device.switching_losses();
            let fits = energies
                .fits
                .iter()
                .map(|fit| fit.coefficients(inputs))
                .collect::<ComponentResult<Vec<_>>>()?;

            let peak: Vec<f64> = current.iter().map(|i| SQRT_2 * i).collect();
            let total: Vec<f64> = peak
                .iter()
                .map(|p| fits.iter().map(|fit| energy(*fit, *p)).sum())
                .collect();
            // f * V_dc / V_ref, the factor applied to every energy.
            let scale: Vec<f64> = (0..n).map(|i| frequency[i] * voltage[i] / v_ref).collect();

            partials.set(
                output,
                AC_CURRENT,
                Partial::Diagonal(
                    (0..n)
                        .map(|i| {
                            let slope: f64 = fits.iter().map(|fit| d_energy(*fit, peak[i])).sum();
                            scale[i] * slope * SQRT_2
                        })
                        .collect(),
                ),
            );
            partials.set(
                output,
                SWITCHING_FREQUENCY,
                Partial::Diagonal((0..n).map(|i| total[i] * voltage[i] / v_ref).collect()),
            );
            partials.set(
                output,
                DC_VOLTAGE,
                Partial::Diagonal((0..n).map(|i| frequency[i] * total[i] / v_ref).collect()),
            );
            partials.set(
                output,
                &self.voltage_reference,
                Partial::Column(
                    (0..n)
                        .map(|i| -frequency[i] * total[i] * voltage[i] / (v_ref * v_ref))
                        .collect(),
                ),
            );

            for fit in &energies.fits {
                partials.set(output, &fit.a, Partial::Column(scale.clone()));
                partials.set(
                    output,
                    &fit.b,
                    Partial::Column((0..n).map(|i| scale[i] * peak[i]).collect()),
                );
                partials.set(
                    output,
                    &fit.c,
                    Partial::Column((0..n).map(|i| scale[i] * peak[i] * peak[i]).collect()),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    fn inputs() -> Variables {
        let paths = ComponentPaths::new(SUBSYSTEM, "rectifier_1");
        let mut inputs = Variables::new()
            .with(AC_CURRENT, [100.0, 200.0])
            .with(SWITCHING_FREQUENCY, [12.0e3, 10.0e3])
            .with(DC_VOLTAGE, [600.0, 800.0])
            .with(paths.data("voltage_reference"), [600.0]);
        for (key, energy, [a, b, c]) in [
            ("igbt", "energy_on", [0.0, 1.0e-4, 1.0e-7]),
            ("igbt", "energy_off", [1.0e-3, 5.0e-5, 2.0e-7]),
            ("diode", "energy_rr", [5.0e-4, 8.0e-5, -1.0e-8]),
        ] {
            inputs.set(paths.data(&format!("{key}:{energy}:a")), [a]);
            inputs.set(paths.data(&format!("{key}:{energy}:b")), [b]);
            inputs.set(paths.data(&format!("{key}:{energy}:c")), [c]);
        }
        inputs
    }

    #[test]
    fn losses_scale_with_frequency_and_voltage() {
        let component = PerformancesSwitchingLosses::new("rectifier_1", points(2));
        let outputs = evaluate(&component, &inputs());

        let peak = SQRT_2 * 100.0;
        let e_on = 1.0e-4 * peak + 1.0e-7 * peak * peak;
        let e_off = 1.0e-3 + 5.0e-5 * peak + 2.0e-7 * peak * peak;
        assert_relative_eq!(
            outputs.get("switching_losses_IGBT").unwrap()[0],
            12.0e3 * (e_on + e_off),
            epsilon = 1e-9
        );

        let e_rr = 5.0e-4 + 8.0e-5 * peak - 1.0e-8 * peak * peak;
        assert_relative_eq!(
            outputs.get("switching_losses_diode").unwrap()[0],
            12.0e3 * e_rr,
            epsilon = 1e-9
        );
    }

    #[test]
    fn partials() {
        let component = PerformancesSwitchingLosses::new("rectifier_1", points(2));
        assert_partials(&component, &inputs());
    }
}
