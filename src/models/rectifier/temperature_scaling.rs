use std::num::NonZeroUsize;

use crate::support::{
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    naming::ComponentPaths,
};

use super::{Device, SUBSYSTEM};

/// Which device characteristic is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Characteristic {
    Resistance,
    GateVoltage,
}

impl Characteristic {
    fn attribute(self) -> &'static str {
        match self {
            Characteristic::Resistance => "resistance",
            Characteristic::GateVoltage => "gate_voltage",
        }
    }

    fn units(self) -> &'static str {
        match self {
            Characteristic::Resistance => "ohm",
            Characteristic::GateVoltage => "V",
        }
    }

    fn output(self, device: Device) -> &'static str {
        match self {
            Characteristic::Resistance => device.resistance(),
            Characteristic::GateVoltage => device.gate_voltage(),
        }
    }
}

/// Device data paths for one characteristic.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Coefficients {
    device: Device,
    reference: String,
    temperature_reference: String,
    coefficient: String,
}

/// Linear temperature dependence of a device characteristic:
/// `x(T) = x_ref * (1 + alpha * (T - T_ref))`, per device.
///
/// Used for the on-state resistances and the threshold (gate) voltages of
/// both the IGBT and the diode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesTemperatureScaling {
    characteristic: Characteristic,
    devices: Vec<Coefficients>,
    number_of_points: NonZeroUsize,
}

impl PerformancesTemperatureScaling {
    /// On-state resistances `resistance_igbt` and `resistance_diode`.
    #[must_use]
    pub fn resistances(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self::new(Characteristic::Resistance, id, number_of_points)
    }

    /// Threshold voltages `gate_voltage_igbt` and `gate_voltage_diode`.
    #[must_use]
    pub fn gate_voltages(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self::new(Characteristic::GateVoltage, id, number_of_points)
    }

    fn new(characteristic: Characteristic, id: &str, number_of_points: NonZeroUsize) -> Self {
        let paths = ComponentPaths::new(SUBSYSTEM, id);
        let attribute = characteristic.attribute();
        let devices = Device::ALL
            .into_iter()
            .map(|device| Coefficients {
                device,
                reference: paths.data(&format!("{}:{attribute}", device.key())),
                temperature_reference: paths
                    .data(&format!("{}:temperature_reference", device.key())),
                coefficient: paths.data(&format!(
                    "{}:{attribute}_temperature_coefficient",
                    device.key()
                )),
            })
            .collect();

        Self {
            characteristic,
            devices,
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesTemperatureScaling {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        let units = self.characteristic.units();

        for coefficients in &self.devices {
            let temperature = coefficients.device.temperature();
            let output = self.characteristic.output(coefficients.device);

            interface.add_input(temperature, "degK", Shape::Points);
            interface.add_input(&coefficients.reference, units, Shape::Scalar);
            interface
                .add_input(&coefficients.temperature_reference, "degK", Shape::Scalar)
                .val(298.15);
            interface.add_input(&coefficients.coefficient, "degK**-1", Shape::Scalar);
            interface.add_output(output, units, Shape::Points);

            interface.declare_partials(output, temperature, Sparsity::Diagonal);
            for wrt in [
                &coefficients.reference,
                &coefficients.temperature_reference,
                &coefficients.coefficient,
            ] {
                interface.declare_partials(output, wrt, Sparsity::Column);
            }
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        for coefficients in &self.devices {
            let temperature = inputs.array(coefficients.device.temperature(), n)?;
            let reference = inputs.scalar(&coefficients.reference)?;
            let t_ref = inputs.scalar(&coefficients.temperature_reference)?;
            let alpha = inputs.scalar(&coefficients.coefficient)?;

            let values: Vec<f64> = temperature
                .iter()
                .map(|t| reference * (1.0 + alpha * (t - t_ref)))
                .collect();
            outputs.set(self.characteristic.output(coefficients.device), values);
        }
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        for coefficients in &self.devices {
            let temperature = inputs.array(coefficients.device.temperature(), n)?;
            let reference = inputs.scalar(&coefficients.reference)?;
            let t_ref = inputs.scalar(&coefficients.temperature_reference)?;
            let alpha = inputs.scalar(&coefficients.coefficient)?;
            let output = self.characteristic.output(coefficients.device);

            partials.set(
                output,
                coefficients.device.temperature(),
                Partial::Diagonal(vec![reference * alpha; n]),
            );
            partials.set(
                output,
                &coefficients.reference,
                Partial::Column(
                    temperature
                        .iter()
                        .map(|t| 1.0 + alpha * (t - t_ref))
                        .collect(),
                ),
            );
            partials.set(
                output,
                &coefficients.temperature_reference,
                Partial::Column(vec![-reference * alpha; n]),
            );
            partials.set(
                output,
                &coefficients.coefficient,
                Partial::Column(temperature.iter().map(|t| reference * (t - t_ref)).collect()),
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

    fn inputs(attribute: &str, reference: [f64; 2]) -> Variables {
        let paths = ComponentPaths::new(SUBSYSTEM, "rectifier_1");
        let mut inputs = Variables::new()
            .with("IGBT_temperature", [298.15, 373.15, 423.15])
            .with("diode_temperature", [298.15, 350.0, 400.0]);
        for (device, reference) in Device::ALL.into_iter().zip(reference) {
            let key = device.key();
            inputs.set(paths.data(&format!("{key}:{attribute}")), [reference]);
            inputs.set(paths.data(&format!("{key}:temperature_reference")), [298.15]);
            inputs.set(
                paths.data(&format!("{key}:{attribute}_temperature_coefficient")),
                [0.004],
            );
        }
        inputs
    }

    #[test]
    fn resistance_grows_with_temperature() {
        let component = PerformancesTemperatureScaling::resistances("rectifier_1", points(3));
        let inputs = inputs("resistance", [1.0e-3, 1.5e-3]);

        let outputs = evaluate(&component, &inputs);
        let r_igbt = outputs.get("resistance_igbt").unwrap();
        assert_relative_eq!(r_igbt[0], 1.0e-3);
        assert_relative_eq!(r_igbt[1], 1.0e-3 * 1.3, epsilon = 1e-12);
        assert_relative_eq!(
            outputs.get("resistance_diode").unwrap()[0],
            1.5e-3
        );

        assert!(component.interface().validate().is_ok());
        assert_partials(&component, &inputs);
    }

    #[test]
    fn gate_voltages_use_their_own_coefficients() {
        let component = PerformancesTemperatureScaling::gate_voltages("rectifier_1", points(3));
        let inputs = inputs("gate_voltage", [0.9, 1.1]);

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(outputs.get("gate_voltage_diode").unwrap()[0], 1.1);
        assert_partials(&component, &inputs);
    }
}
