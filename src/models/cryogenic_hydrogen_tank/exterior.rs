use std::num::NonZeroUsize;

use crate::support::{
    atmosphere::{Sample, sample},
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
};

use super::{
    ALTITUDE, EXTERIOR_TEMPERATURE, KINEMATIC_VISCOSITY, PRANDTL_NUMBER, THERMAL_CONDUCTIVITY,
};

/// Specific heat of air at constant pressure, J/kg/K.
const AIR_SPECIFIC_HEAT: f64 = 1004.5;

/// Free-stream air properties along the mission, from the standard
/// atmosphere.
///
/// The Prandtl number is `mu * cp / k` with Sutherland viscosity and a
/// constant specific heat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesExteriorConditions {
    number_of_points: NonZeroUsize,
}

impl PerformancesExteriorConditions {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self { number_of_points }
    }

    fn samples(&self, inputs: &Variables) -> ComponentResult<Vec<Sample>> {
        let altitude = inputs.array(ALTITUDE, self.number_of_points.get())?;
        Ok(altitude.iter().map(|h| sample(*h)).collect())
    }
}

fn prandtl(s: &Sample) -> (f64, f64) {
    let (mu, k) = (s.value.dynamic_viscosity, s.value.thermal_conductivity);
    let (d_mu, d_k) = (s.d_altitude.dynamic_viscosity, s.d_altitude.thermal_conductivity);
    (
        mu * AIR_SPECIFIC_HEAT / k,
        AIR_SPECIFIC_HEAT * (d_mu * k - mu * d_k) / (k * k),
    )
}

const OUTPUTS: [(&str, &str); 4] = [
    (EXTERIOR_TEMPERATURE, "degK"),
    (KINEMATIC_VISCOSITY, "m**2/s"),
    (THERMAL_CONDUCTIVITY, "W/m/K"),
    (PRANDTL_NUMBER, "unitless"),
];

impl ExplicitComponent for PerformancesExteriorConditions {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(ALTITUDE, "m", Shape::Points).val(0.0);
        for (output, units) in OUTPUTS {
            interface.add_output(output, units, Shape::Points);
            interface.declare_partials(output, ALTITUDE, Sparsity::Diagonal);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let samples = self.samples(inputs)?;
        outputs.set(
            EXTERIOR_TEMPERATURE,
            samples.iter().map(|s| s.value.temperature).collect::<Vec<_>>(),
        );
        outputs.set(
            KINEMATIC_VISCOSITY,
            samples
                .iter()
                .map(|s| s.value.kinematic_viscosity)
                .collect::<Vec<_>>(),
        );
        outputs.set(
            THERMAL_CONDUCTIVITY,
            samples
                .iter()
                .map(|s| s.value.thermal_conductivity)
                .collect::<Vec<_>>(),
        );
        outputs.set(
            PRANDTL_NUMBER,
            samples.iter().map(|s| prandtl(s).0).collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let samples = self.samples(inputs)?;
        partials.set(
            EXTERIOR_TEMPERATURE,
            ALTITUDE,
            Partial::Diagonal(samples.iter().map(|s| s.d_altitude.temperature).collect()),
        );
        partials.set(
            KINEMATIC_VISCOSITY,
            ALTITUDE,
            Partial::Diagonal(
                samples
                    .iter()
                    .map(|s| s.d_altitude.kinematic_viscosity)
                    .collect(),
            ),
        );
        partials.set(
            THERMAL_CONDUCTIVITY,
            ALTITUDE,
            Partial::Diagonal(
                samples
                    .iter()
                    .map(|s| s.d_altitude.thermal_conductivity)
                    .collect(),
            ),
        );
        partials.set(
            PRANDTL_NUMBER,
            ALTITUDE,
            Partial::Diagonal(samples.iter().map(|s| prandtl(s).1).collect()),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    #[test]
    fn sea_level_air() {
        let component = PerformancesExteriorConditions::new(points(1));
        let outputs = evaluate(&component, &Variables::new().with(ALTITUDE, [0.0]));

        assert_relative_eq!(outputs.get(EXTERIOR_TEMPERATURE).unwrap()[0], 288.15);
        assert_relative_eq!(
            outputs.get(PRANDTL_NUMBER).unwrap()[0],
            0.71,
            epsilon = 0.01
        );
    }

    #[test]
    fn partials_along_a_climb() {
        let component = PerformancesExteriorConditions::new(points(4));
        let inputs = Variables::new().with(ALTITUDE, [100.0, 2_000.0, 7_500.0, 13_000.0]);
        assert_partials(&component, &inputs);
    }
}
