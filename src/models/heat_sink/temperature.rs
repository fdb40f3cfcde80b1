use std::num::NonZeroUsize;

use crate::support::{
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    mission::MissionAdaptor,
};

use super::{COOLANT_TEMPERATURE, HEAT, TEMPERATURE, THERMAL_RESISTANCE, paths};

/// Heat sink temperature held at one value over the mission.
#[must_use]
pub fn temperature_fixed(id: &str, number_of_points: NonZeroUsize) -> MissionAdaptor {
    MissionAdaptor::new(
        paths(id).data("temperature_mission"),
        TEMPERATURE,
        "degK",
        number_of_points,
    )
    .with_description("heat sink temperature")
}

/// Plate temperature, `T_coolant + Q * R_th`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesTemperature {
    thermal_resistance: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesTemperature {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            thermal_resistance: paths(id).data(THERMAL_RESISTANCE),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesTemperature {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(COOLANT_TEMPERATURE, "degK", Shape::Points)
            .val(300.0);
        interface.add_input(HEAT, "W", Shape::Points).val(1000.0);
        interface.add_input(&self.thermal_resistance, "K/W", Shape::Scalar);
        interface
            .add_output(TEMPERATURE, "degK", Shape::Points)
            .val(320.0);

        interface
            .declare_partials(TEMPERATURE, COOLANT_TEMPERATURE, Sparsity::Diagonal)
            .constant(1.0);
        interface.declare_partials(TEMPERATURE, HEAT, Sparsity::Diagonal);
        interface.declare_partials(TEMPERATURE, &self.thermal_resistance, Sparsity::Column);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let coolant = inputs.array(COOLANT_TEMPERATURE, n)?;
        let heat = inputs.array(HEAT, n)?;
        let r = inputs.scalar(&self.thermal_resistance)?;

        outputs.set(
            TEMPERATURE,
            coolant
                .iter()
                .zip(heat)
                .map(|(t, q)| t + q * r)
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let heat = inputs.array(HEAT, n)?;
        let r = inputs.scalar(&self.thermal_resistance)?;

        partials.set(TEMPERATURE, HEAT, Partial::Diagonal(vec![r; n]));
        partials.set(
            TEMPERATURE,
            &self.thermal_resistance,
            Partial::Column(heat.to_vec()),
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
    fn rises_above_coolant_with_heat() {
        let inputs = Variables::new()
            .with(COOLANT_TEMPERATURE, [300.0, 310.0])
            .with(HEAT, [2000.0, 0.0])
            .with(paths("heat_sink_1").data(THERMAL_RESISTANCE), [0.01]);

        let component = PerformancesTemperature::new("heat_sink_1", points(2));
        let t = evaluate(&component, &inputs).get(TEMPERATURE).unwrap().to_vec();
        assert_relative_eq!(t[0], 320.0, epsilon = 1e-9);
        assert_relative_eq!(t[1], 310.0);
        assert_partials(&component, &inputs);
    }

    #[test]
    fn fixed_temperature_broadcasts() {
        let adaptor = temperature_fixed("heat_sink_1", points(4));
        let inputs =
            Variables::new().with(paths("heat_sink_1").data("temperature_mission"), [325.0]);
        let t = evaluate(&adaptor, &inputs);
        assert_eq!(t.get(TEMPERATURE).unwrap(), [325.0; 4].as_slice());
    }
}
