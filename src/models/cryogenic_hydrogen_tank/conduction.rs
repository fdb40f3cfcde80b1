use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{CONDUCTION_HEAT, SKIN_TEMPERATURE, THERMAL_RESISTANCE, paths};

/// Saturation temperature of liquid hydrogen at one atmosphere, K.
pub const STORAGE_TEMPERATURE: f64 = 20.3;

/// Heat conducted through the wall into the fuel, `(T_skin - T_storage) / R`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformancesConductionHeat {
    thermal_resistance: String,
    storage_temperature: f64,
    number_of_points: NonZeroUsize,
}

impl PerformancesConductionHeat {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            thermal_resistance: paths(id).data(THERMAL_RESISTANCE),
            storage_temperature: STORAGE_TEMPERATURE,
            number_of_points,
        }
    }

    /// Stores the fuel at another temperature, e.g. pressurised tanks.
    #[must_use]
    pub fn with_storage_temperature(mut self, storage_temperature: f64) -> Self {
        self.storage_temperature = storage_temperature;
        self
    }
}

impl ExplicitComponent for PerformancesConductionHeat {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(SKIN_TEMPERATURE, "degK", Shape::Points)
            .val(250.0);
        interface.add_input(&self.thermal_resistance, "K/W", Shape::Scalar);
        interface
            .add_output(CONDUCTION_HEAT, "W", Shape::Points)
            .val(100.0);

        interface.declare_partials(CONDUCTION_HEAT, SKIN_TEMPERATURE, Sparsity::Diagonal);
        interface.declare_partials(CONDUCTION_HEAT, &self.thermal_resistance, Sparsity::Column);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let t_skin = inputs.array(SKIN_TEMPERATURE, self.number_of_points.get())?;
        let r = inputs.scalar(&self.thermal_resistance)?;
        outputs.set(
            CONDUCTION_HEAT,
            t_skin
                .iter()
                .map(|t| (t - self.storage_temperature) / r)
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let t_skin = inputs.array(SKIN_TEMPERATURE, n)?;
        let r = inputs.scalar(&self.thermal_resistance)?;

        partials.set(
            CONDUCTION_HEAT,
            SKIN_TEMPERATURE,
            Partial::Diagonal(vec![1.0 / r; n]),
        );
        partials.set(
            CONDUCTION_HEAT,
            &self.thermal_resistance,
            Partial::Column(
                t_skin
                    .iter()
                    .map(|t| -(t - self.storage_temperature) / (r * r))
                    .collect(),
            ),
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
    fn conducts_towards_the_fuel() {
        let inputs = Variables::new()
            .with(SKIN_TEMPERATURE, [220.3, 120.3])
            .with(paths("tank_1").data(THERMAL_RESISTANCE), [0.5]);

        let component = PerformancesConductionHeat::new("tank_1", points(2));
        let q = evaluate(&component, &inputs);
        assert_relative_eq!(q.get(CONDUCTION_HEAT).unwrap()[0], 400.0, epsilon = 1e-9);
        assert_relative_eq!(q.get(CONDUCTION_HEAT).unwrap()[1], 200.0, epsilon = 1e-9);
        assert_partials(&component, &inputs);

        let warmer = PerformancesConductionHeat::new("tank_1", points(2)).with_storage_temperature(120.3);
        let q = evaluate(&warmer, &inputs);
        assert_relative_eq!(q.get(CONDUCTION_HEAT).unwrap()[1], 0.0, epsilon = 1e-9);
    }
}
