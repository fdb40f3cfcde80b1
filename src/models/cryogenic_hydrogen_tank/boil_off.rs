use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{CONDUCTION_HEAT, FUEL_BOIL_OFF, TIME_STEP};

/// Latent heat of vaporization of hydrogen at its normal boiling point, J/kg.
pub const LATENT_HEAT: f64 = 445_600.0;

/// Hydrogen boiled off during each time step, `Q * dt / h_fg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesBoilOff {
    number_of_points: NonZeroUsize,
}

impl PerformancesBoilOff {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self { number_of_points }
    }
}

impl ExplicitComponent for PerformancesBoilOff {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(CONDUCTION_HEAT, "W", Shape::Points)
            .val(100.0);
        interface.add_input(TIME_STEP, "s", Shape::Points);
        interface
            .add_output(FUEL_BOIL_OFF, "kg", Shape::Points)
            .val(0.0);

        interface.declare_partials(FUEL_BOIL_OFF, CONDUCTION_HEAT, Sparsity::Diagonal);
        interface.declare_partials(FUEL_BOIL_OFF, TIME_STEP, Sparsity::Diagonal);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let heat = inputs.array(CONDUCTION_HEAT, n)?;
        let time_step = inputs.array(TIME_STEP, n)?;

        outputs.set(
            FUEL_BOIL_OFF,
            heat.iter()
                .zip(time_step)
                .map(|(q, dt)| q * dt / LATENT_HEAT)
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let heat = inputs.array(CONDUCTION_HEAT, n)?;
        let time_step = inputs.array(TIME_STEP, n)?;

        partials.set(
            FUEL_BOIL_OFF,
            CONDUCTION_HEAT,
            Partial::Diagonal(time_step.iter().map(|dt| dt / LATENT_HEAT).collect()),
        );
        partials.set(
            FUEL_BOIL_OFF,
            TIME_STEP,
            Partial::Diagonal(heat.iter().map(|q| q / LATENT_HEAT).collect()),
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
    fn one_latent_heat_boils_one_kilogram() {
        let component = PerformancesBoilOff::new(points(3));
        let inputs = Variables::new()
            .with(CONDUCTION_HEAT, [445.6, 891.2, 0.0])
            .with(TIME_STEP, [1000.0, 250.0, 60.0]);

        let outputs = evaluate(&component, &inputs);
        let boil_off = outputs.get(FUEL_BOIL_OFF).unwrap();
        assert_relative_eq!(boil_off[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(boil_off[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(boil_off[2], 0.0);
        assert_partials(&component, &inputs);
    }
}
