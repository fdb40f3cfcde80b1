use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{SFC, SHAFT_POWER};

const FUEL_CONSUMED: &str = "fuel_consumed_t";
const TIME_STEP: &str = "time_step";

/// g/kW/h × kW × s to kg.
const TO_KILOGRAMS: f64 = 1.0 / 3.6e6;

/// Fuel burnt during each time step, `sfc * P * dt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesFuelConsumed {
    number_of_points: NonZeroUsize,
}

impl PerformancesFuelConsumed {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self { number_of_points }
    }
}

impl ExplicitComponent for PerformancesFuelConsumed {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(SFC, "g/kW/h", Shape::Points);
        interface.add_input(SHAFT_POWER, "kW", Shape::Points);
        interface.add_input(TIME_STEP, "s", Shape::Points);
        interface
            .add_output(FUEL_CONSUMED, "kg", Shape::Points)
            .val(0.5);
        for wrt in [SFC, SHAFT_POWER, TIME_STEP] {
            interface.declare_partials(FUEL_CONSUMED, wrt, Sparsity::Diagonal);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let sfc = inputs.array(SFC, n)?;
        let power = inputs.array(SHAFT_POWER, n)?;
        let dt = inputs.array(TIME_STEP, n)?;

        outputs.set(
            FUEL_CONSUMED,
            (0..n)
                .map(|i| sfc[i] * power[i] * dt[i] * TO_KILOGRAMS)
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let sfc = inputs.array(SFC, n)?;
        let power = inputs.array(SHAFT_POWER, n)?;
        let dt = inputs.array(TIME_STEP, n)?;

        partials.set(
            FUEL_CONSUMED,
            SFC,
            Partial::Diagonal((0..n).map(|i| power[i] * dt[i] * TO_KILOGRAMS).collect()),
        );
        partials.set(
            FUEL_CONSUMED,
            SHAFT_POWER,
            Partial::Diagonal((0..n).map(|i| sfc[i] * dt[i] * TO_KILOGRAMS).collect()),
        );
        partials.set(
            FUEL_CONSUMED,
            TIME_STEP,
            Partial::Diagonal((0..n).map(|i| sfc[i] * power[i] * TO_KILOGRAMS).collect()),
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
    fn one_hour_at_hundred_kilowatts() {
        let component = PerformancesFuelConsumed::new(points(2));
        let inputs = Variables::new()
            .with(SFC, [250.0, 230.0])
            .with(SHAFT_POWER, [100.0, 80.0])
            .with(TIME_STEP, [3600.0, 60.0]);

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(outputs.get(FUEL_CONSUMED).unwrap()[0], 25.0, epsilon = 1e-12);
        assert_partials(&component, &inputs);
    }
}
