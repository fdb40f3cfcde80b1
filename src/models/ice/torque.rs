use std::{f64::consts::PI, num::NonZeroUsize};

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{RPM, SHAFT_POWER};

const TORQUE: &str = "torque_out";

/// rad/s per rpm.
const RPM_TO_RAD_PER_S: f64 = 2.0 * PI / 60.0;

/// Shaft torque, `P / omega`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesTorque {
    number_of_points: NonZeroUsize,
}

impl PerformancesTorque {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self { number_of_points }
    }
}

impl ExplicitComponent for PerformancesTorque {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(SHAFT_POWER, "kW", Shape::Points);
        interface.add_input(RPM, "rpm", Shape::Points);
        interface
            .add_output(TORQUE, "N*m", Shape::Points)
            .val(300.0);
        interface.declare_partials(TORQUE, SHAFT_POWER, Sparsity::Diagonal);
        interface.declare_partials(TORQUE, RPM, Sparsity::Diagonal);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let power = inputs.array(SHAFT_POWER, n)?;
        let rpm = inputs.array(RPM, n)?;

        outputs.set(
            TORQUE,
            (0..n)
                .map(|i| power[i] * 1.0e3 / (rpm[i] * RPM_TO_RAD_PER_S))
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let power = inputs.array(SHAFT_POWER, n)?;
        let rpm = inputs.array(RPM, n)?;

        partials.set(
            TORQUE,
            SHAFT_POWER,
            Partial::Diagonal(rpm.iter().map(|r| 1.0e3 / (r * RPM_TO_RAD_PER_S)).collect()),
        );
        partials.set(
            TORQUE,
            RPM,
            Partial::Diagonal(
                (0..n)
                    .map(|i| -power[i] * 1.0e3 / (rpm[i] * rpm[i] * RPM_TO_RAD_PER_S))
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
    fn torque_at_rated_speed() {
        let component = PerformancesTorque::new(points(2));
        let inputs = Variables::new()
            .with(SHAFT_POWER, [100.0, 50.0])
            .with(RPM, [2700.0, 2400.0]);

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(outputs.get(TORQUE).unwrap()[0], 353.677, epsilon = 1e-3);
        assert_partials(&component, &inputs);
    }
}
