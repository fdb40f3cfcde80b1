use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Shape, Sparsity, Variables,
};

use super::{Device, LOSSES};

/// Total rectifier losses, three legs of switching plus conduction losses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesLosses {
    number_of_points: NonZeroUsize,
}

impl PerformancesLosses {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self { number_of_points }
    }

    fn per_leg() -> impl Iterator<Item = &'static str> {
        Device::ALL
            .into_iter()
            .flat_map(|device| [device.switching_losses(), device.conduction_losses()])
    }
}

impl ExplicitComponent for PerformancesLosses {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_output(LOSSES, "W", Shape::Points)
            .val(1.0e3);
        for wrt in Self::per_leg() {
            interface.add_input(wrt, "W", Shape::Points);
            interface
                .declare_partials(LOSSES, wrt, Sparsity::Diagonal)
                .constant(3.0);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let mut total = vec![0.0; n];
        for name in Self::per_leg() {
            for (sum, value) in total.iter_mut().zip(inputs.array(name, n)?) {
                *sum += 3.0 * value;
            }
        }
        outputs.set(LOSSES, total);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    #[test]
    fn three_legs() {
        let component = PerformancesLosses::new(points(2));
        let inputs = Variables::new()
            .with("switching_losses_IGBT", [100.0, 50.0])
            .with("conduction_losses_IGBT", [40.0, 20.0])
            .with("switching_losses_diode", [30.0, 10.0])
            .with("conduction_losses_diode", [80.0, 30.0]);

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(outputs.get(LOSSES).unwrap()[0], 750.0);
        assert_relative_eq!(outputs.get(LOSSES).unwrap()[1], 330.0);
        assert_partials(&component, &inputs);
    }
}
