use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{CURRENT_RMS, LOSSES, RESISTANCE, paths};

/// Joule losses in the winding, `R * I_rms^2`. Core losses are neglected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesCopperLosses {
    resistance: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesCopperLosses {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            resistance: paths(id).data(RESISTANCE),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesCopperLosses {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(&self.resistance, "ohm", Shape::Scalar);
        interface
            .add_input(CURRENT_RMS, "A", Shape::Points)
            .val(100.0);
        interface.add_output(LOSSES, "W", Shape::Points).val(10.0);

        interface.declare_partials(LOSSES, &self.resistance, Sparsity::Column);
        interface.declare_partials(LOSSES, CURRENT_RMS, Sparsity::Diagonal);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let r = inputs.scalar(&self.resistance)?;
        let current = inputs.array(CURRENT_RMS, self.number_of_points.get())?;
        outputs.set(
            LOSSES,
            current.iter().map(|i| r * i * i).collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let r = inputs.scalar(&self.resistance)?;
        let current = inputs.array(CURRENT_RMS, self.number_of_points.get())?;
        partials.set(
            LOSSES,
            &self.resistance,
            Partial::Column(current.iter().map(|i| i * i).collect()),
        );
        partials.set(
            LOSSES,
            CURRENT_RMS,
            Partial::Diagonal(current.iter().map(|i| 2.0 * r * i).collect()),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::test_support::{assert_partials, evaluate, points};

    #[test]
    fn quadratic_in_current() {
        let inputs = Variables::new()
            .with(paths("inductor_1").data(RESISTANCE), [0.01])
            .with(CURRENT_RMS, [0.0, 100.0, -200.0]);

        let component = PerformancesCopperLosses::new("inductor_1", points(3));
        let outputs = evaluate(&component, &inputs);
        assert_eq!(outputs.get(LOSSES).unwrap(), [0.0, 100.0, 400.0].as_slice());
        assert_partials(&component, &inputs);
    }
}
