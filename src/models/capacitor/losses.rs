use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{CURRENT_RMS, LOSSES, paths};

/// Losses in the equivalent series resistance, `ESR * I_rms^2`, with
/// `I_rms` the ripple current through the capacitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesEsrLosses {
    esr: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesEsrLosses {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            esr: paths(id).data("esr"),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesEsrLosses {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(&self.esr, "ohm", Shape::Scalar);
        interface
            .add_input(CURRENT_RMS, "A", Shape::Points)
            .val(20.0);
        interface.add_output(LOSSES, "W", Shape::Points).val(10.0);

        interface.declare_partials(LOSSES, &self.esr, Sparsity::Column);
        interface.declare_partials(LOSSES, CURRENT_RMS, Sparsity::Diagonal);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let r = inputs.scalar(&self.esr)?;
        let current = inputs.array(CURRENT_RMS, self.number_of_points.get())?;
        outputs.set(
            LOSSES,
            current.iter().map(|i| r * i * i).collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let r = inputs.scalar(&self.esr)?;
        let current = inputs.array(CURRENT_RMS, self.number_of_points.get())?;
        partials.set(
            LOSSES,
            &self.esr,
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

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    #[test]
    fn ripple_current_heats_the_esr() {
        let inputs = Variables::new()
            .with(paths("capacitor_1").data("esr"), [2.5e-3])
            .with(CURRENT_RMS, [40.0, 0.0]);

        let component = PerformancesEsrLosses::new("capacitor_1", points(2));
        let losses = evaluate(&component, &inputs).get(LOSSES).unwrap().to_vec();
        assert_relative_eq!(losses[0], 4.0, max_relative = 1e-12);
        assert_relative_eq!(losses[1], 0.0);
        assert_partials(&component, &inputs);
    }
}
