use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{DC_CURRENT, DC_VOLTAGE, EFFICIENCY, LOSSES};

/// Efficiency from losses, `P_out / (P_out + losses)` with
/// `P_out = V_dc * I_dc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesEfficiency {
    number_of_points: NonZeroUsize,
}

impl PerformancesEfficiency {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self { number_of_points }
    }
}

impl ExplicitComponent for PerformancesEfficiency {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(DC_VOLTAGE, "V", Shape::Points);
        interface.add_input(DC_CURRENT, "A", Shape::Points);
        interface.add_input(LOSSES, "W", Shape::Points);
        interface
            .add_output(EFFICIENCY, "unitless", Shape::Points)
            .val(0.98)
            .lower(0.0)
            .upper(1.0);
        for wrt in [DC_VOLTAGE, DC_CURRENT, LOSSES] {
            interface.declare_partials(EFFICIENCY, wrt, Sparsity::Diagonal);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let voltage = inputs.array(DC_VOLTAGE, n)?;
        let current = inputs.array(DC_CURRENT, n)?;
        let losses = inputs.array(LOSSES, n)?;

        outputs.set(
            EFFICIENCY,
            (0..n)
                .map(|i| {
                    let power = voltage[i] * current[i];
                    power / (power + losses[i])
                })
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let voltage = inputs.array(DC_VOLTAGE, n)?;
        let current = inputs.array(DC_CURRENT, n)?;
        let losses = inputs.array(LOSSES, n)?;

        let mut d_voltage = Vec::with_capacity(n);
        let mut d_current = Vec::with_capacity(n);
        let mut d_losses = Vec::with_capacity(n);
        for i in 0..n {
            let power = voltage[i] * current[i];
            let total = power + losses[i];
            let d_power = losses[i] / (total * total);
            d_voltage.push(d_power * current[i]);
            d_current.push(d_power * voltage[i]);
            d_losses.push(-power / (total * total));
        }

        partials.set(EFFICIENCY, DC_VOLTAGE, Partial::Diagonal(d_voltage));
        partials.set(EFFICIENCY, DC_CURRENT, Partial::Diagonal(d_current));
        partials.set(EFFICIENCY, LOSSES, Partial::Diagonal(d_losses));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    #[test]
    fn efficiency_from_losses() {
        let component = PerformancesEfficiency::new(points(2));
        let inputs = Variables::new()
            .with(DC_VOLTAGE, [800.0, 600.0])
            .with(DC_CURRENT, [245.0, 100.0])
            .with(LOSSES, [4000.0, 1500.0]);

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(outputs.get(EFFICIENCY).unwrap()[0], 0.98);
        assert_relative_eq!(outputs.get(EFFICIENCY).unwrap()[1], 60.0 / 61.5);
        assert_partials(&component, &inputs);
    }
}
