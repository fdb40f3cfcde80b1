use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{LENGTH, THERMAL_RESISTANCE, WIDTH, paths};

/// Convective resistance between plate and coolant, `1 / (h * L * W)`.
/// Conduction through the plate itself is neglected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingThermalResistance {
    length: String,
    width: String,
    coefficient: String,
    resistance: String,
}

impl SizingThermalResistance {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            length: paths.data(LENGTH),
            width: paths.data(WIDTH),
            coefficient: paths.settings("heat_transfer_coefficient"),
            resistance: paths.data(THERMAL_RESISTANCE),
        }
    }
}

impl ExplicitComponent for SizingThermalResistance {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.length, "m", Shape::Scalar);
        interface.add_input(&self.width, "m", Shape::Scalar);
        interface
            .add_input(&self.coefficient, "W/m**2/K", Shape::Scalar)
            .val(2000.0)
            .desc("liquid-cooled plate");
        interface
            .add_output(&self.resistance, "K/W", Shape::Scalar)
            .val(0.01);
        for wrt in [&self.length, &self.width, &self.coefficient] {
            interface.declare_partials(&self.resistance, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let l = inputs.scalar(&self.length)?;
        let w = inputs.scalar(&self.width)?;
        let h = inputs.scalar(&self.coefficient)?;
        outputs.set(&self.resistance, [1.0 / (h * l * w)]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let l = inputs.scalar(&self.length)?;
        let w = inputs.scalar(&self.width)?;
        let h = inputs.scalar(&self.coefficient)?;
        let r = 1.0 / (h * l * w);

        partials.set(&self.resistance, &self.length, Partial::scalar(-r / l));
        partials.set(&self.resistance, &self.width, Partial::scalar(-r / w));
        partials.set(&self.resistance, &self.coefficient, Partial::scalar(-r / h));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate};

    #[test]
    fn plate_resistance() {
        let paths = paths("heat_sink_1");
        let inputs = Variables::new()
            .with(paths.data(LENGTH), [0.25])
            .with(paths.data(WIDTH), [0.2])
            .with(paths.settings("heat_transfer_coefficient"), [2000.0]);

        let component = SizingThermalResistance::new("heat_sink_1");
        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(
            outputs.scalar(&paths.data(THERMAL_RESISTANCE)).unwrap(),
            0.01,
            max_relative = 1e-12
        );
        assert_partials(&component, &inputs);
    }
}
