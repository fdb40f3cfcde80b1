use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{CURRENT_CALIBER, CURRENT_DENSITY, NUMBER_OF_TURNS, RESISTANCE, paths};

/// Resistivity of annealed copper at 20 °C, ohm·m.
pub const COPPER_RESISTIVITY: f64 = 1.72e-8;

/// DC resistance of the winding.
///
/// The conductor section carries the rated current at the design current
/// density, `A_wire = I / J`, so
/// `R = rho * N * l_turn / A_wire = rho * N * l_turn * J / I`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingCopperResistance {
    turns: String,
    turn_length: String,
    current: String,
    current_density: String,
    resistance: String,
}

impl SizingCopperResistance {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            turns: paths.data(NUMBER_OF_TURNS),
            turn_length: paths.data("mean_turn_length"),
            current: paths.data(CURRENT_CALIBER),
            current_density: paths.settings(CURRENT_DENSITY),
            resistance: paths.data(RESISTANCE),
        }
    }

    fn factors(&self) -> [(&str, f64); 4] {
        [
            (self.turns.as_str(), 1.0),
            (self.turn_length.as_str(), 1.0),
            (self.current_density.as_str(), 1.0),
            (self.current.as_str(), -1.0),
        ]
    }

    fn value(&self, inputs: &Variables) -> ComponentResult<f64> {
        let n = inputs.scalar(&self.turns)?;
        let l = inputs.scalar(&self.turn_length)?;
        let j = inputs.scalar(&self.current_density)?;
        let i = inputs.scalar(&self.current)?;
        Ok(COPPER_RESISTIVITY * n * l * j / i)
    }
}

impl ExplicitComponent for SizingCopperResistance {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.turns, "unitless", Shape::Scalar);
        interface.add_input(&self.turn_length, "m", Shape::Scalar);
        interface.add_input(&self.current, "A", Shape::Scalar);
        interface
            .add_input(&self.current_density, "A/m**2", Shape::Scalar)
            .val(5.0e6);
        interface
            .add_output(&self.resistance, "ohm", Shape::Scalar)
            .val(1.0e-3);
        for (wrt, _) in self.factors() {
            interface.declare_partials(&self.resistance, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        outputs.set(&self.resistance, [self.value(inputs)?]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let resistance = self.value(inputs)?;
        for (wrt, exponent) in self.factors() {
            let x = inputs.scalar(wrt)?;
            partials.set(&self.resistance, wrt, Partial::scalar(exponent * resistance / x));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate};

    #[test]
    fn fifty_turns_of_twenty_square_millimetres() {
        let paths = paths("inductor_1");
        let inputs = Variables::new()
            .with(paths.data(NUMBER_OF_TURNS), [50.0])
            .with(paths.data("mean_turn_length"), [0.2])
            .with(paths.data(CURRENT_CALIBER), [100.0])
            .with(paths.settings(CURRENT_DENSITY), [5.0e6]);

        let component = SizingCopperResistance::new("inductor_1");
        let outputs = evaluate(&component, &inputs);
        // 10 m of 20 mm² copper.
        assert_relative_eq!(
            outputs.scalar(&paths.data(RESISTANCE)).unwrap(),
            COPPER_RESISTIVITY * 10.0 / 20.0e-6,
            max_relative = 1e-12
        );
        assert_partials(&component, &inputs);
    }
}
