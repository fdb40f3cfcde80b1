use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Shape, Sparsity, Variables,
};

use super::{LENGTH, TankPosition, paths};

const FUSELAGE_FRONT_LENGTH: &str = "data:geometry:fuselage:front_length";
const CABIN_LENGTH: &str = "data:geometry:cabin:length";
const MAC_LEADING_EDGE: &str = "data:geometry:wing:MAC:leading_edge:x:absolute";
const MAC_LENGTH: &str = "data:geometry:wing:MAC:length";

/// Longitudinal position of the tank centre of gravity, from the nose.
///
/// | Position | CG |
/// |---|---|
/// | in the cabin | `front + cabin / 2` |
/// | in the back | `front + cabin + length / 2` |
/// | in the front | `front - length / 2` |
/// | wing pod, underbelly | `x_MAC + MAC / 4` |
///
/// Every rule is linear, so all partials are declared constants and only
/// the inputs a position uses are declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingCg {
    position: TankPosition,
    length: String,
    cg: String,
}

impl SizingCg {
    #[must_use]
    pub fn new(id: &str, position: TankPosition) -> Self {
        let paths = paths(id);
        Self {
            position,
            length: paths.data(LENGTH),
            cg: paths.data("CG:x"),
        }
    }

    /// Inputs and their coefficients in the CG sum.
    fn terms(&self) -> Vec<(&str, f64)> {
        match self.position {
            TankPosition::InTheCabin => vec![(FUSELAGE_FRONT_LENGTH, 1.0), (CABIN_LENGTH, 0.5)],
            TankPosition::InTheBack => vec![
                (FUSELAGE_FRONT_LENGTH, 1.0),
                (CABIN_LENGTH, 1.0),
                (self.length.as_str(), 0.5),
            ],
            TankPosition::InTheFront => {
                vec![(FUSELAGE_FRONT_LENGTH, 1.0), (self.length.as_str(), -0.5)]
            }
            TankPosition::WingPod | TankPosition::Underbelly => {
                vec![(MAC_LEADING_EDGE, 1.0), (MAC_LENGTH, 0.25)]
            }
        }
    }
}

impl ExplicitComponent for SizingCg {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_output(&self.cg, "m", Shape::Scalar).val(10.0);
        for (input, coefficient) in self.terms() {
            interface.add_input(input, "m", Shape::Scalar);
            interface
                .declare_partials(&self.cg, input, Sparsity::Dense)
                .constant(coefficient);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let mut cg = 0.0;
        for (input, coefficient) in self.terms() {
            cg += coefficient * inputs.scalar(input)?;
        }
        outputs.set(&self.cg, [cg]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate};

    fn inputs() -> Variables {
        Variables::new()
            .with(FUSELAGE_FRONT_LENGTH, [4.0])
            .with(CABIN_LENGTH, [12.0])
            .with(MAC_LEADING_EDGE, [11.0])
            .with(MAC_LENGTH, [2.4])
            .with(paths("tank_1").data(LENGTH), [3.0])
    }

    #[test]
    fn position_rules() {
        let cg = |position| {
            let component = SizingCg::new("tank_1", position);
            assert_partials(&component, &inputs());
            evaluate(&component, &inputs())
                .scalar(&paths("tank_1").data("CG:x"))
                .unwrap()
        };

        assert_relative_eq!(cg(TankPosition::InTheCabin), 10.0);
        assert_relative_eq!(cg(TankPosition::InTheBack), 17.5);
        assert_relative_eq!(cg(TankPosition::InTheFront), 2.5);
        assert_relative_eq!(cg(TankPosition::WingPod), 11.6);
        assert_relative_eq!(cg(TankPosition::Underbelly), 11.6);
    }

    #[test]
    fn only_used_inputs_are_declared() {
        let interface = SizingCg::new("tank_1", TankPosition::WingPod).interface();
        assert!(interface.input(FUSELAGE_FRONT_LENGTH).is_none());
        assert!(interface.input(MAC_LENGTH).is_some());
    }
}
