use std::f64::consts::PI;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{CYLINDRICAL_LENGTH, INNER_DIAMETER, paths};

/// Length of the cylindrical section between the two hemispherical ends,
/// `(V - pi d^3 / 6) / (pi d^2 / 4)`.
///
/// Negative when the volume is smaller than the sphere of diameter `d`;
/// downstream components decide what to do with that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingCylindricalLength {
    volume: String,
    diameter: String,
    length: String,
}

impl SizingCylindricalLength {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            volume: paths.data("inner_volume"),
            diameter: paths.data(INNER_DIAMETER),
            length: paths.data(CYLINDRICAL_LENGTH),
        }
    }
}

impl ExplicitComponent for SizingCylindricalLength {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.volume, "m**3", Shape::Scalar);
        interface.add_input(&self.diameter, "m", Shape::Scalar);
        interface.add_output(&self.length, "m", Shape::Scalar);
        interface.declare_partials(&self.length, &self.volume, Sparsity::Dense);
        interface.declare_partials(&self.length, &self.diameter, Sparsity::Dense);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let volume = inputs.scalar(&self.volume)?;
        let d = inputs.scalar(&self.diameter)?;
        outputs.set(&self.length, [4.0 * volume / (PI * d * d) - 2.0 * d / 3.0]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let volume = inputs.scalar(&self.volume)?;
        let d = inputs.scalar(&self.diameter)?;
        partials.set(
            &self.length,
            &self.volume,
            Partial::scalar(4.0 / (PI * d * d)),
        );
        partials.set(
            &self.length,
            &self.diameter,
            Partial::scalar(-8.0 * volume / (PI * d * d * d) - 2.0 / 3.0),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate};

    fn inputs(volume: f64, diameter: f64) -> Variables {
        Variables::new()
            .with(paths("tank_1").data("inner_volume"), [volume])
            .with(paths("tank_1").data(INNER_DIAMETER), [diameter])
    }

    #[test]
    fn sphere_has_no_cylinder() {
        let component = SizingCylindricalLength::new("tank_1");
        let d: f64 = 1.2;
        let sphere = PI * d.powi(3) / 6.0;

        let outputs = evaluate(&component, &inputs(sphere, d));
        assert_relative_eq!(
            outputs.scalar(&paths("tank_1").data(CYLINDRICAL_LENGTH)).unwrap(),
            0.0,
            epsilon = 1e-12
        );

        let outputs = evaluate(&component, &inputs(sphere + PI * d * d / 4.0 * 3.0, d));
        assert_relative_eq!(
            outputs.scalar(&paths("tank_1").data(CYLINDRICAL_LENGTH)).unwrap(),
            3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn partials() {
        let component = SizingCylindricalLength::new("tank_1");
        assert_partials(&component, &inputs(5.0, 1.4));
        assert_partials(&component, &inputs(0.5, 1.4));
    }
}
