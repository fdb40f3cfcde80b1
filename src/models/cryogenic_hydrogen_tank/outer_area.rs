use std::f64::consts::PI;

use crate::support::{
    clip::CLIPPED_GRADIENT,
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
};

use super::{CYLINDRICAL_LENGTH, OUTER_AREA, OUTER_DIAMETER, cylinder, paths};

/// Wetted outer area, cylinder plus sphere: `pi D L + pi D^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingOuterArea {
    cylindrical_length: String,
    outer_diameter: String,
    area: String,
}

impl SizingOuterArea {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            cylindrical_length: paths.data(CYLINDRICAL_LENGTH),
            outer_diameter: paths.data(OUTER_DIAMETER),
            area: paths.data(OUTER_AREA),
        }
    }
}

impl ExplicitComponent for SizingOuterArea {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.cylindrical_length, "m", Shape::Scalar);
        interface.add_input(&self.outer_diameter, "m", Shape::Scalar);
        interface.add_output(&self.area, "m**2", Shape::Scalar).val(10.0);
        interface.declare_partials(&self.area, &self.cylindrical_length, Sparsity::Dense);
        interface.declare_partials(&self.area, &self.outer_diameter, Sparsity::Dense);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let l = cylinder(inputs.scalar(&self.cylindrical_length)?).value;
        let d = inputs.scalar(&self.outer_diameter)?;
        outputs.set(&self.area, [PI * d * l + PI * d * d]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let l = cylinder(inputs.scalar(&self.cylindrical_length)?);
        let d = inputs.scalar(&self.outer_diameter)?;
        partials.set(
            &self.area,
            &self.cylindrical_length,
            Partial::scalar(l.mask(PI * d, CLIPPED_GRADIENT)),
        );
        partials.set(
            &self.area,
            &self.outer_diameter,
            Partial::scalar(PI * l.value + 2.0 * PI * d),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate};

    #[test]
    fn cylinder_with_hemispherical_ends() {
        let component = SizingOuterArea::new("tank_1");
        let inputs = Variables::new()
            .with(paths("tank_1").data(CYLINDRICAL_LENGTH), [3.0])
            .with(paths("tank_1").data(OUTER_DIAMETER), [1.0]);

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(
            outputs.scalar(&paths("tank_1").data(OUTER_AREA)).unwrap(),
            4.0 * PI,
            epsilon = 1e-12
        );
        assert_partials(&component, &inputs);
    }
}
