use crate::support::{
    clip::CLIPPED_GRADIENT,
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
};

use super::{CYLINDRICAL_LENGTH, LENGTH, OUTER_DIAMETER, cylinder, paths};

/// Overall tank length, cylinder (if any) plus the two end caps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingLength {
    cylindrical_length: String,
    outer_diameter: String,
    length: String,
}

impl SizingLength {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            cylindrical_length: paths.data(CYLINDRICAL_LENGTH),
            outer_diameter: paths.data(OUTER_DIAMETER),
            length: paths.data(LENGTH),
        }
    }
}

impl ExplicitComponent for SizingLength {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.cylindrical_length, "m", Shape::Scalar);
        interface.add_input(&self.outer_diameter, "m", Shape::Scalar);
        interface.add_output(&self.length, "m", Shape::Scalar);
        interface.declare_partials(&self.length, &self.cylindrical_length, Sparsity::Dense);
        interface
            .declare_partials(&self.length, &self.outer_diameter, Sparsity::Dense)
            .constant(1.0);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let cylinder = cylinder(inputs.scalar(&self.cylindrical_length)?);
        let diameter = inputs.scalar(&self.outer_diameter)?;
        outputs.set(&self.length, [cylinder.value + diameter]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let cylinder = cylinder(inputs.scalar(&self.cylindrical_length)?);
        partials.set(
            &self.length,
            &self.cylindrical_length,
            Partial::scalar(cylinder.mask(1.0, CLIPPED_GRADIENT)),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate};

    fn inputs(cylindrical_length: f64) -> Variables {
        Variables::new()
            .with(paths("tank_1").data(CYLINDRICAL_LENGTH), [cylindrical_length])
            .with(paths("tank_1").data(OUTER_DIAMETER), [1.8])
    }

    #[test]
    fn negative_cylinder_leaves_a_sphere() {
        let component = SizingLength::new("tank_1");
        let length = |l| {
            evaluate(&component, &inputs(l))
                .scalar(&paths("tank_1").data(LENGTH))
                .unwrap()
        };
        assert_relative_eq!(length(2.5), 4.3);
        assert_relative_eq!(length(-0.4), 1.8);

        let partials = component.jacobian(&inputs(-0.4)).unwrap();
        assert_eq!(
            partials.get(
                &paths("tank_1").data(LENGTH),
                &paths("tank_1").data(CYLINDRICAL_LENGTH)
            ),
            Some(&Partial::scalar(CLIPPED_GRADIENT))
        );
        assert_partials(&component, &inputs(2.5));
        assert_partials(&component, &inputs(-0.4));
    }
}
