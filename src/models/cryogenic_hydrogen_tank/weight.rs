use std::f64::consts::PI;

use crate::support::{
    clip::CLIPPED_GRADIENT,
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
};

use super::{CYLINDRICAL_LENGTH, INNER_DIAMETER, OUTER_DIAMETER, cylinder, paths};

/// Mass of the tank shell.
///
/// The shell is the material between the inner and outer diameters, over the
/// cylinder and the two hemispherical ends:
///
/// ```text
/// m = rho * (pi / 4 * (Do^2 - Di^2) * L + pi / 6 * (Do^3 - Di^3))
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingWeight {
    inner_diameter: String,
    outer_diameter: String,
    cylindrical_length: String,
    density: String,
    mass: String,
}

impl SizingWeight {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            inner_diameter: paths.data(INNER_DIAMETER),
            outer_diameter: paths.data(OUTER_DIAMETER),
            cylindrical_length: paths.data(CYLINDRICAL_LENGTH),
            density: paths.data("wall:density"),
            mass: paths.data("mass"),
        }
    }
}

impl ExplicitComponent for SizingWeight {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.inner_diameter, "m", Shape::Scalar);
        interface.add_input(&self.outer_diameter, "m", Shape::Scalar);
        interface.add_input(&self.cylindrical_length, "m", Shape::Scalar);
        interface
            .add_input(&self.density, "kg/m**3", Shape::Scalar)
            .val(2810.0);
        interface.add_output(&self.mass, "kg", Shape::Scalar).val(50.0);
        for wrt in [
            &self.inner_diameter,
            &self.outer_diameter,
            &self.cylindrical_length,
            &self.density,
        ] {
            interface.declare_partials(&self.mass, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let di = inputs.scalar(&self.inner_diameter)?;
        let d_o = inputs.scalar(&self.outer_diameter)?;
        let l = cylinder(inputs.scalar(&self.cylindrical_length)?).value;
        let rho = inputs.scalar(&self.density)?;

        let volume = PI / 4.0 * (d_o * d_o - di * di) * l + PI / 6.0 * (d_o.powi(3) - di.powi(3));
        outputs.set(&self.mass, [rho * volume]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let di = inputs.scalar(&self.inner_diameter)?;
        let d_o = inputs.scalar(&self.outer_diameter)?;
        let l = cylinder(inputs.scalar(&self.cylindrical_length)?);
        let rho = inputs.scalar(&self.density)?;

        let volume =
            PI / 4.0 * (d_o * d_o - di * di) * l.value + PI / 6.0 * (d_o.powi(3) - di.powi(3));

        partials.set(
            &self.mass,
            &self.inner_diameter,
            Partial::scalar(-rho * (PI / 2.0 * di * l.value + PI / 2.0 * di * di)),
        );
        partials.set(
            &self.mass,
            &self.outer_diameter,
            Partial::scalar(rho * (PI / 2.0 * d_o * l.value + PI / 2.0 * d_o * d_o)),
        );
        partials.set(
            &self.mass,
            &self.cylindrical_length,
            Partial::scalar(l.mask(rho * PI / 4.0 * (d_o * d_o - di * di), CLIPPED_GRADIENT)),
        );
        partials.set(&self.mass, &self.density, Partial::scalar(volume));
        Ok(())
    }
}
