use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{LENGTH, WIDTH, paths};

/// Plate mass, `rho * L * W * t`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingWeight {
    length: String,
    width: String,
    thickness: String,
    density: String,
    mass: String,
}

impl SizingWeight {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            length: paths.data(LENGTH),
            width: paths.data(WIDTH),
            thickness: paths.data("dimension:thickness"),
            density: paths.settings("material:density"),
            mass: paths.data("mass"),
        }
    }

    fn factors(&self) -> [&String; 4] {
        [&self.length, &self.width, &self.thickness, &self.density]
    }
}

impl ExplicitComponent for SizingWeight {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.length, "m", Shape::Scalar);
        interface.add_input(&self.width, "m", Shape::Scalar);
        interface
            .add_input(&self.thickness, "m", Shape::Scalar)
            .val(0.01);
        interface
            .add_input(&self.density, "kg/m**3", Shape::Scalar)
            .val(2700.0)
            .desc("aluminium");
        interface.add_output(&self.mass, "kg", Shape::Scalar).val(1.0);
        for wrt in self.factors() {
            interface.declare_partials(&self.mass, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let mut mass = 1.0;
        for factor in self.factors() {
            mass *= inputs.scalar(factor)?;
        }
        outputs.set(&self.mass, [mass]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let factors = self.factors();
        let values = factors
            .iter()
            .map(|factor| inputs.scalar(factor))
            .collect::<ComponentResult<Vec<_>>>()?;

        // Product of every other factor.
        for (k, wrt) in factors.iter().enumerate() {
            let others: f64 = values
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != k)
                .map(|(_, v)| v)
                .product();
            partials.set(
                &self.mass,
                *wrt,
                Partial::scalar(others),
            );
        }
        Ok(())
    }
}
