use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::paths;

/// Density of saturated liquid hydrogen at 1 atm, kg/m³.
const LIQUID_HYDROGEN_DENSITY: f64 = 70.8;

/// Volume the fuel occupies, `capacity / rho`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingInnerVolume {
    capacity: String,
    density: String,
    volume: String,
}

impl SizingInnerVolume {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            capacity: paths.data("capacity"),
            density: paths.settings("fuel_density"),
            volume: paths.data("inner_volume"),
        }
    }
}

impl ExplicitComponent for SizingInnerVolume {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.capacity, "kg", Shape::Scalar);
        interface
            .add_input(&self.density, "kg/m**3", Shape::Scalar)
            .val(LIQUID_HYDROGEN_DENSITY);
        interface
            .add_output(&self.volume, "m**3", Shape::Scalar)
            .val(1.0);
        interface.declare_partials(&self.volume, &self.capacity, Sparsity::Dense);
        interface.declare_partials(&self.volume, &self.density, Sparsity::Dense);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let capacity = inputs.scalar(&self.capacity)?;
        let density = inputs.scalar(&self.density)?;
        outputs.set(&self.volume, [capacity / density]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let capacity = inputs.scalar(&self.capacity)?;
        let density = inputs.scalar(&self.density)?;
        partials.set(&self.volume, &self.capacity, Partial::scalar(1.0 / density));
        partials.set(
            &self.volume,
            &self.density,
            Partial::scalar(-capacity / (density * density)),
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
    fn volume_from_default_density() {
        let component = SizingInnerVolume::new("tank_1");
        let mut inputs = component.interface().default_inputs();
        inputs.set(paths("tank_1").data("capacity"), [141.6]);

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(
            outputs.scalar(&paths("tank_1").data("inner_volume")).unwrap(),
            2.0,
            epsilon = 1e-12
        );
        assert_partials(&component, &inputs);
    }
}
