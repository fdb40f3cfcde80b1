use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{CAPACITANCE, VOLTAGE_CALIBER, paths};

/// Mass from the energy stored at the rated voltage,
/// `m = 0.5 * C * V^2 / e`, with `e` the specific energy of the technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingWeight {
    capacitance: String,
    voltage: String,
    specific_energy: String,
    mass: String,
}

impl SizingWeight {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            capacitance: paths.data(CAPACITANCE),
            voltage: paths.data(VOLTAGE_CALIBER),
            specific_energy: paths.settings("specific_energy"),
            mass: paths.data("mass"),
        }
    }
}

impl ExplicitComponent for SizingWeight {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.capacitance, "F", Shape::Scalar);
        interface.add_input(&self.voltage, "V", Shape::Scalar);
        interface
            .add_input(&self.specific_energy, "J/kg", Shape::Scalar)
            .val(100.0)
            .desc("film capacitors store about 100 J/kg");
        interface.add_output(&self.mass, "kg", Shape::Scalar).val(5.0);
        for wrt in [&self.capacitance, &self.voltage, &self.specific_energy] {
            interface.declare_partials(&self.mass, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let c = inputs.scalar(&self.capacitance)?;
        let v = inputs.scalar(&self.voltage)?;
        let e = inputs.scalar(&self.specific_energy)?;
        outputs.set(&self.mass, [0.5 * c * v * v / e]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let c = inputs.scalar(&self.capacitance)?;
        let v = inputs.scalar(&self.voltage)?;
        let e = inputs.scalar(&self.specific_energy)?;

        partials.set(&self.mass, &self.capacitance, Partial::scalar(0.5 * v * v / e));
        partials.set(&self.mass, &self.voltage, Partial::scalar(c * v / e));
        partials.set(
            &self.mass,
            &self.specific_energy,
            Partial::scalar(-0.5 * c * v * v / (e * e)),
        );
        Ok(())
    }
}
