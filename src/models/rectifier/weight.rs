use crate::support::{
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    naming::ComponentPaths,
};

use super::SUBSYSTEM;

/// Rectifier mass from its apparent power rating and a power density:
/// `m = 3 * V_rms * I_rms / rho_p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingWeight {
    voltage: String,
    current: String,
    power_density: String,
    mass: String,
}

impl SizingWeight {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = ComponentPaths::new(SUBSYSTEM, id);
        Self {
            voltage: paths.data("voltage_ac_caliber"),
            current: paths.data("current_ac_caliber"),
            power_density: paths.data("power_density"),
            mass: paths.data("mass"),
        }
    }
}

/// W per kW.
const KILO: f64 = 1.0e3;

impl ExplicitComponent for SizingWeight {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.voltage, "V", Shape::Scalar);
        interface.add_input(&self.current, "A", Shape::Scalar);
        interface
            .add_input(&self.power_density, "kW/kg", Shape::Scalar)
            .val(15.0);
        interface.add_output(&self.mass, "kg", Shape::Scalar).val(20.0);
        for wrt in [&self.voltage, &self.current, &self.power_density] {
            interface.declare_partials(&self.mass, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let voltage = inputs.scalar(&self.voltage)?;
        let current = inputs.scalar(&self.current)?;
        let density = inputs.scalar(&self.power_density)?;

        outputs.set(&self.mass, [3.0 * voltage * current / (density * KILO)]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let voltage = inputs.scalar(&self.voltage)?;
        let current = inputs.scalar(&self.current)?;
        let density = inputs.scalar(&self.power_density)?;
        let mass = 3.0 * voltage * current / (density * KILO);

        partials.set(
            &self.mass,
            &self.voltage,
            Partial::scalar(3.0 * current / (density * KILO)),
        );
        partials.set(
            &self.mass,
            &self.current,
            Partial::scalar(3.0 * voltage / (density * KILO)),
        );
        partials.set(&self.mass, &self.power_density, Partial::scalar(-mass / density));
        Ok(())
    }
}
