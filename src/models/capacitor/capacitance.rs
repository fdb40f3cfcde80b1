use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{CAPACITANCE, paths};

/// Capacitance that keeps the voltage ripple within bounds,
/// `C = dI / (8 * f * dV)`.
///
/// `dI` is the peak-to-peak ripple current drawn at the switching frequency
/// `f`; the capacitor absorbs it as a triangular charge exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingCapacitance {
    current_ripple: String,
    switching_frequency: String,
    voltage_ripple: String,
    capacitance: String,
}

impl SizingCapacitance {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            current_ripple: paths.data("current_ripple"),
            switching_frequency: paths.data("switching_frequency"),
            voltage_ripple: paths.data("voltage_ripple"),
            capacitance: paths.data(CAPACITANCE),
        }
    }
}

impl ExplicitComponent for SizingCapacitance {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.current_ripple, "A", Shape::Scalar);
        interface
            .add_input(&self.switching_frequency, "Hz", Shape::Scalar)
            .val(12.0e3);
        interface.add_input(&self.voltage_ripple, "V", Shape::Scalar);
        interface
            .add_output(&self.capacitance, "F", Shape::Scalar)
            .val(1.0e-3);
        for wrt in [
            &self.current_ripple,
            &self.switching_frequency,
            &self.voltage_ripple,
        ] {
            interface.declare_partials(&self.capacitance, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let di = inputs.scalar(&self.current_ripple)?;
        let f = inputs.scalar(&self.switching_frequency)?;
        let dv = inputs.scalar(&self.voltage_ripple)?;
        outputs.set(&self.capacitance, [di / (8.0 * f * dv)]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let di = inputs.scalar(&self.current_ripple)?;
        let f = inputs.scalar(&self.switching_frequency)?;
        let dv = inputs.scalar(&self.voltage_ripple)?;
        let c = di / (8.0 * f * dv);

        partials.set(
            &self.capacitance,
            &self.current_ripple,
            Partial::scalar(1.0 / (8.0 * f * dv)),
        );
        partials.set(
            &self.capacitance,
            &self.switching_frequency,
            Partial::scalar(-c / f),
        );
        partials.set(
            &self.capacitance,
            &self.voltage_ripple,
            Partial::scalar(-c / dv),
        );
        Ok(())
    }
}
