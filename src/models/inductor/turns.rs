use std::f64::consts::SQRT_2;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{CURRENT_CALIBER, FLUX_DENSITY, INDUCTANCE, NUMBER_OF_TURNS, paths};

/// Turns needed to reach the peak flux density at the peak current,
/// `N = L * I_peak / (B * A_core)`.
///
/// Left continuous; rounding up to a whole number of turns is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingNumberOfTurns {
    inductance: String,
    current: String,
    flux_density: String,
    section_area: String,
    turns: String,
}

impl SizingNumberOfTurns {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            inductance: paths.data(INDUCTANCE),
            current: paths.data(CURRENT_CALIBER),
            flux_density: paths.data(FLUX_DENSITY),
            section_area: paths.data("core:section_area"),
            turns: paths.data(NUMBER_OF_TURNS),
        }
    }

    fn factors(&self) -> [(&str, f64); 4] {
        [
            (self.inductance.as_str(), 1.0),
            (self.current.as_str(), 1.0),
            (self.flux_density.as_str(), -1.0),
            (self.section_area.as_str(), -1.0),
        ]
    }

    fn value(&self, inputs: &Variables) -> ComponentResult<f64> {
        let l = inputs.scalar(&self.inductance)?;
        let i = inputs.scalar(&self.current)?;
        let b = inputs.scalar(&self.flux_density)?;
        let a = inputs.scalar(&self.section_area)?;
        Ok(l * SQRT_2 * i / (b * a))
    }
}

impl ExplicitComponent for SizingNumberOfTurns {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.inductance, "H", Shape::Scalar);
        interface.add_input(&self.current, "A", Shape::Scalar);
        interface
            .add_input(&self.flux_density, "T", Shape::Scalar)
            .val(1.2);
        interface.add_input(&self.section_area, "m**2", Shape::Scalar);
        interface
            .add_output(&self.turns, "unitless", Shape::Scalar)
            .val(20.0);
        for (wrt, _) in self.factors() {
            interface.declare_partials(&self.turns, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        outputs.set(&self.turns, [self.value(inputs)?]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let turns = self.value(inputs)?;
        for (wrt, exponent) in self.factors() {
            let x = inputs.scalar(wrt)?;
            partials.set(&self.turns, wrt, Partial::scalar(exponent * turns / x));
        }
        Ok(())
    }
}
