use std::num::NonZeroUsize;

use crate::support::{
    clip::clip,
    component::{
        ComponentResult, ImplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
};

use super::{AC_VOLTAGE_PEAK, DC_VOLTAGE, MODULATION_INDEX};

/// Modulation index that makes the converter reach the DC voltage.
///
/// Residual: `m * V_dc - V_ac_peak`.
///
/// The initial guess is only touched where the closed-form ratio
/// `V_ac_peak / V_dc` falls outside `[0, 1]`; there it is replaced by the
/// clipped ratio. Elsewhere the value carried over from the previous solver
/// iteration is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesModulationIndex {
    number_of_points: NonZeroUsize,
}

impl PerformancesModulationIndex {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self { number_of_points }
    }
}

impl ImplicitComponent for PerformancesModulationIndex {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(AC_VOLTAGE_PEAK, "V", Shape::Points)
            .val(800.0);
        interface.add_input(DC_VOLTAGE, "V", Shape::Points).val(850.0);
        interface
            .add_output(MODULATION_INDEX, "unitless", Shape::Points)
            .val(0.95)
            .lower(0.0)
            .upper(1.0);

        interface.declare_partials(MODULATION_INDEX, MODULATION_INDEX, Sparsity::Diagonal);
        interface.declare_partials(MODULATION_INDEX, DC_VOLTAGE, Sparsity::Diagonal);
        interface
            .declare_partials(MODULATION_INDEX, AC_VOLTAGE_PEAK, Sparsity::Diagonal)
            .constant(-1.0);
        interface
    }

    fn apply_nonlinear(
        &self,
        inputs: &Variables,
        outputs: &Variables,
        residuals: &mut Variables,
    ) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let v_ac = inputs.array(AC_VOLTAGE_PEAK, n)?;
        let v_dc = inputs.array(DC_VOLTAGE, n)?;
        let m = outputs.array(MODULATION_INDEX, n)?;

        let residual: Vec<f64> = m
            .iter()
            .zip(v_dc)
            .zip(v_ac)
            .map(|((m, v_dc), v_ac)| m * v_dc - v_ac)
            .collect();
        residuals.set(MODULATION_INDEX, residual);
        Ok(())
    }

    fn linearize(
        &self,
        inputs: &Variables,
        outputs: &Variables,
        partials: &mut Partials,
    ) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let v_dc = inputs.array(DC_VOLTAGE, n)?;
        let m = outputs.array(MODULATION_INDEX, n)?;

        partials.set(
            MODULATION_INDEX,
            MODULATION_INDEX,
            Partial::Diagonal(v_dc.to_vec()),
        );
        partials.set(MODULATION_INDEX, DC_VOLTAGE, Partial::Diagonal(m.to_vec()));
        Ok(())
    }

    fn guess_nonlinear(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let v_ac = inputs.array(AC_VOLTAGE_PEAK, n)?;
        let v_dc = inputs.array(DC_VOLTAGE, n)?;
        outputs.array(MODULATION_INDEX, n)?;

        let m = outputs.get_mut(MODULATION_INDEX)?;
        for ((m, v_ac), v_dc) in m.iter_mut().zip(v_ac).zip(v_dc) {
            let ratio = clip(v_ac / v_dc, 0.0, 1.0);
            if ratio.active {
                *m = ratio.value;
            }
        }
        Ok(())
    }
}
