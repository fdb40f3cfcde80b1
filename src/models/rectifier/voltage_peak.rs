use std::{f64::consts::SQRT_2, num::NonZeroUsize};

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Shape, Sparsity, Variables,
};

use super::{AC_VOLTAGE_PEAK, AC_VOLTAGE_RMS};

/// Peak AC voltage of a sinusoidal supply, `sqrt(2) * V_rms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesVoltagePeak {
    number_of_points: NonZeroUsize,
}

impl PerformancesVoltagePeak {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self { number_of_points }
    }
}

impl ExplicitComponent for PerformancesVoltagePeak {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(AC_VOLTAGE_RMS, "V", Shape::Points)
            .val(800.0);
        interface
            .add_output(AC_VOLTAGE_PEAK, "V", Shape::Points)
            .val(800.0 * SQRT_2);
        interface
            .declare_partials(AC_VOLTAGE_PEAK, AC_VOLTAGE_RMS, Sparsity::Diagonal)
            .constant(SQRT_2);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let rms = inputs.array(AC_VOLTAGE_RMS, self.number_of_points.get())?;
        outputs.set(
            AC_VOLTAGE_PEAK,
            rms.iter().map(|v| SQRT_2 * v).collect::<Vec<_>>(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    #[test]
    fn peak_of_sine() {
        let component = PerformancesVoltagePeak::new(points(2));
        let inputs = Variables::new().with(AC_VOLTAGE_RMS, [230.0, 400.0]);

        let outputs = evaluate(&component, &inputs);
        let peak = outputs.get(AC_VOLTAGE_PEAK).unwrap();
        assert_relative_eq!(peak[0], 325.269, epsilon = 1e-3);
        assert_relative_eq!(peak[1], 565.685, epsilon = 1e-3);
        assert_partials(&component, &inputs);
    }
}
