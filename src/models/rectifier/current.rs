use std::num::NonZeroUsize;

use crate::support::{
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    naming::ComponentPaths,
};

use super::{AC_CURRENT, AC_VOLTAGE_RMS, DC_CURRENT, DC_VOLTAGE, EFFICIENCY, SUBSYSTEM};

/// RMS current in one AC phase.
///
/// The AC side supplies the DC power plus the losses:
/// `I = V_dc * I_dc / (3 * eta * V_rms * cos_phi)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesCurrentAc {
    power_factor: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesCurrentAc {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            power_factor: ComponentPaths::new(SUBSYSTEM, id).settings("power_factor"),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesCurrentAc {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(DC_VOLTAGE, "V", Shape::Points);
        interface.add_input(DC_CURRENT, "A", Shape::Points);
        interface.add_input(AC_VOLTAGE_RMS, "V", Shape::Points);
        interface.add_input(EFFICIENCY, "unitless", Shape::Points);
        interface
            .add_input(&self.power_factor, "unitless", Shape::Scalar)
            .val(1.0);
        interface
            .add_output(AC_CURRENT, "A", Shape::Points)
            .val(100.0);

        for wrt in [DC_VOLTAGE, DC_CURRENT, AC_VOLTAGE_RMS, EFFICIENCY] {
            interface.declare_partials(AC_CURRENT, wrt, Sparsity::Diagonal);
        }
        interface.declare_partials(AC_CURRENT, &self.power_factor, Sparsity::Column);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let v_dc = inputs.array(DC_VOLTAGE, n)?;
        let i_dc = inputs.array(DC_CURRENT, n)?;
        let v_ac = inputs.array(AC_VOLTAGE_RMS, n)?;
        let eta = inputs.array(EFFICIENCY, n)?;
        let cos_phi = inputs.scalar(&self.power_factor)?;

        let current: Vec<f64> = (0..n)
            .map(|i| v_dc[i] * i_dc[i] / (3.0 * eta[i] * v_ac[i] * cos_phi))
            .collect();
        outputs.set(AC_CURRENT, current);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let v_dc = inputs.array(DC_VOLTAGE, n)?;
        let i_dc = inputs.array(DC_CURRENT, n)?;
        let v_ac = inputs.array(AC_VOLTAGE_RMS, n)?;
        let eta = inputs.array(EFFICIENCY, n)?;
        let cos_phi = inputs.scalar(&self.power_factor)?;

        let denominator: Vec<f64> = (0..n).map(|i| 3.0 * eta[i] * v_ac[i] * cos_phi).collect();
        let current: Vec<f64> = (0..n)
            .map(|i| v_dc[i] * i_dc[i] / denominator[i])
            .collect();

        partials.set(
            AC_CURRENT,
            DC_VOLTAGE,
            Partial::Diagonal((0..n).map(|i| i_dc[i] / denominator[i]).collect()),
        );
        partials.set(
            AC_CURRENT,
            DC_CURRENT,
            Partial::Diagonal((0..n).map(|i| v_dc[i] / denominator[i]).collect()),
        );
        partials.set(
            AC_CURRENT,
            AC_VOLTAGE_RMS,
            Partial::Diagonal((0..n).map(|i| -current[i] / v_ac[i]).collect()),
        );
        partials.set(
            AC_CURRENT,
            EFFICIENCY,
            Partial::Diagonal((0..n).map(|i| -current[i] / eta[i]).collect()),
        );
        partials.set(
            AC_CURRENT,
            &self.power_factor,
            Partial::Column(current.iter().map(|c| -c / cos_phi).collect()),
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
    fn phase_current_from_dc_power() {
        let component = PerformancesCurrentAc::new("rectifier_1", points(2));
        let inputs = Variables::new()
            .with(DC_VOLTAGE, [800.0, 850.0])
            .with(DC_CURRENT, [400.0, 250.0])
            .with(AC_VOLTAGE_RMS, [800.0, 700.0])
            .with(EFFICIENCY, [0.98, 0.95])
            .with(
                ComponentPaths::new(SUBSYSTEM, "rectifier_1").settings("power_factor"),
                [0.95],
            );

        let outputs = evaluate(&component, &inputs);
        // 320 kW / 0.98 split over three phases at 800 V and cos(phi) = 0.95.
        assert_relative_eq!(
            outputs.get(AC_CURRENT).unwrap()[0],
            320_000.0 / (3.0 * 0.98 * 800.0 * 0.95),
            epsilon = 1e-9
        );
        assert_partials(&component, &inputs);
    }
}
