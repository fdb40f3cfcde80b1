use std::num::NonZeroUsize;

use crate::support::{
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    mission::MissionMaximum,
    naming::ComponentPaths,
};

use super::{AC_CURRENT, AC_VOLTAGE_RMS, DC_CURRENT, DC_VOLTAGE, Device, LOSSES, SUBSYSTEM};

/// Mission maxima the rectifier calibers are sized against.
///
/// The junction temperature maximum is taken over both devices.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformancesMaximum {
    quantities: MissionMaximum,
    junction_temperature_max: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesMaximum {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        let paths = ComponentPaths::new(SUBSYSTEM, id);
        let quantities = MissionMaximum::new(number_of_points)
            .quantity(AC_CURRENT, paths.data("current_ac_max"), "A")
            .quantity(DC_CURRENT, paths.data("current_dc_max"), "A")
            .quantity(AC_VOLTAGE_RMS, paths.data("voltage_ac_max"), "V")
            .quantity(DC_VOLTAGE, paths.data("voltage_dc_max"), "V")
            .quantity(LOSSES, paths.data("losses_max"), "W");
        Self {
            quantities,
            junction_temperature_max: paths.data("junction_temperature_max"),
            number_of_points,
        }
    }

    /// Device and point of the hottest junction; the first one on ties.
    fn hottest(&self, inputs: &Variables) -> ComponentResult<(Device, usize, f64)> {
        let n = self.number_of_points.get();
        let mut hottest = (Device::ALL[0], 0, f64::NEG_INFINITY);
        for device in Device::ALL {
            for (i, &t) in inputs.array(device.temperature(), n)?.iter().enumerate() {
                if t > hottest.2 {
                    hottest = (device, i, t);
                }
            }
        }
        Ok(hottest)
    }
}

impl ExplicitComponent for PerformancesMaximum {
    fn interface(&self) -> Interface {
        let mut interface = self.quantities.interface();
        interface
            .add_output(&self.junction_temperature_max, "degK", Shape::Scalar)
            .val(350.0);
        for device in Device::ALL {
            interface.add_input(device.temperature(), "degK", Shape::Points);
            interface.declare_partials(
                &self.junction_temperature_max,
                device.temperature(),
                Sparsity::Row,
            );
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        self.quantities.compute(inputs, outputs)?;
        let (_, _, max) = self.hottest(inputs)?;
        outputs.set(&self.junction_temperature_max, [max]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        self.quantities.compute_partials(inputs, partials)?;

        let n = self.number_of_points.get();
        let (hottest, idx, _) = self.hottest(inputs)?;
        for device in Device::ALL {
            let mut row = vec![0.0; n];
            if device == hottest {
                row[idx] = 1.0;
            }
            partials.set(
                &self.junction_temperature_max,
                device.temperature(),
                Partial::Row(row),
            );
        }
        Ok(())
    }
}
