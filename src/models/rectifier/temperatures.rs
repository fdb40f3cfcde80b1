//! Thermal chain from the heat sink to the junctions.

use std::num::NonZeroUsize;

use crate::support::{
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    naming::ComponentPaths,
};

use super::{CASING_TEMPERATURE, Device, HEAT_SINK_TEMPERATURE, LOSSES, SUBSYSTEM};

/// Casing temperature of one module.
///
/// Each of the three modules sits on the heat sink through its own thermal
/// resistance and dissipates a third of the losses:
/// `T_case = T_hs + losses / 3 * R_th`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesCasingTemperature {
    thermal_resistance: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesCasingTemperature {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            thermal_resistance: ComponentPaths::new(SUBSYSTEM, id)
                .data("casing:thermal_resistance"),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesCasingTemperature {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(HEAT_SINK_TEMPERATURE, "degK", Shape::Points);
        interface.add_input(LOSSES, "W", Shape::Points);
        interface
            .add_input(&self.thermal_resistance, "K/W", Shape::Scalar)
            .val(0.01)
            .desc("casing to heat sink");
        interface
            .add_output(CASING_TEMPERATURE, "degK", Shape::Points)
            .val(300.0);

        interface
            .declare_partials(CASING_TEMPERATURE, HEAT_SINK_TEMPERATURE, Sparsity::Diagonal)
            .constant(1.0);
        interface.declare_partials(CASING_TEMPERATURE, LOSSES, Sparsity::Diagonal);
        interface.declare_partials(
            CASING_TEMPERATURE,
            &self.thermal_resistance,
            Sparsity::Column,
        );
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let t_hs = inputs.array(HEAT_SINK_TEMPERATURE, n)?;
        let losses = inputs.array(LOSSES, n)?;
        let r_th = inputs.scalar(&self.thermal_resistance)?;

        outputs.set(
            CASING_TEMPERATURE,
            (0..n)
                .map(|i| t_hs[i] + losses[i] / 3.0 * r_th)
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let losses = inputs.array(LOSSES, n)?;
        let r_th = inputs.scalar(&self.thermal_resistance)?;

        partials.set(
            CASING_TEMPERATURE,
            LOSSES,
            Partial::Diagonal(vec![r_th / 3.0; n]),
        );
        partials.set(
            CASING_TEMPERATURE,
            &self.thermal_resistance,
            Partial::Column(losses.iter().map(|l| l / 3.0).collect()),
        );
        Ok(())
    }
}

/// Junction temperature of each device:
/// `T_j = T_case + (P_switching + P_conduction) * R_th(junction to casing)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesJunctionTemperature {
    thermal_resistances: Vec<(Device, String)>,
    number_of_points: NonZeroUsize,
}

impl PerformancesJunctionTemperature {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        let paths = ComponentPaths::new(SUBSYSTEM, id);
        Self {
            thermal_resistances: Device::ALL
                .into_iter()
                .map(|device| {
                    (
                        device,
                        paths.data(&format!("{}:thermal_resistance", device.key())),
                    )
                })
                .collect(),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesJunctionTemperature {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(CASING_TEMPERATURE, "degK", Shape::Points);

        for (device, resistance) in &self.thermal_resistances {
            let output = device.temperature();
            interface.add_input(device.switching_losses(), "W", Shape::Points);
            interface.add_input(device.conduction_losses(), "W", Shape::Points);
            interface
                .add_input(resistance, "K/W", Shape::Scalar)
                .desc("junction to casing");
            interface.add_output(output, "degK", Shape::Points).val(350.0);

            interface
                .declare_partials(output, CASING_TEMPERATURE, Sparsity::Diagonal)
                .constant(1.0);
            interface.declare_partials(output, device.switching_losses(), Sparsity::Diagonal);
            interface.declare_partials(output, device.conduction_losses(), Sparsity::Diagonal);
            interface.declare_partials(output, resistance, Sparsity::Column);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let t_case = inputs.array(CASING_TEMPERATURE, n)?;

        for (device, resistance) in &self.thermal_resistances {
            let switching = inputs.array(device.switching_losses(), n)?;
            let conduction = inputs.array(device.conduction_losses(), n)?;
            let r_th = inputs.scalar(resistance)?;

            outputs.set(
                device.temperature(),
                (0..n)
                    .map(|i| t_case[i] + (switching[i] + conduction[i]) * r_th)
                    .collect::<Vec<_>>(),
            );
        }
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();

        for (device, resistance) in &self.thermal_resistances {
            let output = device.temperature();
            let switching = inputs.array(device.switching_losses(), n)?;
            let conduction = inputs.array(device.conduction_losses(), n)?;
            let r_th = inputs.scalar(resistance)?;

            partials.set(
                output,
                device.switching_losses(),
                Partial::Diagonal(vec![r_th; n]),
            );
            partials.set(
                output,
                device.conduction_losses(),
                Partial::Diagonal(vec![r_th; n]),
            );
            partials.set(
                output,
                resistance,
                Partial::Column((0..n).map(|i| switching[i] + conduction[i]).collect()),
            );
        }
        Ok(())
    }
}
