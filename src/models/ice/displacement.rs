use crate::support::{
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    naming::ComponentPaths,
};

use super::{CYCLE_FACTOR, SUBSYSTEM};

/// Displacement volume that delivers the rated power at the maximum mean
/// effective pressure, `V = 120 * P / (MEP_max * N)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingDisplacementVolume {
    power: String,
    mep_max: String,
    rpm: String,
    volume: String,
}

impl SizingDisplacementVolume {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = ComponentPaths::new(SUBSYSTEM, id);
        Self {
            power: paths.data("power_caliber"),
            mep_max: paths.data("mean_effective_pressure_max"),
            rpm: paths.data("rpm_rating"),
            volume: paths.data("displacement_volume"),
        }
    }
}

impl ExplicitComponent for SizingDisplacementVolume {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.power, "kW", Shape::Scalar);
        interface
            .add_input(&self.mep_max, "bar", Shape::Scalar)
            .val(20.0);
        interface
            .add_input(&self.rpm, "rpm", Shape::Scalar)
            .val(2700.0);
        interface
            .add_output(&self.volume, "m**3", Shape::Scalar)
            .val(2.0e-3);
        for wrt in [&self.power, &self.mep_max, &self.rpm] {
            interface.declare_partials(&self.volume, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let power = inputs.scalar(&self.power)?;
        let mep = inputs.scalar(&self.mep_max)?;
        let rpm = inputs.scalar(&self.rpm)?;

        outputs.set(&self.volume, [CYCLE_FACTOR * power / (mep * rpm)]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let power = inputs.scalar(&self.power)?;
        let mep = inputs.scalar(&self.mep_max)?;
        let rpm = inputs.scalar(&self.rpm)?;
        let volume = CYCLE_FACTOR * power / (mep * rpm);

        partials.set(&self.volume, &self.power, Partial::scalar(volume / power));
        partials.set(&self.volume, &self.mep_max, Partial::scalar(-volume / mep));
        partials.set(&self.volume, &self.rpm, Partial::scalar(-volume / rpm));
        Ok(())
    }
}
