use std::num::NonZeroUsize;

use crate::support::{
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
    naming::ComponentPaths,
};

use super::{CYCLE_FACTOR, MEAN_EFFECTIVE_PRESSURE, RPM, SHAFT_POWER, SUBSYSTEM};

/// Brake mean effective pressure, `MEP = 120 * P / (V * N)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesMeanEffectivePressure {
    volume: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesMeanEffectivePressure {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            volume: ComponentPaths::new(SUBSYSTEM, id).data("displacement_volume"),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesMeanEffectivePressure {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(SHAFT_POWER, "kW", Shape::Points);
        interface.add_input(RPM, "rpm", Shape::Points);
        interface.add_input(&self.volume, "m**3", Shape::Scalar);
        interface
            .add_output(MEAN_EFFECTIVE_PRESSURE, "bar", Shape::Points)
            .val(15.0);

        interface.declare_partials(MEAN_EFFECTIVE_PRESSURE, SHAFT_POWER, Sparsity::Diagonal);
        interface.declare_partials(MEAN_EFFECTIVE_PRESSURE, RPM, Sparsity::Diagonal);
        interface.declare_partials(MEAN_EFFECTIVE_PRESSURE, &self.volume, Sparsity::Column);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let power = inputs.array(SHAFT_POWER, n)?;
        let rpm = inputs.array(RPM, n)?;
        let volume = inputs.scalar(&self.volume)?;

        outputs.set(
            MEAN_EFFECTIVE_PRESSURE,
            (0..n)
                .map(|i| CYCLE_FACTOR * power[i] / (volume * rpm[i]))
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let power = inputs.array(SHAFT_POWER, n)?;
        let rpm = inputs.array(RPM, n)?;
        let volume = inputs.scalar(&self.volume)?;
        let mep: Vec<f64> = (0..n)
            .map(|i| CYCLE_FACTOR * power[i] / (volume * rpm[i]))
            .collect();

        partials.set(
            MEAN_EFFECTIVE_PRESSURE,
            SHAFT_POWER,
            Partial::Diagonal(rpm.iter().map(|r| CYCLE_FACTOR / (volume * r)).collect()),
        );
        partials.set(
            MEAN_EFFECTIVE_PRESSURE,
            RPM,
            Partial::Diagonal((0..n).map(|i| -mep[i] / rpm[i]).collect()),
        );
        partials.set(
            MEAN_EFFECTIVE_PRESSURE,
            &self.volume,
            Partial::Column(mep.iter().map(|p| -p / volume).collect()),
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
    fn rated_point_recovers_maximum_pressure() {
        let component = PerformancesMeanEffectivePressure::new("ice_1", points(2));
        let volume = CYCLE_FACTOR * 100.0 / (20.0 * 2700.0);
        let inputs = Variables::new()
            .with(SHAFT_POWER, [100.0, 60.0])
            .with(RPM, [2700.0, 2300.0])
            .with(
                ComponentPaths::new(SUBSYSTEM, "ice_1").data("displacement_volume"),
                [volume],
            );

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(
            outputs.get(MEAN_EFFECTIVE_PRESSURE).unwrap()[0],
            20.0,
            max_relative = 1e-12
        );
        assert_partials(&component, &inputs);
    }
}
