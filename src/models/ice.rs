//! Reciprocating internal combustion engine.
//!
//! Power is in kW, rotational speed in rpm and mean effective pressure in
//! bar throughout. The factor 120 in the displacement and MEP relations is
//! two revolutions per four-stroke cycle times 60 s per minute.

mod displacement;
mod fuel_consumed;
mod maximum;
mod mean_effective_pressure;
mod sfc;
mod torque;

pub use displacement::SizingDisplacementVolume;
pub use fuel_consumed::PerformancesFuelConsumed;
pub use maximum::mission_maximum;
pub use mean_effective_pressure::PerformancesMeanEffectivePressure;
pub use sfc::{PerformancesSfc, RegressionAxis, SfcRegression};
pub use torque::PerformancesTorque;

use crate::support::{
    component::Component,
    constraints::{CaliberQuantity, EnforceCaliber, EnsureCaliber},
    naming::ComponentPaths,
    registry::{RegistryError, SubmodelOptions, SubmodelRegistry},
};

/// Subsystem segment of engine variable paths.
pub const SUBSYSTEM: &str = "ice";

pub mod services {
    pub const CONSTRAINTS_POWER: &str = "submodel.propulsion.constraints.ice.power";
}

/// The sized shaft power.
pub const POWER: CaliberQuantity = CaliberQuantity::new("power", "kW");

const SHAFT_POWER: &str = "shaft_power_out";
const RPM: &str = "rpm";
const MEAN_EFFECTIVE_PRESSURE: &str = "mean_effective_pressure";
const SFC: &str = "specific_fuel_consumption";

/// kW·min/(bar·m³·rpm) to make `120 * P / (V * N)` come out in bar.
const CYCLE_FACTOR: f64 = 120.0 * 1.0e3 / 1.0e5;

fn enforce_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(EnforceCaliber::new(
        ComponentPaths::new(SUBSYSTEM, options.id.clone()),
        [POWER],
    ))
}

fn ensure_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(EnsureCaliber::new(
        ComponentPaths::new(SUBSYSTEM, options.id.clone()),
        [POWER],
    ))
}

/// Registers the engine submodels and their defaults.
///
/// # Errors
///
/// Returns an error if an engine service is already registered.
pub fn register(registry: &mut SubmodelRegistry) -> Result<(), RegistryError> {
    registry.register(services::CONSTRAINTS_POWER, "enforce", enforce_factory)?;
    registry.register(services::CONSTRAINTS_POWER, "ensure", ensure_factory)?;
    registry.declare_default(services::CONSTRAINTS_POWER, "enforce")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        models::test_support::points,
        support::component::{ExplicitComponent, Variables},
    };

    #[test]
    fn power_constraint_can_be_ensured() {
        let mut registry = SubmodelRegistry::builtin().unwrap();
        let options = SubmodelOptions::new("ice_1", points(1));
        let paths = ComponentPaths::new(SUBSYSTEM, "ice_1");
        assert_eq!(registry.active(services::CONSTRAINTS_POWER).unwrap(), "enforce");

        registry.select(services::CONSTRAINTS_POWER, "ensure");
        let Component::Explicit(ensure) = registry
            .build(services::CONSTRAINTS_POWER, &options)
            .unwrap()
        else {
            panic!("constraints are explicit");
        };
        let inputs = Variables::new()
            .with(paths.data("power_max"), [95.0])
            .with(paths.data("power_caliber"), [100.0]);
        let mut outputs = ensure.interface().default_outputs();
        ensure.compute(&inputs, &mut outputs).unwrap();
        assert_eq!(
            outputs.scalar(&paths.constraints("power_caliber")).unwrap(),
            -5.0
        );
    }
}
