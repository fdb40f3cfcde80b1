//! Cold plate under the power modules.
//!
//! Sized as a flat plate: its footprint and the coolant-side convection
//! coefficient give the thermal resistance, its footprint and thickness the
//! mass. At each point the plate sits above the coolant temperature by the
//! dissipated heat times that resistance.

mod temperature;
mod thermal_resistance;
mod weight;

pub use temperature::{PerformancesTemperature, temperature_fixed};
pub use thermal_resistance::SizingThermalResistance;
pub use weight::SizingWeight;

use crate::support::{
    component::Component,
    naming::ComponentPaths,
    registry::{RegistryError, SubmodelOptions, SubmodelRegistry},
};

/// Subsystem segment of heat sink variable paths.
pub const SUBSYSTEM: &str = "heat_sink";

pub mod services {
    pub const TEMPERATURE: &str = "submodel.propulsion.performances.heat_sink.temperature";
}

const LENGTH: &str = "dimension:length";
const WIDTH: &str = "dimension:width";
const THERMAL_RESISTANCE: &str = "thermal_resistance";

const COOLANT_TEMPERATURE: &str = "coolant_temperature";
const HEAT: &str = "heat_to_dissipate";
const TEMPERATURE: &str = "heat_sink_temperature";

fn paths(id: &str) -> ComponentPaths {
    ComponentPaths::new(SUBSYSTEM, id)
}

fn fixed_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(temperature_fixed(&options.id, options.number_of_points))
}

fn from_losses_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(PerformancesTemperature::new(
        &options.id,
        options.number_of_points,
    ))
}

/// Registers the heat sink submodels and their defaults.
///
/// # Errors
///
/// Returns an error if a heat sink service is already registered.
pub fn register(registry: &mut SubmodelRegistry) -> Result<(), RegistryError> {
    registry.register(services::TEMPERATURE, "fixed", fixed_factory)?;
    registry.register(services::TEMPERATURE, "from_losses", from_losses_factory)?;
    registry.declare_default(services::TEMPERATURE, "from_losses")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        models::test_support::points,
        support::component::{ExplicitComponent, Variables},
    };

    #[test]
    fn fixed_temperature_can_be_selected() {
        let mut registry = SubmodelRegistry::builtin().unwrap();
        assert_eq!(registry.active(services::TEMPERATURE).unwrap(), "from_losses");

        registry.select(services::TEMPERATURE, "fixed");
        let Component::Explicit(fixed) = registry
            .build(
                services::TEMPERATURE,
                &SubmodelOptions::new("heat_sink_1", points(3)),
            )
            .unwrap()
        else {
            panic!("the fixed temperature is explicit");
        };

        let inputs =
            Variables::new().with(paths("heat_sink_1").data("temperature_mission"), [330.0]);
        let mut outputs = fixed.interface().default_outputs();
        fixed.compute(&inputs, &mut outputs).unwrap();
        assert_eq!(outputs.get(TEMPERATURE).unwrap(), [330.0; 3].as_slice());
    }
}
