//! Powertrain component models.
//!
//! # Organization
//!
//! One module per powertrain subsystem. The module name is also the
//! subsystem segment of the variable paths, e.g.
//! `data:propulsion:he_power_train:rectifier:<id>:...`.
//!
//! # Naming
//!
//! Components follow the split of a sizing loop:
//!
//! - `Sizing*`: design-time scalars (masses, dimensions, calibers).
//! - `Performances*`: mission arrays, one value per evaluation point.
//!
//! Mission-array variables have bare names (`dc_voltage_out`); the
//! runtime namespaces them by component instance when it builds the graph.

pub mod capacitor;
pub mod cryogenic_hydrogen_tank;
pub mod heat_sink;
pub mod ice;
pub mod inductor;
pub mod rectifier;

#[cfg(test)]
pub(crate) mod test_support;

use crate::support::registry::{RegistryError, SubmodelRegistry};

/// Registers every built-in submodel and its default.
pub(crate) fn register_builtin(registry: &mut SubmodelRegistry) -> Result<(), RegistryError> {
    rectifier::register(registry)?;
    ice::register(registry)?;
    inductor::register(registry)?;
    capacitor::register(registry)?;
    heat_sink::register(registry)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::registry::SubmodelOptions;

    #[test]
    fn every_builtin_service_builds_a_valid_component() {
        let registry = SubmodelRegistry::builtin().unwrap();
        let options = SubmodelOptions::new("unit_1", test_support::points(4));

        let services: Vec<_> = registry.services().collect();
        assert!(!services.is_empty());

        for service in services {
            let keys: Vec<_> = registry.implementations(service).collect();
            for key in keys {
                let mut registry = registry.clone();
                registry.select(service, key);
                let component = registry.build(service, &options).unwrap();
                assert!(
                    component.interface().validate().is_ok(),
                    "{service}/{key} has an invalid interface"
                );
            }
        }
    }
}
