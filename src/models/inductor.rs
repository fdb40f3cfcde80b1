//! Filter inductor.
//!
//! Sizing follows the area-product method: the product of the core window
//! and section areas needed to carry the rated current at the chosen flux
//! density and current density. Core mass scales from a reference core as
//! `Ap^0.75`. Performances reduce to the copper losses.
//!
//! The rated current is an RMS value of a sinusoidal current, so its peak is
//! `sqrt(2)` times larger.

mod area_product;
mod core_mass;
mod losses;
mod maximum;
mod resistance;
mod turns;

pub use area_product::SizingAreaProduct;
pub use core_mass::SizingCoreMass;
pub use losses::PerformancesCopperLosses;
pub use maximum::mission_maximum;
pub use resistance::{COPPER_RESISTIVITY, SizingCopperResistance};
pub use turns::SizingNumberOfTurns;

use crate::support::{
    component::Component,
    constraints::{CaliberQuantity, EnforceCaliber, EnsureCaliber},
    naming::ComponentPaths,
    registry::{RegistryError, SubmodelOptions, SubmodelRegistry},
};

/// Subsystem segment of inductor variable paths.
pub const SUBSYSTEM: &str = "inductor";

pub mod services {
    pub const CONSTRAINTS_CURRENT: &str = "submodel.propulsion.constraints.inductor.current";
}

/// The rated RMS current.
pub const CURRENT: CaliberQuantity = CaliberQuantity::new("current", "A");

const INDUCTANCE: &str = "inductance";
const CURRENT_CALIBER: &str = "current_caliber";
const FLUX_DENSITY: &str = "magnetic_flux_density";
const CURRENT_DENSITY: &str = "current_density";
const AREA_PRODUCT: &str = "area_product";
const NUMBER_OF_TURNS: &str = "number_of_turns";
const RESISTANCE: &str = "resistance";

const CURRENT_RMS: &str = "current_rms";
const LOSSES: &str = "power_losses";

fn paths(id: &str) -> ComponentPaths {
    ComponentPaths::new(SUBSYSTEM, id)
}

fn enforce_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(EnforceCaliber::new(paths(&options.id), [CURRENT]))
}

fn ensure_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(EnsureCaliber::new(paths(&options.id), [CURRENT]))
}

/// Registers the inductor submodels and their defaults.
///
/// # Errors
///
/// Returns an error if an inductor service is already registered.
pub fn register(registry: &mut SubmodelRegistry) -> Result<(), RegistryError> {
    registry.register(services::CONSTRAINTS_CURRENT, "enforce", enforce_factory)?;
    registry.register(services::CONSTRAINTS_CURRENT, "ensure", ensure_factory)?;
    registry.declare_default(services::CONSTRAINTS_CURRENT, "enforce")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        models::test_support::points,
        support::component::{ExplicitComponent, Variables},
    };

    #[test]
    fn current_caliber_defaults_to_the_mission_maximum() {
        let registry = SubmodelRegistry::builtin().unwrap();
        let Component::Explicit(enforce) = registry
            .build(
                services::CONSTRAINTS_CURRENT,
                &SubmodelOptions::new("inductor_1", points(1)),
            )
            .unwrap()
        else {
            panic!("constraints are explicit");
        };

        let inputs = Variables::new().with(paths("inductor_1").data("current_max"), [210.0]);
        let mut outputs = enforce.interface().default_outputs();
        enforce.compute(&inputs, &mut outputs).unwrap();
        assert_eq!(
            outputs
                .scalar(&paths("inductor_1").data(CURRENT_CALIBER))
                .unwrap(),
            210.0
        );
    }
}
