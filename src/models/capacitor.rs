//! DC-link capacitor.
//!
//! The capacitance is set by the allowed voltage ripple, the mass by the
//! stored energy at the rated voltage. Losses come from the equivalent
//! series resistance.

mod capacitance;
mod losses;
mod maximum;
mod weight;

pub use capacitance::SizingCapacitance;
pub use losses::PerformancesEsrLosses;
pub use maximum::mission_maximum;
pub use weight::SizingWeight;

use crate::support::{
    component::Component,
    constraints::{CaliberQuantity, EnforceCaliber, EnsureCaliber},
    naming::ComponentPaths,
    registry::{RegistryError, SubmodelOptions, SubmodelRegistry},
};

/// Subsystem segment of capacitor variable paths.
pub const SUBSYSTEM: &str = "capacitor";

pub mod services {
    pub const CONSTRAINTS_VOLTAGE: &str = "submodel.propulsion.constraints.capacitor.voltage";
}

/// The rated voltage.
pub const VOLTAGE: CaliberQuantity = CaliberQuantity::new("voltage", "V");

const CAPACITANCE: &str = "capacitance";
const VOLTAGE_CALIBER: &str = "voltage_caliber";

const DC_VOLTAGE: &str = "dc_voltage";
const CURRENT_RMS: &str = "current_rms";
const LOSSES: &str = "power_losses";

fn paths(id: &str) -> ComponentPaths {
    ComponentPaths::new(SUBSYSTEM, id)
}

fn enforce_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(EnforceCaliber::new(paths(&options.id), [VOLTAGE]))
}

fn ensure_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(EnsureCaliber::new(paths(&options.id), [VOLTAGE]))
}

/// Registers the capacitor submodels and their defaults.
///
/// # Errors
///
/// Returns an error if a capacitor service is already registered.
pub fn register(registry: &mut SubmodelRegistry) -> Result<(), RegistryError> {
    registry.register(services::CONSTRAINTS_VOLTAGE, "enforce", enforce_factory)?;
    registry.register(services::CONSTRAINTS_VOLTAGE, "ensure", ensure_factory)?;
    registry.declare_default(services::CONSTRAINTS_VOLTAGE, "enforce")
}
