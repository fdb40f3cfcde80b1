//! Three-phase active rectifier (AC to DC).
//!
//! The performance chain for one mission evaluation is:
//!
//! 1. Adaptors spread the DC voltage target, switching frequency and
//!    heat-sink temperature over the mission.
//! 2. [`PerformancesVoltagePeak`] and the implicit
//!    [`PerformancesModulationIndex`] relate AC and DC voltages.
//! 3. [`PerformancesCurrentAc`] derives the phase current from the DC power.
//! 4. Device characteristics ([`PerformancesTemperatureScaling`]) feed
//!    [`PerformancesSwitchingLosses`] and [`PerformancesConductionLosses`],
//!    summed by [`PerformancesLosses`].
//! 5. [`PerformancesCasingTemperature`] and
//!    [`PerformancesJunctionTemperature`] close the thermal loop back to the
//!    device characteristics.
//! 6. [`PerformancesEfficiency`] and [`PerformancesMaximum`].
//!
//! Sizing and constraints operate on the mission maxima.

mod adaptors;
mod conduction_losses;
mod constraints;
mod current;
mod efficiency;
mod losses;
mod maximum;
mod modulation_index;
mod switching_losses;
mod temperature_scaling;
mod temperatures;
mod voltage_peak;
mod weight;

pub use adaptors::{
    efficiency_fixed, heat_sink_temperature, junction_temperature_fixed, switching_frequency,
    voltage_target,
};
pub use conduction_losses::{MODULATION_INDEX_UPPER, PerformancesConductionLosses};
pub use constraints::{CALIBERS, enforce, ensure};
pub use current::PerformancesCurrentAc;
pub use efficiency::PerformancesEfficiency;
pub use losses::PerformancesLosses;
pub use maximum::PerformancesMaximum;
pub use modulation_index::PerformancesModulationIndex;
pub use switching_losses::PerformancesSwitchingLosses;
pub use temperature_scaling::PerformancesTemperatureScaling;
pub use temperatures::{PerformancesCasingTemperature, PerformancesJunctionTemperature};
pub use voltage_peak::PerformancesVoltagePeak;
pub use weight::SizingWeight;

use crate::support::{
    component::Component,
    constraints::{EnforceCaliber, EnsureCaliber},
    naming::ComponentPaths,
    registry::{RegistryError, SubmodelOptions, SubmodelRegistry},
};

/// Subsystem segment of rectifier variable paths.
pub const SUBSYSTEM: &str = "rectifier";

/// Registry service names.
pub mod services {
    pub const EFFICIENCY: &str = "submodel.propulsion.performances.rectifier.efficiency";
    pub const JUNCTION_TEMPERATURE: &str =
        "submodel.propulsion.performances.rectifier.junction_temperature";
    pub const CONSTRAINTS_CURRENT_AC: &str =
        "submodel.propulsion.constraints.rectifier.current_ac";
    pub const CONSTRAINTS_CURRENT_DC: &str =
        "submodel.propulsion.constraints.rectifier.current_dc";
    pub const CONSTRAINTS_VOLTAGE_AC: &str =
        "submodel.propulsion.constraints.rectifier.voltage_ac";
    pub const CONSTRAINTS_VOLTAGE_DC: &str =
        "submodel.propulsion.constraints.rectifier.voltage_dc";
    pub const CONSTRAINTS_LOSSES: &str = "submodel.propulsion.constraints.rectifier.losses";
    pub const CONSTRAINTS_JUNCTION_TEMPERATURE: &str =
        "submodel.propulsion.constraints.rectifier.junction_temperature";
}

// Mission array names.
const AC_CURRENT: &str = "ac_current_rms_in_one_phase";
const AC_VOLTAGE_RMS: &str = "ac_voltage_rms_in";
const AC_VOLTAGE_PEAK: &str = "ac_voltage_peak_in";
const DC_VOLTAGE: &str = "dc_voltage_out";
const DC_VOLTAGE_TARGET: &str = "dc_voltage_out_target";
const DC_CURRENT: &str = "dc_current_out";
const MODULATION_INDEX: &str = "modulation_idx";
const SWITCHING_FREQUENCY: &str = "switching_frequency";
const HEAT_SINK_TEMPERATURE: &str = "heat_sink_temperature";
const CASING_TEMPERATURE: &str = "casing_temperature";
const EFFICIENCY: &str = "efficiency";
const LOSSES: &str = "losses_rectifier";

/// The two semiconductor devices of a rectifier leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Igbt,
    Diode,
}

impl Device {
    pub const ALL: [Device; 2] = [Device::Igbt, Device::Diode];

    /// Path segment of device data, e.g. `igbt:resistance`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Device::Igbt => "igbt",
            Device::Diode => "diode",
        }
    }

    /// Mission array of the junction temperature.
    #[must_use]
    pub fn temperature(self) -> &'static str {
        match self {
            Device::Igbt => "IGBT_temperature",
            Device::Diode => "diode_temperature",
        }
    }

    #[must_use]
    pub fn conduction_losses(self) -> &'static str {
        match self {
            Device::Igbt => "conduction_losses_IGBT",
            Device::Diode => "conduction_losses_diode",
        }
    }

    #[must_use]
    pub fn switching_losses(self) -> &'static str {
        match self {
            Device::Igbt => "switching_losses_IGBT",
            Device::Diode => "switching_losses_diode",
        }
    }

    #[must_use]
    pub fn resistance(self) -> &'static str {
        match self {
            Device::Igbt => "resistance_igbt",
            Device::Diode => "resistance_diode",
        }
    }

    #[must_use]
    pub fn gate_voltage(self) -> &'static str {
        match self {
            Device::Igbt => "gate_voltage_igbt",
            Device::Diode => "gate_voltage_diode",
        }
    }
}

fn paths(options: &SubmodelOptions) -> ComponentPaths {
    ComponentPaths::new(SUBSYSTEM, options.id.clone())
}

fn efficiency_fixed_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(efficiency_fixed(&options.id, options.number_of_points))
}

fn efficiency_from_losses_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(PerformancesEfficiency::new(options.number_of_points))
}

fn junction_fixed_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(junction_temperature_fixed(
        &options.id,
        options.number_of_points,
    ))
}

fn junction_from_losses_factory(options: &SubmodelOptions) -> Component {
    Component::explicit(PerformancesJunctionTemperature::new(
        &options.id,
        options.number_of_points,
    ))
}

fn enforce_factory<const Q: usize>(options: &SubmodelOptions) -> Component {
    Component::explicit(EnforceCaliber::new(paths(options), [CALIBERS[Q].1]))
}

fn ensure_factory<const Q: usize>(options: &SubmodelOptions) -> Component {
    Component::explicit(EnsureCaliber::new(paths(options), [CALIBERS[Q].1]))
}

fn register_constraint<const Q: usize>(
    registry: &mut SubmodelRegistry,
) -> Result<(), RegistryError> {
    let service = CALIBERS[Q].0;
    registry.register(service, "enforce", enforce_factory::<Q>)?;
    registry.register(service, "ensure", ensure_factory::<Q>)?;
    registry.declare_default(service, "enforce")
}

/// Registers the rectifier submodels and their defaults.
///
/// # Errors
///
/// Returns an error if any rectifier service is already registered.
pub fn register(registry: &mut SubmodelRegistry) -> Result<(), RegistryError> {
    registry.register(services::EFFICIENCY, "fixed", efficiency_fixed_factory)?;
    registry.register(
        services::EFFICIENCY,
        "from_losses",
        efficiency_from_losses_factory,
    )?;
    registry.declare_default(services::EFFICIENCY, "from_losses")?;

    registry.register(
        services::JUNCTION_TEMPERATURE,
        "fixed",
        junction_fixed_factory,
    )?;
    registry.register(
        services::JUNCTION_TEMPERATURE,
        "from_losses",
        junction_from_losses_factory,
    )?;
    registry.declare_default(services::JUNCTION_TEMPERATURE, "from_losses")?;

    register_constraint::<0>(registry)?;
    register_constraint::<1>(registry)?;
    register_constraint::<2>(registry)?;
    register_constraint::<3>(registry)?;
    register_constraint::<4>(registry)?;
    register_constraint::<5>(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::test_support::points,
        support::component::{ExplicitComponent, Variables},
    };

    #[test]
    fn every_caliber_has_a_constraint_service() {
        let registry = SubmodelRegistry::builtin().unwrap();
        for (service, _) in CALIBERS {
            assert_eq!(registry.active(service).unwrap(), "enforce");
        }
        assert_eq!(
            registry.active(services::EFFICIENCY).unwrap(),
            "from_losses"
        );
    }

    #[test]
    fn current_ac_caliber_enforce_and_ensure() {
        let mut registry = SubmodelRegistry::builtin().unwrap();
        let options = SubmodelOptions::new("rectifier_1", points(1));
        let paths = paths(&options);

        let Component::Explicit(enforce) = registry
            .build(services::CONSTRAINTS_CURRENT_AC, &options)
            .unwrap()
        else {
            panic!("constraints are explicit");
        };
        let inputs = Variables::new().with(paths.data("current_ac_max"), [133.0]);
        let mut outputs = enforce.interface().default_outputs();
        enforce.compute(&inputs, &mut outputs).unwrap();
        assert_relative_eq!(
            outputs.scalar(&paths.data("current_ac_caliber")).unwrap(),
            133.0
        );

        registry.select(services::CONSTRAINTS_CURRENT_AC, "ensure");
        let Component::Explicit(ensure) = registry
            .build(services::CONSTRAINTS_CURRENT_AC, &options)
            .unwrap()
        else {
            panic!("constraints are explicit");
        };
        let inputs = inputs.with(paths.data("current_ac_caliber"), [150.0]);
        let mut outputs = ensure.interface().default_outputs();
        ensure.compute(&inputs, &mut outputs).unwrap();
        assert_relative_eq!(
            outputs
                .scalar(&paths.constraints("current_ac_caliber"))
                .unwrap(),
            -17.0
        );
    }
}
