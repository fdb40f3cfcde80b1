//! Cryogenic liquid hydrogen tank.
//!
//! Sizing turns the fuel capacity into a cylinder with hemispherical ends,
//! adjusts its outer diameter to the mounting position and derives the wall
//! thermal resistance, mass and centre of gravity.
//!
//! Performances follow the heat flowing into the fuel at each point:
//!
//! ```text
//! ISA exterior -> Rayleigh -> Nusselt -> convection coefficient
//!   -> convective + radiative heat = conduction through the wall (skin balance)
//!   -> boil-off -> fuel remaining
//! ```
//!
//! Externally mounted tanks (wing pod, underbelly) see forced convection
//! and sunlight; tanks inside the fuselage see natural convection only.

mod boil_off;
mod cg;
mod conduction;
mod convection;
mod cylindrical_length;
mod exterior;
mod fuel;
mod inner_volume;
mod length;
mod nusselt;
mod outer_area;
mod outer_diameter;
mod position;
mod radiation;
mod rayleigh;
mod skin_temperature;
mod thermal_resistance;
mod weight;

pub use boil_off::{LATENT_HEAT, PerformancesBoilOff};
pub use cg::SizingCg;
pub use conduction::{PerformancesConductionHeat, STORAGE_TEMPERATURE};
pub use convection::{PerformancesConvectionCoefficient, PerformancesConvectiveHeat};
pub use cylindrical_length::SizingCylindricalLength;
pub use exterior::PerformancesExteriorConditions;
pub use fuel::{PerformancesFuelRemaining, PerformancesTotalFuelFlowed};
pub use inner_volume::SizingInnerVolume;
pub use length::SizingLength;
pub use nusselt::PerformancesNusseltNumber;
pub use outer_area::SizingOuterArea;
pub use outer_diameter::{SizingInitialOuterDiameter, SizingOuterDiameter};
pub use position::TankPosition;
pub use radiation::{PerformancesRadiativeHeat, SOLAR_IRRADIANCE};
pub use rayleigh::PerformancesRayleighNumber;
pub use skin_temperature::PerformancesSkinTemperature;
pub use thermal_resistance::SizingThermalResistance;
pub use weight::SizingWeight;

use crate::support::{
    clip::{Clipped, clip},
    naming::ComponentPaths,
};

/// Subsystem segment of tank variable paths.
pub const SUBSYSTEM: &str = "cryogenic_hydrogen_tank";

// Design data attributes.
const INNER_DIAMETER: &str = "dimension:inner_diameter";
const INITIAL_OUTER_DIAMETER: &str = "dimension:initial_outer_diameter";
const OUTER_DIAMETER: &str = "dimension:outer_diameter";
const CYLINDRICAL_LENGTH: &str = "dimension:cylindrical_length";
const LENGTH: &str = "dimension:length";
const WALL_THICKNESS: &str = "wall:thickness";
const INSULATION_THICKNESS: &str = "insulation:thickness";
const OUTER_AREA: &str = "outer_area";
const THERMAL_RESISTANCE: &str = "thermal_resistance";
const FUEL_TOTAL_MISSION: &str = "fuel_total_mission";

const FUSELAGE_HEIGHT: &str = "data:geometry:fuselage:maximum_height";

// Mission arrays.
const ALTITUDE: &str = "altitude";
const TRUE_AIRSPEED: &str = "true_airspeed";
const TIME_STEP: &str = "time_step";
const EXTERIOR_TEMPERATURE: &str = "exterior_temperature";
const KINEMATIC_VISCOSITY: &str = "exterior_kinematic_viscosity";
const THERMAL_CONDUCTIVITY: &str = "exterior_thermal_conductivity";
const PRANDTL_NUMBER: &str = "exterior_prandtl_number";
const SKIN_TEMPERATURE: &str = "skin_temperature";
const RAYLEIGH_NUMBER: &str = "rayleigh_number";
const NUSSELT_NUMBER: &str = "nusselt_number";
const HEAT_TRANSFER_COEFFICIENT: &str = "heat_transfer_coefficient";
const CONVECTIVE_HEAT: &str = "convective_heat";
const RADIATIVE_HEAT: &str = "radiative_heat";
const CONDUCTION_HEAT: &str = "conduction_heat";
const FUEL_CONSUMED: &str = "fuel_consumed_t";
const FUEL_BOIL_OFF: &str = "fuel_boil_off_t";
const FUEL_REMAINING: &str = "fuel_remaining_t";

/// Stefan-Boltzmann constant, W/m²/K⁴.
const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

fn paths(id: &str) -> ComponentPaths {
    ComponentPaths::new(SUBSYSTEM, id)
}

/// Cylindrical length that enters areas and volumes. A negative length
/// means the tank is (at most) a sphere.
fn cylinder(length: f64) -> Clipped {
    clip(length, 0.0, f64::INFINITY)
}
