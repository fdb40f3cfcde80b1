use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{
    EXTERIOR_TEMPERATURE, OUTER_AREA, RADIATIVE_HEAT, SKIN_TEMPERATURE, STEFAN_BOLTZMANN,
    TankPosition, paths,
};

/// Solar irradiance at altitude, W/m².
pub const SOLAR_IRRADIANCE: f64 = 1000.0;

/// Net heat radiated into the skin.
///
/// Grey-body exchange with the surrounding air, plus the absorbed sunlight
/// on the sunlit fraction of externally mounted tanks:
///
/// ```text
/// Q = eps * sigma * A * (T_ext^4 - T_skin^4) + f_sun * alpha * G * A
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesRadiativeHeat {
    position: TankPosition,
    outer_area: String,
    emissivity: String,
    absorptivity: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesRadiativeHeat {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize, position: TankPosition) -> Self {
        let paths = paths(id);
        Self {
            position,
            outer_area: paths.data(OUTER_AREA),
            emissivity: paths.settings("wall:emissivity"),
            absorptivity: paths.settings("wall:absorptivity"),
            number_of_points,
        }
    }

    fn is_sunlit(&self) -> bool {
        self.position.solar_factor() > 0.0
    }

    /// Absorbed solar power per unit area.
    fn solar_flux(&self, inputs: &Variables) -> ComponentResult<f64> {
        if self.is_sunlit() {
            Ok(self.position.solar_factor() * inputs.scalar(&self.absorptivity)? * SOLAR_IRRADIANCE)
        } else {
            Ok(0.0)
        }
    }
}

impl ExplicitComponent for PerformancesRadiativeHeat {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(&self.outer_area, "m**2", Shape::Scalar);
        interface
            .add_input(EXTERIOR_TEMPERATURE, "degK", Shape::Points)
            .val(288.15);
        interface
            .add_input(SKIN_TEMPERATURE, "degK", Shape::Points)
            .val(250.0);
        interface
            .add_input(&self.emissivity, "unitless", Shape::Scalar)
            .val(0.5)
            .desc("emissivity of the tank outer skin");
        interface
            .add_output(RADIATIVE_HEAT, "W", Shape::Points)
            .val(100.0);

        interface.declare_partials(RADIATIVE_HEAT, &self.outer_area, Sparsity::Column);
        interface.declare_partials(RADIATIVE_HEAT, EXTERIOR_TEMPERATURE, Sparsity::Diagonal);
        interface.declare_partials(RADIATIVE_HEAT, SKIN_TEMPERATURE, Sparsity::Diagonal);
        interface.declare_partials(RADIATIVE_HEAT, &self.emissivity, Sparsity::Column);

        if self.is_sunlit() {
            interface
                .add_input(&self.absorptivity, "unitless", Shape::Scalar)
                .val(0.5)
                .desc("solar absorptivity of the tank outer skin");
            interface.declare_partials(RADIATIVE_HEAT, &self.absorptivity, Sparsity::Column);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let area = inputs.scalar(&self.outer_area)?;
        let t_ext = inputs.array(EXTERIOR_TEMPERATURE, n)?;
        let t_skin = inputs.array(SKIN_TEMPERATURE, n)?;
        let eps = inputs.scalar(&self.emissivity)?;
        let solar = self.solar_flux(inputs)?;

        outputs.set(
            RADIATIVE_HEAT,
            (0..n)
                .map(|i| {
                    eps * STEFAN_BOLTZMANN * area * (t_ext[i].powi(4) - t_skin[i].powi(4))
                        + solar * area
                })
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let area = inputs.scalar(&self.outer_area)?;
        let t_ext = inputs.array(EXTERIOR_TEMPERATURE, n)?;
        let t_skin = inputs.array(SKIN_TEMPERATURE, n)?;
        let eps = inputs.scalar(&self.emissivity)?;
        let solar = self.solar_flux(inputs)?;

        let exchange: Vec<f64> = (0..n)
            .map(|i| STEFAN_BOLTZMANN * (t_ext[i].powi(4) - t_skin[i].powi(4)))
            .collect();

        partials.set(
            RADIATIVE_HEAT,
            &self.outer_area,
            Partial::Column(exchange.iter().map(|e| eps * e + solar).collect()),
        );
        partials.set(
            RADIATIVE_HEAT,
            EXTERIOR_TEMPERATURE,
            Partial::Diagonal(
                t_ext
                    .iter()
                    .map(|t| 4.0 * eps * STEFAN_BOLTZMANN * area * t.powi(3))
                    .collect(),
            ),
        );
        partials.set(
            RADIATIVE_HEAT,
            SKIN_TEMPERATURE,
            Partial::Diagonal(
                t_skin
                    .iter()
                    .map(|t| -4.0 * eps * STEFAN_BOLTZMANN * area * t.powi(3))
                    .collect(),
            ),
        );
        partials.set(
            RADIATIVE_HEAT,
            &self.emissivity,
            Partial::Column(exchange.iter().map(|e| e * area).collect()),
        );

        if self.is_sunlit() {
            partials.set(
                RADIATIVE_HEAT,
                &self.absorptivity,
                Partial::Column(vec![
                    self.position.solar_factor() * SOLAR_IRRADIANCE * area;
                    n
                ]),
            );
        }
        Ok(())
    }
}
