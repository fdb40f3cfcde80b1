use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ImplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{
    EXTERIOR_TEMPERATURE, HEAT_TRANSFER_COEFFICIENT, OUTER_AREA, SKIN_TEMPERATURE,
    STEFAN_BOLTZMANN, STORAGE_TEMPERATURE, SOLAR_IRRADIANCE, THERMAL_RESISTANCE, TankPosition,
    paths,
};

/// Skin temperature at which the heat reaching the skin from outside equals
/// the heat conducted through the wall.
///
/// Residual, per point:
///
/// ```text
/// h A (T_ext - T_s) + eps sigma A (T_ext^4 - T_s^4) + f_sun alpha G A
///     - (T_s - T_storage) / R
/// ```
///
/// The residual is monotonically decreasing in `T_s`, so it has a single
/// root between the storage temperature and the warmest of the exterior and
/// radiative equilibrium temperatures.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformancesSkinTemperature {
    position: TankPosition,
    outer_area: String,
    thermal_resistance: String,
    emissivity: String,
    absorptivity: String,
    storage_temperature: f64,
    number_of_points: NonZeroUsize,
}

/// Inputs shared by every point.
struct Shell {
    area: f64,
    resistance: f64,
    emissivity: f64,
    solar_flux: f64,
}

impl PerformancesSkinTemperature {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize, position: TankPosition) -> Self {
        let paths = paths(id);
        Self {
            position,
            outer_area: paths.data(OUTER_AREA),
            thermal_resistance: paths.data(THERMAL_RESISTANCE),
            emissivity: paths.settings("wall:emissivity"),
            absorptivity: paths.settings("wall:absorptivity"),
            storage_temperature: STORAGE_TEMPERATURE,
            number_of_points,
        }
    }

    #[must_use]
    pub fn with_storage_temperature(mut self, storage_temperature: f64) -> Self {
        self.storage_temperature = storage_temperature;
        self
    }

    fn is_sunlit(&self) -> bool {
        self.position.solar_factor() > 0.0
    }

    fn shell(&self, inputs: &Variables) -> ComponentResult<Shell> {
        let solar_flux = if self.is_sunlit() {
            self.position.solar_factor() * inputs.scalar(&self.absorptivity)? * SOLAR_IRRADIANCE
        } else {
            0.0
        };
        Ok(Shell {
            area: inputs.scalar(&self.outer_area)?,
            resistance: inputs.scalar(&self.thermal_resistance)?,
            emissivity: inputs.scalar(&self.emissivity)?,
            solar_flux,
        })
    }
}

impl ImplicitComponent for PerformancesSkinTemperature {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(HEAT_TRANSFER_COEFFICIENT, "W/m**2/K", Shape::Points)
            .val(5.0);
        interface
            .add_input(EXTERIOR_TEMPERATURE, "degK", Shape::Points)
            .val(288.15);
        interface.add_input(&self.outer_area, "m**2", Shape::Scalar);
        interface.add_input(&self.thermal_resistance, "K/W", Shape::Scalar);
        interface
            .add_input(&self.emissivity, "unitless", Shape::Scalar)
            .val(0.5);
        interface
            .add_output(SKIN_TEMPERATURE, "degK", Shape::Points)
            .val(250.0)
            .lower(self.storage_temperature);

        for wrt in [SKIN_TEMPERATURE, HEAT_TRANSFER_COEFFICIENT, EXTERIOR_TEMPERATURE] {
            interface.declare_partials(SKIN_TEMPERATURE, wrt, Sparsity::Diagonal);
        }
        for wrt in [&self.outer_area, &self.thermal_resistance, &self.emissivity] {
            interface.declare_partials(SKIN_TEMPERATURE, wrt, Sparsity::Column);
        }

        if self.is_sunlit() {
            interface
                .add_input(&self.absorptivity, "unitless", Shape::Scalar)
                .val(0.5);
            interface.declare_partials(SKIN_TEMPERATURE, &self.absorptivity, Sparsity::Column);
        }
        interface
    }

    fn apply_nonlinear(
        &self,
        inputs: &Variables,
        outputs: &Variables,
        residuals: &mut Variables,
    ) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let h = inputs.array(HEAT_TRANSFER_COEFFICIENT, n)?;
        let t_ext = inputs.array(EXTERIOR_TEMPERATURE, n)?;
        let t_skin = outputs.array(SKIN_TEMPERATURE, n)?;
        let shell = self.shell(inputs)?;

        let residual: Vec<f64> = (0..n)
            .map(|i| {
                let convection = h[i] * shell.area * (t_ext[i] - t_skin[i]);
                let radiation = shell.emissivity
                    * STEFAN_BOLTZMANN
                    * shell.area
                    * (t_ext[i].powi(4) - t_skin[i].powi(4));
                let conduction = (t_skin[i] - self.storage_temperature) / shell.resistance;
                convection + radiation + shell.solar_flux * shell.area - conduction
            })
            .collect();
        residuals.set(SKIN_TEMPERATURE, residual);
        Ok(())
    }

    fn linearize(
        &self,
        inputs: &Variables,
        outputs: &Variables,
        partials: &mut Partials,
    ) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let h = inputs.array(HEAT_TRANSFER_COEFFICIENT, n)?;
        let t_ext = inputs.array(EXTERIOR_TEMPERATURE, n)?;
        let t_skin = outputs.array(SKIN_TEMPERATURE, n)?;
        let Shell {
            area,
            resistance,
            emissivity,
            solar_flux,
        } = self.shell(inputs)?;
        let sigma = STEFAN_BOLTZMANN;

        partials.set(
            SKIN_TEMPERATURE,
            SKIN_TEMPERATURE,
            Partial::Diagonal(
                (0..n)
                    .map(|i| {
                        -h[i] * area
                            - 4.0 * emissivity * sigma * area * t_skin[i].powi(3)
                            - 1.0 / resistance
                    })
                    .collect(),
            ),
        );
        partials.set(
            SKIN_TEMPERATURE,
            HEAT_TRANSFER_COEFFICIENT,
            Partial::Diagonal((0..n).map(|i| area * (t_ext[i] - t_skin[i])).collect()),
        );
        partials.set(
            SKIN_TEMPERATURE,
            EXTERIOR_TEMPERATURE,
            Partial::Diagonal(
                (0..n)
                    .map(|i| h[i] * area + 4.0 * emissivity * sigma * area * t_ext[i].powi(3))
                    .collect(),
            ),
        );
        partials.set(
            SKIN_TEMPERATURE,
            &self.outer_area,
            Partial::Column(
                (0..n)
                    .map(|i| {
                        h[i] * (t_ext[i] - t_skin[i])
                            + emissivity * sigma * (t_ext[i].powi(4) - t_skin[i].powi(4))
                            + solar_flux
                    })
                    .collect(),
            ),
        );
        partials.set(
            SKIN_TEMPERATURE,
            &self.thermal_resistance,
            Partial::Column(
                t_skin
                    .iter()
                    .map(|t| (t - self.storage_temperature) / (resistance * resistance))
                    .collect(),
            ),
        );
        partials.set(
            SKIN_TEMPERATURE,
            &self.emissivity,
            Partial::Column(
                (0..n)
                    .map(|i| sigma * area * (t_ext[i].powi(4) - t_skin[i].powi(4)))
                    .collect(),
            ),
        );
        if self.is_sunlit() {
            partials.set(
                SKIN_TEMPERATURE,
                &self.absorptivity,
                Partial::Column(vec![
                    self.position.solar_factor() * SOLAR_IRRADIANCE * area;
                    n
                ]),
            );
        }
        Ok(())
    }

    /// Starts from the exterior temperature wherever the current value is
    /// not a temperature the fuel could be warmed to.
    fn guess_nonlinear(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let t_ext = inputs.array(EXTERIOR_TEMPERATURE, n)?;
        outputs.array(SKIN_TEMPERATURE, n)?;

        for (t_skin, t_ext) in outputs.get_mut(SKIN_TEMPERATURE)?.iter_mut().zip(t_ext) {
            if t_skin.is_nan() || *t_skin < self.storage_temperature {
                *t_skin = *t_ext;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::{
        cryogenic_hydrogen_tank::{
            CONDUCTION_HEAT, CONVECTIVE_HEAT, PerformancesConductionHeat,
            PerformancesConvectiveHeat, PerformancesRadiativeHeat, RADIATIVE_HEAT,
        },
        test_support::{assert_residual_partials, evaluate, points, residuals},
    };

    fn inputs() -> Variables {
        let paths = paths("tank_1");
        Variables::new()
            .with(HEAT_TRANSFER_COEFFICIENT, [4.0, 12.0])
            .with(EXTERIOR_TEMPERATURE, [288.15, 223.15])
            .with(paths.data(OUTER_AREA), [25.0])
            .with(paths.data(THERMAL_RESISTANCE), [0.8])
            .with(paths.settings("wall:emissivity"), [0.6])
            .with(paths.settings("wall:absorptivity"), [0.4])
    }

    /// Newton iterations on the residual, one point at a time.
    fn solve(component: &PerformancesSkinTemperature, inputs: &Variables) -> Variables {
        let mut outputs = Variables::new().with(SKIN_TEMPERATURE, [f64::NAN, 10.0]);
        component.guess_nonlinear(inputs, &mut outputs).unwrap();

        for _ in 0..50 {
            let r = residuals(component, inputs, &outputs);
            let jacobian = component.jacobian(inputs, &outputs).unwrap();
            let Some(Partial::Diagonal(slope)) = jacobian.get(SKIN_TEMPERATURE, SKIN_TEMPERATURE)
            else {
                panic!("skin temperature partial should be diagonal");
            };
            let step: Vec<f64> = r
                .get(SKIN_TEMPERATURE)
                .unwrap()
                .iter()
                .zip(slope)
                .map(|(r, s)| r / s)
                .collect();
            for (t, dt) in outputs.get_mut(SKIN_TEMPERATURE).unwrap().iter_mut().zip(step) {
                *t -= dt;
            }
        }
        outputs
    }

    #[test]
    fn guess_starts_from_exterior_temperature() {
        let component = PerformancesSkinTemperature::new("tank_1", points(2), TankPosition::InTheBack);
        let mut outputs = Variables::new().with(SKIN_TEMPERATURE, [f64::NAN, 150.0]);
        component.guess_nonlinear(&inputs(), &mut outputs).unwrap();
        assert_eq!(outputs.get(SKIN_TEMPERATURE).unwrap(), [288.15, 150.0].as_slice());
    }

    #[test]
    fn balance_matches_the_heat_components() {
        for position in [TankPosition::InTheCabin, TankPosition::WingPod] {
            let component = PerformancesSkinTemperature::new("tank_1", points(2), position);
            let solved = solve(&component, &inputs());

            let mut state = inputs();
            state.extend(&solved);
            let convective = evaluate(&PerformancesConvectiveHeat::new("tank_1", points(2)), &state);
            let radiative =
                evaluate(&PerformancesRadiativeHeat::new("tank_1", points(2), position), &state);
            let conducted = evaluate(&PerformancesConductionHeat::new("tank_1", points(2)), &state);

            for i in 0..2 {
                let t_skin = solved.get(SKIN_TEMPERATURE).unwrap()[i];
                assert!(t_skin > STORAGE_TEMPERATURE);
                assert!(t_skin < 288.15 + 50.0);
                assert_relative_eq!(
                    convective.get(CONVECTIVE_HEAT).unwrap()[i]
                        + radiative.get(RADIATIVE_HEAT).unwrap()[i],
                    conducted.get(CONDUCTION_HEAT).unwrap()[i],
                    max_relative = 1e-9
                );
            }
        }
    }

    #[test]
    fn partials() {
        for position in [TankPosition::InTheFront, TankPosition::Underbelly] {
            let component = PerformancesSkinTemperature::new("tank_1", points(2), position);
            let outputs = Variables::new().with(SKIN_TEMPERATURE, [250.0, 210.0]);
            assert_residual_partials(&component, &inputs(), &outputs);
        }
    }
}
