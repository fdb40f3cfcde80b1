use std::num::NonZeroUsize;

use crate::support::{
    clip::{CLIPPED_GRADIENT, clip},
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
};

use super::{
    KINEMATIC_VISCOSITY, LENGTH, NUSSELT_NUMBER, OUTER_DIAMETER, PRANDTL_NUMBER,
    RAYLEIGH_NUMBER, TRUE_AIRSPEED, TankPosition, paths,
};

/// Reynolds and Rayleigh numbers below this are clipped, the correlations
/// are singular at zero.
const DIMENSIONLESS_FLOOR: f64 = 1.0;

/// Forced convection over the pod, `Nu = 0.03625 * Pr^0.43 * Re^0.8`.
const FORCED_COEFFICIENT: f64 = 0.03625;
const FORCED_PRANDTL_EXPONENT: f64 = 0.43;
const FORCED_REYNOLDS_EXPONENT: f64 = 0.8;

/// Natural convection coefficients `(C, n)` of `Nu = C * Ra^n`, by aspect
/// ratio `length / diameter`.
fn natural_coefficients(aspect_ratio: f64) -> (f64, f64) {
    if aspect_ratio < 1.0 {
        (0.59, 0.25)
    } else if aspect_ratio < 5.0 {
        (0.53, 0.25)
    } else {
        (0.13, 1.0 / 3.0)
    }
}

/// Nusselt number at the tank skin.
///
/// Externally mounted tanks see forced convection with a Reynolds number on
/// the tank length. Tanks inside the fuselage see natural convection, with
/// the correlation picked from the tank aspect ratio. The aspect ratio only
/// selects coefficients, so the Nusselt number has no partial with respect
/// to the tank dimensions in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesNusseltNumber {
    position: TankPosition,
    length: String,
    outer_diameter: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesNusseltNumber {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize, position: TankPosition) -> Self {
        let paths = paths(id);
        Self {
            position,
            length: paths.data(LENGTH),
            outer_diameter: paths.data(OUTER_DIAMETER),
            number_of_points,
        }
    }

    fn forced(&self, inputs: &Variables, partials: Option<&mut Partials>) -> ComponentResult<Vec<f64>> {
        let n = self.number_of_points.get();
        let speed = inputs.array(TRUE_AIRSPEED, n)?;
        let nu = inputs.array(KINEMATIC_VISCOSITY, n)?;
        let pr = inputs.array(PRANDTL_NUMBER, n)?;
        let length = inputs.scalar(&self.length)?;

        let mut nusselt = Vec::with_capacity(n);
        let mut d_re = Vec::with_capacity(n);
        let mut d_pr = Vec::with_capacity(n);
        for i in 0..n {
            let re = clip(speed[i] * length / nu[i], DIMENSIONLESS_FLOOR, f64::INFINITY);
            let value = FORCED_COEFFICIENT
                * pr[i].powf(FORCED_PRANDTL_EXPONENT)
                * re.value.powf(FORCED_REYNOLDS_EXPONENT);
            nusselt.push(value);
            d_re.push(re.mask(FORCED_REYNOLDS_EXPONENT * value / re.value, CLIPPED_GRADIENT));
            d_pr.push(FORCED_PRANDTL_EXPONENT * value / pr[i]);
        }

        if let Some(partials) = partials {
            // Re = V * L / nu
            partials.set(
                NUSSELT_NUMBER,
                TRUE_AIRSPEED,
                Partial::Diagonal((0..n).map(|i| d_re[i] * length / nu[i]).collect()),
            );
            partials.set(
                NUSSELT_NUMBER,
                KINEMATIC_VISCOSITY,
                Partial::Diagonal(
                    (0..n)
                        .map(|i| -d_re[i] * speed[i] * length / (nu[i] * nu[i]))
                        .collect(),
                ),
            );
            partials.set(
                NUSSELT_NUMBER,
                &self.length,
                Partial::Column((0..n).map(|i| d_re[i] * speed[i] / nu[i]).collect()),
            );
            partials.set(NUSSELT_NUMBER, PRANDTL_NUMBER, Partial::Diagonal(d_pr));
        }
        Ok(nusselt)
    }

    fn natural(&self, inputs: &Variables, partials: Option<&mut Partials>) -> ComponentResult<Vec<f64>> {
        let n = self.number_of_points.get();
        let rayleigh = inputs.array(RAYLEIGH_NUMBER, n)?;
        let aspect_ratio = inputs.scalar(&self.length)? / inputs.scalar(&self.outer_diameter)?;
        let (c, exponent) = natural_coefficients(aspect_ratio);

        let mut nusselt = Vec::with_capacity(n);
        let mut d_ra = Vec::with_capacity(n);
        for ra in rayleigh {
            let ra = clip(*ra, DIMENSIONLESS_FLOOR, f64::INFINITY);
            let value = c * ra.value.powf(exponent);
            nusselt.push(value);
            d_ra.push(ra.mask(exponent * value / ra.value, CLIPPED_GRADIENT));
        }

        if let Some(partials) = partials {
            partials.set(NUSSELT_NUMBER, RAYLEIGH_NUMBER, Partial::Diagonal(d_ra));
        }
        Ok(nusselt)
    }

    fn evaluate(&self, inputs: &Variables, partials: Option<&mut Partials>) -> ComponentResult<Vec<f64>> {
        if self.position.is_external() {
            self.forced(inputs, partials)
        } else {
            self.natural(inputs, partials)
        }
    }
}

impl ExplicitComponent for PerformancesNusseltNumber {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(&self.length, "m", Shape::Scalar);
        interface
            .add_output(NUSSELT_NUMBER, "unitless", Shape::Points)
            .val(100.0);

        if self.position.is_external() {
            interface
                .add_input(TRUE_AIRSPEED, "m/s", Shape::Points)
                .val(150.0);
            interface
                .add_input(KINEMATIC_VISCOSITY, "m**2/s", Shape::Points)
                .val(1.46e-5);
            interface
                .add_input(PRANDTL_NUMBER, "unitless", Shape::Points)
                .val(0.71);
            for wrt in [TRUE_AIRSPEED, KINEMATIC_VISCOSITY, PRANDTL_NUMBER] {
                interface.declare_partials(NUSSELT_NUMBER, wrt, Sparsity::Diagonal);
            }
            interface.declare_partials(NUSSELT_NUMBER, &self.length, Sparsity::Column);
        } else {
            interface.add_input(&self.outer_diameter, "m", Shape::Scalar);
            interface
                .add_input(RAYLEIGH_NUMBER, "unitless", Shape::Points)
                .val(1e9);
            interface.declare_partials(NUSSELT_NUMBER, RAYLEIGH_NUMBER, Sparsity::Diagonal);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        outputs.set(NUSSELT_NUMBER, self.evaluate(inputs, None)?);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        self.evaluate(inputs, Some(partials))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    fn inputs(length: f64) -> Variables {
        inputs_at(length, [0.0, 60.0, 120.0])
    }

    fn inputs_at(length: f64, speed: [f64; 3]) -> Variables {
        let paths = paths("tank_1");
        Variables::new()
            .with(paths.data(LENGTH), [length])
            .with(paths.data(OUTER_DIAMETER), [1.0])
            .with(TRUE_AIRSPEED, speed)
            .with(KINEMATIC_VISCOSITY, [1.5e-5, 1.6e-5, 2.5e-5])
            .with(PRANDTL_NUMBER, [0.71, 0.71, 0.72])
            .with(RAYLEIGH_NUMBER, [1e8, 5e9, 0.0])
    }

    fn nusselt(position: TankPosition, length: f64) -> Vec<f64> {
        let component = PerformancesNusseltNumber::new("tank_1", points(3), position);
        evaluate(&component, &inputs(length))
            .get(NUSSELT_NUMBER)
            .unwrap()
            .to_vec()
    }

    #[test]
    fn forced_convection_on_external_tanks() {
        let nu = nusselt(TankPosition::WingPod, 3.0);
        let re: f64 = 60.0 * 3.0 / 1.6e-5;
        assert_relative_eq!(
            nu[1],
            0.03625 * 0.71_f64.powf(0.43) * re.powf(0.8),
            max_relative = 1e-12
        );
        // Parked: the Reynolds number sits at its floor.
        assert_relative_eq!(nu[0], 0.03625 * 0.71_f64.powf(0.43), max_relative = 1e-12);
        assert_eq!(nusselt(TankPosition::Underbelly, 3.0), nu);
    }

    #[test]
    fn natural_convection_coefficients_follow_aspect_ratio() {
        let ra: f64 = 1e8;
        let squat = nusselt(TankPosition::InTheCabin, 0.8);
        let medium = nusselt(TankPosition::InTheBack, 3.0);
        let slender = nusselt(TankPosition::InTheFront, 6.0);

        assert_relative_eq!(squat[0], 0.59 * ra.powf(0.25), max_relative = 1e-12);
        assert_relative_eq!(medium[0], 0.53 * ra.powf(0.25), max_relative = 1e-12);
        assert_relative_eq!(slender[0], 0.13 * ra.cbrt(), max_relative = 1e-9);
        // Zero Rayleigh number is held at the floor.
        assert_relative_eq!(medium[2], 0.53);
    }

    #[test]
    fn partials() {
        for position in [TankPosition::WingPod, TankPosition::InTheCabin] {
            let component = PerformancesNusseltNumber::new("tank_1", points(3), position);
            assert_partials(&component, &inputs_at(3.0, [30.0, 60.0, 120.0]));
        }
    }
}
