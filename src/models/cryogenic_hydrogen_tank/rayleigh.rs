use std::num::NonZeroUsize;

use crate::support::{
    atmosphere::GRAVITY,
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
};

use super::{
    EXTERIOR_TEMPERATURE, KINEMATIC_VISCOSITY, OUTER_DIAMETER, PRANDTL_NUMBER, RAYLEIGH_NUMBER,
    SKIN_TEMPERATURE, paths,
};

/// Rayleigh number of the air around the tank, on the outer diameter.
///
/// `Ra = g * beta * |T_ext - T_skin| * D^3 * Pr / nu^2` with the ideal-gas
/// expansion coefficient `beta = 1 / T_ext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesRayleighNumber {
    outer_diameter: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesRayleighNumber {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            outer_diameter: paths(id).data(OUTER_DIAMETER),
            number_of_points,
        }
    }
}

/// Per-point inputs.
struct Point {
    t_ext: f64,
    t_skin: f64,
    nu: f64,
    pr: f64,
}

impl Point {
    fn rayleigh(&self, diameter: f64) -> f64 {
        GRAVITY * (self.t_ext - self.t_skin).abs() / self.t_ext * diameter.powi(3) * self.pr
            / (self.nu * self.nu)
    }
}

impl PerformancesRayleighNumber {
    fn points(&self, inputs: &Variables) -> ComponentResult<Vec<Point>> {
        let n = self.number_of_points.get();
        let t_ext = inputs.array(EXTERIOR_TEMPERATURE, n)?;
        let t_skin = inputs.array(SKIN_TEMPERATURE, n)?;
        let nu = inputs.array(KINEMATIC_VISCOSITY, n)?;
        let pr = inputs.array(PRANDTL_NUMBER, n)?;
        Ok((0..n)
            .map(|i| Point {
                t_ext: t_ext[i],
                t_skin: t_skin[i],
                nu: nu[i],
                pr: pr[i],
            })
            .collect())
    }
}

impl ExplicitComponent for PerformancesRayleighNumber {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(EXTERIOR_TEMPERATURE, "degK", Shape::Points)
            .val(288.15);
        interface
            .add_input(SKIN_TEMPERATURE, "degK", Shape::Points)
            .val(250.0);
        interface
            .add_input(KINEMATIC_VISCOSITY, "m**2/s", Shape::Points)
            .val(1.46e-5);
        interface
            .add_input(PRANDTL_NUMBER, "unitless", Shape::Points)
            .val(0.71);
        interface.add_input(&self.outer_diameter, "m", Shape::Scalar);
        interface
            .add_output(RAYLEIGH_NUMBER, "unitless", Shape::Points)
            .val(1e9);

        for wrt in [
            EXTERIOR_TEMPERATURE,
            SKIN_TEMPERATURE,
            KINEMATIC_VISCOSITY,
            PRANDTL_NUMBER,
        ] {
            interface.declare_partials(RAYLEIGH_NUMBER, wrt, Sparsity::Diagonal);
        }
        interface.declare_partials(RAYLEIGH_NUMBER, &self.outer_diameter, Sparsity::Column);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let d = inputs.scalar(&self.outer_diameter)?;
        let ra: Vec<f64> = self
            .points(inputs)?
            .iter()
            .map(|p| p.rayleigh(d))
            .collect();
        outputs.set(RAYLEIGH_NUMBER, ra);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let d = inputs.scalar(&self.outer_diameter)?;
        let points = self.points(inputs)?;
        let n = points.len();

        let (mut d_t_ext, mut d_t_skin) = (Vec::with_capacity(n), Vec::with_capacity(n));
        let (mut d_nu, mut d_pr, mut d_d) = (
            Vec::with_capacity(n),
            Vec::with_capacity(n),
            Vec::with_capacity(n),
        );
        for p in &points {
            let ra = p.rayleigh(d);
            let delta = p.t_ext - p.t_skin;
            let sign = delta.signum();
            let scale = GRAVITY * d.powi(3) * p.pr / (p.nu * p.nu);

            d_t_ext.push(scale * (sign * p.t_ext - delta.abs()) / (p.t_ext * p.t_ext));
            d_t_skin.push(-scale * sign / p.t_ext);
            d_nu.push(-2.0 * ra / p.nu);
            d_pr.push(ra / p.pr);
            d_d.push(3.0 * ra / d);
        }

        partials.set(RAYLEIGH_NUMBER, EXTERIOR_TEMPERATURE, Partial::Diagonal(d_t_ext));
        partials.set(RAYLEIGH_NUMBER, SKIN_TEMPERATURE, Partial::Diagonal(d_t_skin));
        partials.set(RAYLEIGH_NUMBER, KINEMATIC_VISCOSITY, Partial::Diagonal(d_nu));
        partials.set(RAYLEIGH_NUMBER, PRANDTL_NUMBER, Partial::Diagonal(d_pr));
        partials.set(RAYLEIGH_NUMBER, &self.outer_diameter, Partial::Column(d_d));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    fn inputs() -> Variables {
        Variables::new()
            .with(EXTERIOR_TEMPERATURE, [288.15, 250.0])
            .with(SKIN_TEMPERATURE, [278.15, 260.0])
            .with(KINEMATIC_VISCOSITY, [1.5e-5, 2.0e-5])
            .with(PRANDTL_NUMBER, [0.7, 0.72])
            .with(paths("tank_1").data(OUTER_DIAMETER), [2.0])
    }

    #[test]
    fn warmer_or_colder_skin_both_drive_convection() {
        let component = PerformancesRayleighNumber::new("tank_1", points(2));
        let ra = evaluate(&component, &inputs())
            .get(RAYLEIGH_NUMBER)
            .unwrap()
            .to_vec();

        let expected = GRAVITY * 10.0 / 288.15 * 8.0 * 0.7 / (1.5e-5 * 1.5e-5);
        assert_relative_eq!(ra[0], expected, max_relative = 1e-12);
        assert!(ra[1] > 0.0);
    }

    #[test]
    fn partials() {
        let component = PerformancesRayleighNumber::new("tank_1", points(2));
        assert_partials(&component, &inputs());
    }
}
