use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{
    CYLINDRICAL_LENGTH, FUSELAGE_HEIGHT, INITIAL_OUTER_DIAMETER, INNER_DIAMETER,
    INSULATION_THICKNESS, OUTER_DIAMETER, TankPosition, WALL_THICKNESS, paths,
};

/// Outer diameter before any installation constraint,
/// `d_inner + 2 * (t_wall + t_insulation)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingInitialOuterDiameter {
    inner_diameter: String,
    wall_thickness: String,
    insulation_thickness: String,
    outer_diameter: String,
}

impl SizingInitialOuterDiameter {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            inner_diameter: paths.data(INNER_DIAMETER),
            wall_thickness: paths.data(WALL_THICKNESS),
            insulation_thickness: paths.data(INSULATION_THICKNESS),
            outer_diameter: paths.data(INITIAL_OUTER_DIAMETER),
        }
    }
}

impl ExplicitComponent for SizingInitialOuterDiameter {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.inner_diameter, "m", Shape::Scalar);
        interface.add_input(&self.wall_thickness, "m", Shape::Scalar);
        interface.add_input(&self.insulation_thickness, "m", Shape::Scalar);
        interface.add_output(&self.outer_diameter, "m", Shape::Scalar);

        interface
            .declare_partials(&self.outer_diameter, &self.inner_diameter, Sparsity::Dense)
            .constant(1.0);
        interface
            .declare_partials(&self.outer_diameter, &self.wall_thickness, Sparsity::Dense)
            .constant(2.0);
        interface
            .declare_partials(
                &self.outer_diameter,
                &self.insulation_thickness,
                Sparsity::Dense,
            )
            .constant(2.0);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let d = inputs.scalar(&self.inner_diameter)?;
        let wall = inputs.scalar(&self.wall_thickness)?;
        let insulation = inputs.scalar(&self.insulation_thickness)?;
        outputs.set(&self.outer_diameter, [d + 2.0 * (wall + insulation)]);
        Ok(())
    }
}

/// Which rule set the outer diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    /// Taller than the fuselage: shrunk to 90 % of its height.
    FuselageHeight,
    /// Negative cylindrical length: diameter of the equivalent volume.
    EquivalentVolume,
    /// Embedded and close to the fuselage height: capped at 75 % of it.
    EmbeddedCap,
    PassThrough,
}

/// Outer diameter once installed.
///
/// The first applicable rule wins:
///
/// 1. Not in a wing pod and `D > H_fus`: `0.9 * H_fus`.
/// 2. Cylindrical length `L < 0`: `(D^3 + 1.5 D^2 L)^(1/3)`, the diameter
///    whose sphere holds the same volume as the sphere plus negative
///    cylinder.
/// 3. Inside the fuselage and `D >= 0.75 * H_fus`: `0.75 * H_fus`.
/// 4. `D` unchanged.
///
/// Inputs a rule does not use get an exactly zero partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingOuterDiameter {
    position: TankPosition,
    initial_diameter: String,
    cylindrical_length: String,
    outer_diameter: String,
}

impl SizingOuterDiameter {
    #[must_use]
    pub fn new(id: &str, position: TankPosition) -> Self {
        let paths = paths(id);
        Self {
            position,
            initial_diameter: paths.data(INITIAL_OUTER_DIAMETER),
            cylindrical_length: paths.data(CYLINDRICAL_LENGTH),
            outer_diameter: paths.data(OUTER_DIAMETER),
        }
    }

    fn branch(&self, diameter: f64, height: f64, length: f64) -> Branch {
        if self.position != TankPosition::WingPod && diameter > height {
            Branch::FuselageHeight
        } else if length < 0.0 {
            Branch::EquivalentVolume
        } else if !self.position.is_external() && diameter >= 0.75 * height {
            Branch::EmbeddedCap
        } else {
            Branch::PassThrough
        }
    }
}

/// `(D^3 + 1.5 D^2 L)^(1/3)`
fn equivalent_diameter(diameter: f64, length: f64) -> f64 {
    (diameter.powi(3) + 1.5 * diameter * diameter * length).cbrt()
}

impl ExplicitComponent for SizingOuterDiameter {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.initial_diameter, "m", Shape::Scalar);
        interface.add_input(FUSELAGE_HEIGHT, "m", Shape::Scalar);
        interface.add_input(&self.cylindrical_length, "m", Shape::Scalar);
        interface.add_output(&self.outer_diameter, "m", Shape::Scalar);
        for wrt in [
            self.initial_diameter.as_str(),
            FUSELAGE_HEIGHT,
            self.cylindrical_length.as_str(),
        ] {
            interface.declare_partials(&self.outer_diameter, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let d = inputs.scalar(&self.initial_diameter)?;
        let h = inputs.scalar(FUSELAGE_HEIGHT)?;
        let l = inputs.scalar(&self.cylindrical_length)?;

        let outer = match self.branch(d, h, l) {
            Branch::FuselageHeight => 0.9 * h,
            Branch::EquivalentVolume => equivalent_diameter(d, l),
            Branch::EmbeddedCap => 0.75 * h,
            Branch::PassThrough => d,
        };
        outputs.set(&self.outer_diameter, [outer]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let d = inputs.scalar(&self.initial_diameter)?;
        let h = inputs.scalar(FUSELAGE_HEIGHT)?;
        let l = inputs.scalar(&self.cylindrical_length)?;

        // (d/dD, d/dH, d/dL)
        let (d_diameter, d_height, d_length) = match self.branch(d, h, l) {
            Branch::FuselageHeight => (0.0, 0.9, 0.0),
            Branch::EquivalentVolume => {
                let outer = equivalent_diameter(d, l);
                let square = outer * outer;
                ((d * d + d * l) / square, 0.0, 0.5 * d * d / square)
            }
            Branch::EmbeddedCap => (0.0, 0.75, 0.0),
            Branch::PassThrough => (1.0, 0.0, 0.0),
        };

        partials.set(
            &self.outer_diameter,
            &self.initial_diameter,
            Partial::scalar(d_diameter),
        );
        partials.set(&self.outer_diameter, FUSELAGE_HEIGHT, Partial::scalar(d_height));
        partials.set(
            &self.outer_diameter,
            &self.cylindrical_length,
            Partial::scalar(d_length),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate};

    fn inputs(diameter: f64, height: f64, length: f64) -> Variables {
        Variables::new()
            .with(paths("tank_1").data(INITIAL_OUTER_DIAMETER), [diameter])
            .with(FUSELAGE_HEIGHT, [height])
            .with(paths("tank_1").data(CYLINDRICAL_LENGTH), [length])
    }

    fn outer(position: TankPosition, diameter: f64, height: f64, length: f64) -> f64 {
        let component = SizingOuterDiameter::new("tank_1", position);
        evaluate(&component, &inputs(diameter, height, length))
            .scalar(&paths("tank_1").data(OUTER_DIAMETER))
            .unwrap()
    }

    #[test]
    fn branches_apply_in_order() {
        assert_relative_eq!(
            outer(TankPosition::WingPod, 3.0, 10.0, -1.0),
            2.3811,
            epsilon = 1e-4
        );
        assert_relative_eq!(outer(TankPosition::InTheCabin, 3.0, 2.0, 1.0), 1.8);
        assert_relative_eq!(outer(TankPosition::InTheCabin, 1.6, 2.0, 1.0), 1.5);
        assert_relative_eq!(outer(TankPosition::WingPod, 1.0, 2.0, 1.0), 1.0);
    }

    #[test]
    fn fuselage_rule_takes_precedence_over_negative_length() {
        assert_relative_eq!(outer(TankPosition::Underbelly, 3.0, 2.0, -1.0), 1.8);
        // A wing pod ignores the fuselage entirely.
        assert_relative_eq!(outer(TankPosition::WingPod, 3.0, 2.0, 1.0), 3.0);
    }

    #[test]
    fn partials_in_every_branch() {
        for (position, diameter, height, length) in [
            (TankPosition::WingPod, 3.0, 10.0, -1.0),
            (TankPosition::InTheCabin, 3.0, 2.0, 1.0),
            (TankPosition::InTheCabin, 1.6, 2.0, 1.0),
            (TankPosition::WingPod, 1.0, 2.0, 1.0),
        ] {
            let component = SizingOuterDiameter::new("tank_1", position);
            assert_partials(&component, &inputs(diameter, height, length));
        }
    }

    #[test]
    fn initial_diameter_adds_both_layers() {
        let component = SizingInitialOuterDiameter::new("tank_1");
        let paths = paths("tank_1");
        let inputs = Variables::new()
            .with(paths.data(INNER_DIAMETER), [1.5])
            .with(paths.data(WALL_THICKNESS), [0.005])
            .with(paths.data(INSULATION_THICKNESS), [0.1]);

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(
            outputs.scalar(&paths.data(INITIAL_OUTER_DIAMETER)).unwrap(),
            1.71,
            epsilon = 1e-12
        );
        assert_partials(&component, &inputs);
    }
}
