use std::f64::consts::PI;

use crate::support::{
    clip::CLIPPED_GRADIENT,
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
};

use super::{
    CYLINDRICAL_LENGTH, INNER_DIAMETER, INSULATION_THICKNESS, THERMAL_RESISTANCE, WALL_THICKNESS,
    cylinder, paths,
};

/// One concentric layer of the tank shell.
struct Layer {
    inner_radius: f64,
    outer_radius: f64,
    conductivity: f64,
}

/// Resistance of a layer and its derivatives.
struct LayerResistance {
    value: f64,
    d_inner_radius: f64,
    d_outer_radius: f64,
    d_conductivity: f64,
    d_length: f64,
}

impl Layer {
    /// The cylindrical section and the spherical ends conduct in parallel.
    fn resistance(&self, length: f64) -> LayerResistance {
        let (ri, ro, k) = (self.inner_radius, self.outer_radius, self.conductivity);
        let log = (ro / ri).ln();
        let gap = ro - ri;

        let cylinder = 2.0 * PI * k * length / log;
        let sphere = 4.0 * PI * k * ri * ro / gap;
        let conductance = cylinder + sphere;

        let d_ri = cylinder / (log * ri) + 4.0 * PI * k * ro * ro / (gap * gap);
        let d_ro = -cylinder / (log * ro) - 4.0 * PI * k * ri * ri / (gap * gap);
        let d_k = conductance / k;
        let d_l = 2.0 * PI * k / log;

        let scale = -1.0 / (conductance * conductance);
        LayerResistance {
            value: 1.0 / conductance,
            d_inner_radius: scale * d_ri,
            d_outer_radius: scale * d_ro,
            d_conductivity: scale * d_k,
            d_length: scale * d_l,
        }
    }
}

/// Thermal resistance of the tank shell, wall and insulation in series.
///
/// Each layer is a cylinder of the tank's cylindrical length in parallel
/// with a spherical shell for the two ends:
///
/// ```text
/// R_cylinder = ln(r_o / r_i) / (2 pi k L)
/// R_sphere   = (1 / r_i - 1 / r_o) / (4 pi k)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingThermalResistance {
    inner_diameter: String,
    wall_thickness: String,
    insulation_thickness: String,
    wall_conductivity: String,
    insulation_conductivity: String,
    cylindrical_length: String,
    resistance: String,
}

impl SizingThermalResistance {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            inner_diameter: paths.data(INNER_DIAMETER),
            wall_thickness: paths.data(WALL_THICKNESS),
            insulation_thickness: paths.data(INSULATION_THICKNESS),
            wall_conductivity: paths.data("wall:thermal_conductivity"),
            insulation_conductivity: paths.data("insulation:thermal_conductivity"),
            cylindrical_length: paths.data(CYLINDRICAL_LENGTH),
            resistance: paths.data(THERMAL_RESISTANCE),
        }
    }

    fn inputs(&self) -> [&str; 6] {
        [
            self.inner_diameter.as_str(),
            self.wall_thickness.as_str(),
            self.insulation_thickness.as_str(),
            self.wall_conductivity.as_str(),
            self.insulation_conductivity.as_str(),
            self.cylindrical_length.as_str(),
        ]
    }

    fn layers(&self, inputs: &Variables) -> ComponentResult<[Layer; 2]> {
        let inner = 0.5 * inputs.scalar(&self.inner_diameter)?;
        let wall = inner + inputs.scalar(&self.wall_thickness)?;
        let insulation = wall + inputs.scalar(&self.insulation_thickness)?;
        Ok([
            Layer {
                inner_radius: inner,
                outer_radius: wall,
                conductivity: inputs.scalar(&self.wall_conductivity)?,
            },
            Layer {
                inner_radius: wall,
                outer_radius: insulation,
                conductivity: inputs.scalar(&self.insulation_conductivity)?,
            },
        ])
    }
}

impl ExplicitComponent for SizingThermalResistance {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.inner_diameter, "m", Shape::Scalar);
        interface.add_input(&self.wall_thickness, "m", Shape::Scalar);
        interface.add_input(&self.insulation_thickness, "m", Shape::Scalar);
        interface.add_input(&self.wall_conductivity, "W/m/K", Shape::Scalar);
        interface.add_input(&self.insulation_conductivity, "W/m/K", Shape::Scalar);
        interface.add_input(&self.cylindrical_length, "m", Shape::Scalar);
        interface
            .add_output(&self.resistance, "K/W", Shape::Scalar)
            .val(1.0);
        for wrt in self.inputs() {
            interface.declare_partials(&self.resistance, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let length = cylinder(inputs.scalar(&self.cylindrical_length)?).value;
        let total: f64 = self
            .layers(inputs)?
            .iter()
            .map(|layer| layer.resistance(length).value)
            .sum();
        outputs.set(&self.resistance, [total]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let length = cylinder(inputs.scalar(&self.cylindrical_length)?);
        let [wall, insulation] = self.layers(inputs)?;
        let wall = wall.resistance(length.value);
        let insulation = insulation.resistance(length.value);

        // The inner diameter moves every radius by half its change; the wall
        // thickness moves the wall outer and every insulation radius.
        let d_inner_diameter = 0.5
            * (wall.d_inner_radius
                + wall.d_outer_radius
                + insulation.d_inner_radius
                + insulation.d_outer_radius);
        let d_wall_thickness =
            wall.d_outer_radius + insulation.d_inner_radius + insulation.d_outer_radius;

        let values = [
            d_inner_diameter,
            d_wall_thickness,
            insulation.d_outer_radius,
            wall.d_conductivity,
            insulation.d_conductivity,
            length.mask(wall.d_length + insulation.d_length, CLIPPED_GRADIENT),
        ];
        for (wrt, value) in self.inputs().into_iter().zip(values) {
            partials.set(&self.resistance, wrt, Partial::scalar(value));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate};

    fn inputs(cylindrical_length: f64) -> Variables {
        let paths = paths("tank_1");
        Variables::new()
            .with(paths.data(INNER_DIAMETER), [1.6])
            .with(paths.data(WALL_THICKNESS), [0.004])
            .with(paths.data(INSULATION_THICKNESS), [0.08])
            .with(paths.data("wall:thermal_conductivity"), [16.0])
            .with(paths.data("insulation:thermal_conductivity"), [0.02])
            .with(paths.data(CYLINDRICAL_LENGTH), [cylindrical_length])
    }

    #[test]
    fn spherical_tank_matches_shell_formula() {
        let component = SizingThermalResistance::new("tank_1");
        let outputs = evaluate(&component, &inputs(-0.2));

        let shell = |ri: f64, ro: f64, k: f64| (1.0 / ri - 1.0 / ro) / (4.0 * PI * k);
        let expected = shell(0.8, 0.804, 16.0) + shell(0.804, 0.884, 0.02);
        assert_relative_eq!(
            outputs
                .scalar(&paths("tank_1").data(THERMAL_RESISTANCE))
                .unwrap(),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn longer_tank_conducts_more() {
        let component = SizingThermalResistance::new("tank_1");
        let resistance = |l| {
            evaluate(&component, &inputs(l))
                .scalar(&paths("tank_1").data(THERMAL_RESISTANCE))
                .unwrap()
        };
        assert!(resistance(3.0) < resistance(1.0));
        assert!(resistance(1.0) < resistance(0.0));
    }

    #[test]
    fn partials() {
        let component = SizingThermalResistance::new("tank_1");
        assert_partials(&component, &inputs(2.5));
        assert_partials(&component, &inputs(-0.2));
    }
}
