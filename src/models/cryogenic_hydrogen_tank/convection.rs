use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{
    CONVECTIVE_HEAT, EXTERIOR_TEMPERATURE, HEAT_TRANSFER_COEFFICIENT, LENGTH, NUSSELT_NUMBER,
    OUTER_AREA, OUTER_DIAMETER, SKIN_TEMPERATURE, THERMAL_CONDUCTIVITY, TankPosition, paths,
};

/// Convection coefficient `h = Nu * k / L`.
///
/// The characteristic length is the tank length for external tanks, whose
/// Nusselt number comes from a flat-plate correlation, and the outer
/// diameter for tanks inside the fuselage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesConvectionCoefficient {
    characteristic_length: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesConvectionCoefficient {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize, position: TankPosition) -> Self {
        let paths = paths(id);
        let characteristic_length = if position.is_external() {
            paths.data(LENGTH)
        } else {
            paths.data(OUTER_DIAMETER)
        };
        Self {
            characteristic_length,
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesConvectionCoefficient {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(NUSSELT_NUMBER, "unitless", Shape::Points)
            .val(100.0);
        interface
            .add_input(THERMAL_CONDUCTIVITY, "W/m/K", Shape::Points)
            .val(0.025);
        interface.add_input(&self.characteristic_length, "m", Shape::Scalar);
        interface
            .add_output(HEAT_TRANSFER_COEFFICIENT, "W/m**2/K", Shape::Points)
            .val(5.0);

        interface.declare_partials(HEAT_TRANSFER_COEFFICIENT, NUSSELT_NUMBER, Sparsity::Diagonal);
        interface.declare_partials(
            HEAT_TRANSFER_COEFFICIENT,
            THERMAL_CONDUCTIVITY,
            Sparsity::Diagonal,
        );
        interface.declare_partials(
            HEAT_TRANSFER_COEFFICIENT,
            &self.characteristic_length,
            Sparsity::Column,
        );
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let nusselt = inputs.array(NUSSELT_NUMBER, n)?;
        let k = inputs.array(THERMAL_CONDUCTIVITY, n)?;
        let length = inputs.scalar(&self.characteristic_length)?;

        outputs.set(
            HEAT_TRANSFER_COEFFICIENT,
            nusselt
                .iter()
                .zip(k)
                .map(|(nu, k)| nu * k / length)
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let nusselt = inputs.array(NUSSELT_NUMBER, n)?;
        let k = inputs.array(THERMAL_CONDUCTIVITY, n)?;
        let length = inputs.scalar(&self.characteristic_length)?;

        partials.set(
            HEAT_TRANSFER_COEFFICIENT,
            NUSSELT_NUMBER,
            Partial::Diagonal(k.iter().map(|k| k / length).collect()),
        );
        partials.set(
            HEAT_TRANSFER_COEFFICIENT,
            THERMAL_CONDUCTIVITY,
            Partial::Diagonal(nusselt.iter().map(|nu| nu / length).collect()),
        );
        partials.set(
            HEAT_TRANSFER_COEFFICIENT,
            &self.characteristic_length,
            Partial::Column(
                nusselt
                    .iter()
                    .zip(k)
                    .map(|(nu, k)| -nu * k / (length * length))
                    .collect(),
            ),
        );
        Ok(())
    }
}

/// Heat convected from the air into the skin, `h * A * (T_ext - T_skin)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesConvectiveHeat {
    outer_area: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesConvectiveHeat {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            outer_area: paths(id).data(OUTER_AREA),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesConvectiveHeat {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(HEAT_TRANSFER_COEFFICIENT, "W/m**2/K", Shape::Points)
            .val(5.0);
        interface.add_input(&self.outer_area, "m**2", Shape::Scalar);
        interface
            .add_input(EXTERIOR_TEMPERATURE, "degK", Shape::Points)
            .val(288.15);
        interface
            .add_input(SKIN_TEMPERATURE, "degK", Shape::Points)
            .val(250.0);
        interface
            .add_output(CONVECTIVE_HEAT, "W", Shape::Points)
            .val(100.0);

        interface.declare_partials(CONVECTIVE_HEAT, HEAT_TRANSFER_COEFFICIENT, Sparsity::Diagonal);
        interface.declare_partials(CONVECTIVE_HEAT, &self.outer_area, Sparsity::Column);
        interface.declare_partials(CONVECTIVE_HEAT, EXTERIOR_TEMPERATURE, Sparsity::Diagonal);
        interface.declare_partials(CONVECTIVE_HEAT, SKIN_TEMPERATURE, Sparsity::Diagonal);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let h = inputs.array(HEAT_TRANSFER_COEFFICIENT, n)?;
        let area = inputs.scalar(&self.outer_area)?;
        let t_ext = inputs.array(EXTERIOR_TEMPERATURE, n)?;
        let t_skin = inputs.array(SKIN_TEMPERATURE, n)?;

        outputs.set(
            CONVECTIVE_HEAT,
            (0..n)
                .map(|i| h[i] * area * (t_ext[i] - t_skin[i]))
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let h = inputs.array(HEAT_TRANSFER_COEFFICIENT, n)?;
        let area = inputs.scalar(&self.outer_area)?;
        let t_ext = inputs.array(EXTERIOR_TEMPERATURE, n)?;
        let t_skin = inputs.array(SKIN_TEMPERATURE, n)?;

        let delta: Vec<f64> = (0..n).map(|i| t_ext[i] - t_skin[i]).collect();
        partials.set(
            CONVECTIVE_HEAT,
            HEAT_TRANSFER_COEFFICIENT,
            Partial::Diagonal(delta.iter().map(|dt| area * dt).collect()),
        );
        partials.set(
            CONVECTIVE_HEAT,
            &self.outer_area,
            Partial::Column((0..n).map(|i| h[i] * delta[i]).collect()),
        );
        partials.set(
            CONVECTIVE_HEAT,
            EXTERIOR_TEMPERATURE,
            Partial::Diagonal(h.iter().map(|h| h * area).collect()),
        );
        partials.set(
            CONVECTIVE_HEAT,
            SKIN_TEMPERATURE,
            Partial::Diagonal(h.iter().map(|h| -h * area).collect()),
        );
        Ok(())
    }
}
