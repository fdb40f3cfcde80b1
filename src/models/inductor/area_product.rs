use std::f64::consts::SQRT_2;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{AREA_PRODUCT, CURRENT_CALIBER, CURRENT_DENSITY, FLUX_DENSITY, INDUCTANCE, paths};

/// Core area product, `Ap = L * I_peak * I_rms / (k_u * B * J)`.
///
/// `k_u` is the fraction of the window filled with copper, `B` the peak
/// flux density and `J` the copper current density.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingAreaProduct {
    inductance: String,
    current: String,
    fill_factor: String,
    flux_density: String,
    current_density: String,
    area_product: String,
}

impl SizingAreaProduct {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            inductance: paths.data(INDUCTANCE),
            current: paths.data(CURRENT_CALIBER),
            fill_factor: paths.settings("fill_factor"),
            flux_density: paths.data(FLUX_DENSITY),
            current_density: paths.settings(CURRENT_DENSITY),
            area_product: paths.data(AREA_PRODUCT),
        }
    }

    fn value(&self, inputs: &Variables) -> ComponentResult<f64> {
        let l = inputs.scalar(&self.inductance)?;
        let i = inputs.scalar(&self.current)?;
        let k = inputs.scalar(&self.fill_factor)?;
        let b = inputs.scalar(&self.flux_density)?;
        let j = inputs.scalar(&self.current_density)?;
        Ok(l * SQRT_2 * i * i / (k * b * j))
    }
}

impl ExplicitComponent for SizingAreaProduct {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.inductance, "H", Shape::Scalar);
        interface.add_input(&self.current, "A", Shape::Scalar);
        interface
            .add_input(&self.fill_factor, "unitless", Shape::Scalar)
            .val(0.4);
        interface
            .add_input(&self.flux_density, "T", Shape::Scalar)
            .val(1.2);
        interface
            .add_input(&self.current_density, "A/m**2", Shape::Scalar)
            .val(5.0e6);
        interface
            .add_output(&self.area_product, "m**4", Shape::Scalar)
            .val(1.0e-6);
        for wrt in [
            &self.inductance,
            &self.current,
            &self.fill_factor,
            &self.flux_density,
            &self.current_density,
        ] {
            interface.declare_partials(&self.area_product, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        outputs.set(&self.area_product, [self.value(inputs)?]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let ap = self.value(inputs)?;
        let of = &self.area_product;

        // Power law: d(Ap)/dx = exponent * Ap / x.
        for (wrt, exponent) in [
            (&self.inductance, 1.0),
            (&self.current, 2.0),
            (&self.fill_factor, -1.0),
            (&self.flux_density, -1.0),
            (&self.current_density, -1.0),
        ] {
            let x = inputs.scalar(wrt)?;
            partials.set(of, wrt, Partial::scalar(exponent * ap / x));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate};

    #[test]
    fn area_product_of_a_filter_choke() {
        let paths = paths("inductor_1");
        let inputs = Variables::new()
            .with(paths.data(INDUCTANCE), [1.0e-3])
            .with(paths.data(CURRENT_CALIBER), [100.0])
            .with(paths.settings("fill_factor"), [0.4])
            .with(paths.data(FLUX_DENSITY), [1.25])
            .with(paths.settings(CURRENT_DENSITY), [4.0e6]);

        let component = SizingAreaProduct::new("inductor_1");
        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(
            outputs.scalar(&paths.data(AREA_PRODUCT)).unwrap(),
            SQRT_2 * 5.0e-6,
            max_relative = 1e-12
        );
        assert_partials(&component, &inputs);
    }
}
