use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity, Variables,
};

use super::{AREA_PRODUCT, paths};

/// Exponent of the core mass scaling law.
const MASS_EXPONENT: f64 = 0.75;

/// Core and winding mass scaled from a reference inductor,
/// `m = m_ref * (Ap / Ap_ref)^0.75`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingCoreMass {
    area_product: String,
    reference_area_product: String,
    reference_mass: String,
    mass: String,
}

impl SizingCoreMass {
    #[must_use]
    pub fn new(id: &str) -> Self {
        let paths = paths(id);
        Self {
            area_product: paths.data(AREA_PRODUCT),
            reference_area_product: paths.settings("reference:area_product"),
            reference_mass: paths.settings("reference:mass"),
            mass: paths.data("mass"),
        }
    }
}

impl ExplicitComponent for SizingCoreMass {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        interface.add_input(&self.area_product, "m**4", Shape::Scalar);
        interface
            .add_input(&self.reference_area_product, "m**4", Shape::Scalar)
            .val(2.1e-6);
        interface
            .add_input(&self.reference_mass, "kg", Shape::Scalar)
            .val(3.4);
        interface.add_output(&self.mass, "kg", Shape::Scalar).val(5.0);
        for wrt in [
            &self.area_product,
            &self.reference_area_product,
            &self.reference_mass,
        ] {
            interface.declare_partials(&self.mass, wrt, Sparsity::Dense);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let ap = inputs.scalar(&self.area_product)?;
        let ap_ref = inputs.scalar(&self.reference_area_product)?;
        let m_ref = inputs.scalar(&self.reference_mass)?;
        outputs.set(&self.mass, [m_ref * (ap / ap_ref).powf(MASS_EXPONENT)]);
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let ap = inputs.scalar(&self.area_product)?;
        let ap_ref = inputs.scalar(&self.reference_area_product)?;
        let m_ref = inputs.scalar(&self.reference_mass)?;
        let ratio = (ap / ap_ref).powf(MASS_EXPONENT);
        let mass = m_ref * ratio;

        partials.set(
            &self.mass,
            &self.area_product,
            Partial::scalar(MASS_EXPONENT * mass / ap),
        );
        partials.set(
            &self.mass,
            &self.reference_area_product,
            Partial::scalar(-MASS_EXPONENT * mass / ap_ref),
        );
        partials.set(&self.mass, &self.reference_mass, Partial::scalar(ratio));
        Ok(())
    }
}
