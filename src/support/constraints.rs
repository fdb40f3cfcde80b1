//! Caliber constraints.
//!
//! A caliber is the rated value a component is sized for, as opposed to the
//! maximum actually seen during the mission. Each subsystem picks one of two
//! strategies per quantity:
//!
//! - [`EnforceCaliber`]: the caliber is set to the mission maximum.
//! - [`EnsureCaliber`]: the caliber is a design variable and the optimizer
//!   is handed `max - caliber`, which must stay non-positive.
//!
//! Both are unit mappings, so their partials are declared constants.

use crate::support::{
    component::{ComponentResult, ExplicitComponent, Interface, Shape, Sparsity, Variables},
    naming::ComponentPaths,
};

/// A quantity with a `<stem>_max` and a `<stem>_caliber` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaliberQuantity {
    pub stem: &'static str,
    pub units: &'static str,
}

impl CaliberQuantity {
    #[must_use]
    pub const fn new(stem: &'static str, units: &'static str) -> Self {
        Self { stem, units }
    }

    fn max(&self) -> String {
        format!("{}_max", self.stem)
    }

    fn caliber(&self) -> String {
        format!("{}_caliber", self.stem)
    }
}

/// Sets each caliber to the corresponding mission maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct EnforceCaliber {
    paths: ComponentPaths,
    quantities: Vec<CaliberQuantity>,
}

impl EnforceCaliber {
    pub fn new(paths: ComponentPaths, quantities: impl Into<Vec<CaliberQuantity>>) -> Self {
        Self {
            paths,
            quantities: quantities.into(),
        }
    }
}

impl ExplicitComponent for EnforceCaliber {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        for quantity in &self.quantities {
            let max = self.paths.data(&quantity.max());
            let caliber = self.paths.data(&quantity.caliber());
            interface.add_input(&max, quantity.units, Shape::Scalar);
            interface.add_output(&caliber, quantity.units, Shape::Scalar);
            interface
                .declare_partials(caliber, max, Sparsity::Dense)
                .constant(1.0);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        for quantity in &self.quantities {
            let max = inputs.scalar(&self.paths.data(&quantity.max()))?;
            outputs.set(self.paths.data(&quantity.caliber()), [max]);
        }
        Ok(())
    }
}

/// Reports `max - caliber` for each quantity as a constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsureCaliber {
    paths: ComponentPaths,
    quantities: Vec<CaliberQuantity>,
}

impl EnsureCaliber {
    pub fn new(paths: ComponentPaths, quantities: impl Into<Vec<CaliberQuantity>>) -> Self {
        Self {
            paths,
            quantities: quantities.into(),
        }
    }
}

impl ExplicitComponent for EnsureCaliber {
    fn interface(&self) -> Interface {
        let mut interface = Interface::sizing();
        for quantity in &self.quantities {
            let max = self.paths.data(&quantity.max());
            let caliber = self.paths.data(&quantity.caliber());
            let constraint = self.paths.constraints(&quantity.caliber());
            interface.add_input(&max, quantity.units, Shape::Scalar);
            interface.add_input(&caliber, quantity.units, Shape::Scalar);
            interface
                .add_output(&constraint, quantity.units, Shape::Scalar)
                .val(0.0)
                .desc("respected if <= 0");
            interface
                .declare_partials(&constraint, max, Sparsity::Dense)
                .constant(1.0);
            interface
                .declare_partials(constraint, caliber, Sparsity::Dense)
                .constant(-1.0);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        for quantity in &self.quantities {
            let max = inputs.scalar(&self.paths.data(&quantity.max()))?;
            let caliber = inputs.scalar(&self.paths.data(&quantity.caliber()))?;
            outputs.set(self.paths.constraints(&quantity.caliber()), [max - caliber]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::check::{PartialsCheckConfig, check_partials};

    const VOLTAGE: CaliberQuantity = CaliberQuantity::new("voltage_dc", "V");

    #[test]
    fn enforce_copies_maximum() {
        let paths = ComponentPaths::new("capacitor", "capacitor_1");
        let enforce = EnforceCaliber::new(paths.clone(), [VOLTAGE]);
        let inputs = Variables::new().with(paths.data("voltage_dc_max"), [850.0]);

        let mut outputs = enforce.interface().default_outputs();
        enforce.compute(&inputs, &mut outputs).unwrap();
        assert_relative_eq!(
            outputs.scalar(&paths.data("voltage_dc_caliber")).unwrap(),
            850.0
        );

        let report = check_partials(&enforce, &inputs, PartialsCheckConfig::default()).unwrap();
        assert!(report.is_consistent(), "{report}");
    }

    #[test]
    fn ensure_reports_margin() {
        let paths = ComponentPaths::new("capacitor", "capacitor_1");
        let ensure = EnsureCaliber::new(paths.clone(), [VOLTAGE]);
        let inputs = Variables::new()
            .with(paths.data("voltage_dc_max"), [850.0])
            .with(paths.data("voltage_dc_caliber"), [800.0]);

        let mut outputs = ensure.interface().default_outputs();
        ensure.compute(&inputs, &mut outputs).unwrap();
        assert_relative_eq!(
            outputs
                .scalar(&paths.constraints("voltage_dc_caliber"))
                .unwrap(),
            50.0
        );

        let report = check_partials(&ensure, &inputs, PartialsCheckConfig::default()).unwrap();
        assert!(report.is_consistent(), "{report}");
    }
}
