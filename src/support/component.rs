//! The component contract.
//!
//! A component is constructed with typed options, declares its
//! [`Interface`] once, and is then evaluated any number of times. It keeps
//! no state between evaluations.
//!
//! There are two kinds of component:
//!
//! - [`ExplicitComponent`]: outputs are closed-form functions of inputs.
//! - [`ImplicitComponent`]: the component exposes residuals that an external
//!   solver drives to zero, with an optional closed-form initial guess.
//!
//! Both kinds supply exact analytic partials. [`crate::support::check`]
//! compares them against central differences.

use std::fmt;

mod error;
mod interface;
mod model;
mod partials;
mod variables;

pub use error::{ComponentError, ComponentResult};
pub use interface::{Interface, PartialDeclaration, Shape, Sparsity, Variable};
pub use model::ExplicitModel;
pub use partials::{Partial, Partials};
pub use variables::Variables;

/// A component whose outputs are closed-form functions of its inputs.
pub trait ExplicitComponent: Send + Sync {
    /// Declares inputs, outputs and partial sparsity.
    fn interface(&self) -> Interface;

    /// Computes outputs from inputs.
    ///
    /// # Errors
    ///
    /// Returns a [`ComponentError`] if an input is missing or has the wrong
    /// length.
    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()>;

    /// Computes the non-constant partials.
    ///
    /// Components whose declared partials are all constants (unit
    /// pass-through, sign flips) do not override this.
    ///
    /// # Errors
    ///
    /// Returns a [`ComponentError`] if an input is missing or has the wrong
    /// length.
    fn compute_partials(&self, _inputs: &Variables, _partials: &mut Partials) -> ComponentResult<()> {
        Ok(())
    }

    /// Returns the full Jacobian: declared constants overlaid with
    /// [`compute_partials`](Self::compute_partials).
    ///
    /// # Errors
    ///
    /// Propagates errors from [`compute_partials`](Self::compute_partials).
    fn jacobian(&self, inputs: &Variables) -> ComponentResult<Partials> {
        let mut partials = self.interface().constant_partials(inputs);
        self.compute_partials(inputs, &mut partials)?;
        Ok(partials)
    }
}

/// A component defined by residuals rather than closed-form outputs.
pub trait ImplicitComponent: Send + Sync {
    /// Declares inputs, outputs (the solved-for states) and partial sparsity.
    ///
    /// Partials are declared with residual names (the output names) as `of`,
    /// and inputs or outputs as `wrt`.
    fn interface(&self) -> Interface;

    /// Evaluates residuals at the given inputs and outputs.
    ///
    /// # Errors
    ///
    /// Returns a [`ComponentError`] if a variable is missing or has the wrong
    /// length.
    fn apply_nonlinear(
        &self,
        inputs: &Variables,
        outputs: &Variables,
        residuals: &mut Variables,
    ) -> ComponentResult<()>;

    /// Computes the partials of the residuals.
    ///
    /// # Errors
    ///
    /// Returns a [`ComponentError`] if a variable is missing or has the wrong
    /// length.
    fn linearize(
        &self,
        inputs: &Variables,
        outputs: &Variables,
        partials: &mut Partials,
    ) -> ComponentResult<()>;

    /// Seeds the outputs before the solver iterates.
    ///
    /// The default leaves the outputs untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`ComponentError`] if a variable is missing or has the wrong
    /// length.
    fn guess_nonlinear(&self, _inputs: &Variables, _outputs: &mut Variables) -> ComponentResult<()> {
        Ok(())
    }

    /// Returns the full residual Jacobian: declared constants overlaid with
    /// [`linearize`](Self::linearize).
    ///
    /// # Errors
    ///
    /// Propagates errors from [`linearize`](Self::linearize).
    fn jacobian(&self, inputs: &Variables, outputs: &Variables) -> ComponentResult<Partials> {
        let mut known = inputs.clone();
        known.extend(outputs);
        let mut partials = self.interface().constant_partials(&known);
        self.linearize(inputs, outputs, &mut partials)?;
        Ok(partials)
    }
}

/// A type-erased component, as produced by the submodel registry.
pub enum Component {
    Explicit(Box<dyn ExplicitComponent>),
    Implicit(Box<dyn ImplicitComponent>),
}

impl Component {
    pub fn explicit(component: impl ExplicitComponent + 'static) -> Self {
        Self::Explicit(Box::new(component))
    }

    pub fn implicit(component: impl ImplicitComponent + 'static) -> Self {
        Self::Implicit(Box::new(component))
    }

    #[must_use]
    pub fn interface(&self) -> Interface {
        match self {
            Self::Explicit(component) => component.interface(),
            Self::Implicit(component) => component.interface(),
        }
    }

    #[must_use]
    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Implicit(_))
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_implicit() { "Implicit" } else { "Explicit" };
        f.debug_tuple(kind).field(&self.interface()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::num::NonZeroUsize;

    use crate::support::{
        mission::MissionAdaptor,
        registry::{RegistryError, SubmodelOptions, SubmodelRegistry},
    };

    #[test]
    fn debug_shows_kind_and_interface() {
        let points = NonZeroUsize::new(2).unwrap();
        let component = Component::explicit(MissionAdaptor::new("target", "voltage", "V", points));
        let printed = format!("{component:?}");
        assert!(printed.starts_with("Explicit("), "{printed}");
        assert!(printed.contains("\"voltage\""), "{printed}");
    }

    #[test]
    fn failed_builds_can_be_unwrapped_as_errors() {
        let registry = SubmodelRegistry::new();
        let options = SubmodelOptions::new("unit_1", NonZeroUsize::new(1).unwrap());
        let err = registry.build("submodel.missing", &options).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownService { .. }));
    }
}
