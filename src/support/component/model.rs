use twine_core::Model;

use super::{ComponentError, ExplicitComponent, Variables};

/// Thin [`twine_core::Model`] adapter over an [`ExplicitComponent`].
///
/// Outputs start from the component's declared initial guesses, so the
/// model output always carries every declared output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitModel<C>(C);

impl<C: ExplicitComponent> ExplicitModel<C> {
    pub fn new(component: C) -> Self {
        Self(component)
    }

    pub fn component(&self) -> &C {
        &self.0
    }

    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<C: ExplicitComponent> Model for ExplicitModel<C> {
    type Input = Variables;
    type Output = Variables;
    type Error = ComponentError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut outputs = self.0.interface().default_outputs();
        self.0.compute(input, &mut outputs)?;
        Ok(outputs)
    }
}
