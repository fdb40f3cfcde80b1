use std::num::NonZeroUsize;

use crate::support::{
    check::{PartialsCheckConfig, check_partials, check_residual_partials},
    component::{ExplicitComponent, ImplicitComponent, Variables},
};

pub(crate) fn points(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("test point counts are non-zero")
}

/// Runs `compute` starting from the declared initial guesses.
pub(crate) fn evaluate(component: &impl ExplicitComponent, inputs: &Variables) -> Variables {
    let mut outputs = component.interface().default_outputs();
    component
        .compute(inputs, &mut outputs)
        .expect("compute should succeed");
    outputs
}

/// Runs `apply_nonlinear` and returns the residuals.
pub(crate) fn residuals(
    component: &impl ImplicitComponent,
    inputs: &Variables,
    outputs: &Variables,
) -> Variables {
    let mut residuals = component.interface().default_outputs();
    component
        .apply_nonlinear(inputs, outputs, &mut residuals)
        .expect("apply_nonlinear should succeed");
    residuals
}

pub(crate) fn assert_partials(component: &impl ExplicitComponent, inputs: &Variables) {
    let report = check_partials(component, inputs, PartialsCheckConfig::default())
        .expect("partials check should run");
    assert!(report.is_consistent(), "{report}");
}

pub(crate) fn assert_residual_partials(
    component: &impl ImplicitComponent,
    inputs: &Variables,
    outputs: &Variables,
) {
    let report = check_residual_partials(component, inputs, outputs, PartialsCheckConfig::default())
        .expect("partials check should run");
    assert!(report.is_consistent(), "{report}");
}
