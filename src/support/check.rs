//! Central-difference verification of analytic partials.
//!
//! The one invariant every component must keep is that its Jacobian is the
//! derivative of its compute function. [`check_partials`] (explicit) and
//! [`check_residual_partials`] (implicit) perturb every input (and, for
//! implicit components, every output) one entry at a time and compare the
//! central difference against the analytic block.
//!
//! Pairs that were never declared are compared against zero, so a missing
//! declaration shows up as a mismatch too.

use std::fmt;

use super::component::{
    ComponentError, ComponentResult, ExplicitComponent, ImplicitComponent, Interface, Partials,
    Variables,
};

/// Step and tolerances for [`check_partials`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartialsCheckConfig {
    /// Relative finite-difference step (absolute when the value is zero).
    pub step: f64,

    /// Absolute tolerance on each Jacobian entry.
    pub abs_tol: f64,

    /// Relative tolerance on each Jacobian entry.
    pub rel_tol: f64,
}

impl Default for PartialsCheckConfig {
    fn default() -> Self {
        Self {
            step: 1e-6,
            abs_tol: 1e-5,
            rel_tol: 1e-5,
        }
    }
}

/// A Jacobian entry where analytic and finite-difference values disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialsMismatch {
    pub of: String,
    pub wrt: String,
    pub row: usize,
    pub col: usize,
    pub analytic: f64,
    pub finite_difference: f64,
}

/// Result of a partials check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialsReport {
    pub mismatches: Vec<PartialsMismatch>,
    /// Number of Jacobian entries compared.
    pub entries: usize,
}

impl PartialsReport {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for PartialsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} mismatch(es) out of {} entries",
            self.mismatches.len(),
            self.entries
        )?;
        for m in &self.mismatches {
            writeln!(
                f,
                "  d[{}][{}] / d[{}][{}]: analytic={:e} fd={:e}",
                m.of, m.row, m.wrt, m.col, m.analytic, m.finite_difference
            )?;
        }
        Ok(())
    }
}

/// Checks the Jacobian of an explicit component at `inputs`.
///
/// # Errors
///
/// Returns an error if the interface is invalid, a partial is populated for
/// an undeclared pair, a block does not fit its variables, or evaluation
/// fails.
pub fn check_partials<C: ExplicitComponent + ?Sized>(
    component: &C,
    inputs: &Variables,
    config: PartialsCheckConfig,
) -> ComponentResult<PartialsReport> {
    let interface = component.interface();
    interface.validate()?;

    let analytic = component.jacobian(inputs)?;
    let evaluate = |point: &Variables| -> ComponentResult<Variables> {
        let mut outputs = interface.default_outputs();
        component.compute(point, &mut outputs)?;
        Ok(outputs)
    };

    let wrt: Vec<&str> = interface.inputs().iter().map(|v| v.name()).collect();
    compare(&interface, &analytic, inputs, &wrt, evaluate, config)
}

/// Checks the residual Jacobian of an implicit component at
/// (`inputs`, `outputs`).
///
/// # Errors
///
/// Same conditions as [`check_partials`].
pub fn check_residual_partials<C: ImplicitComponent + ?Sized>(
    component: &C,
    inputs: &Variables,
    outputs: &Variables,
    config: PartialsCheckConfig,
) -> ComponentResult<PartialsReport> {
    let interface = component.interface();
    interface.validate()?;

    let analytic = component.jacobian(inputs, outputs)?;

    let mut point = inputs.clone();
    point.extend(outputs);
    let output_names: Vec<&str> = interface.outputs().iter().map(|v| v.name()).collect();

    let evaluate = |point: &Variables| -> ComponentResult<Variables> {
        let mut states = Variables::new();
        for name in &output_names {
            states.set(*name, point.get(name)?.to_vec());
        }
        let mut residuals = interface.default_outputs();
        component.apply_nonlinear(point, &states, &mut residuals)?;
        Ok(residuals)
    };

    let wrt: Vec<&str> = interface
        .inputs()
        .iter()
        .chain(interface.outputs())
        .map(|v| v.name())
        .collect();
    compare(&interface, &analytic, &point, &wrt, evaluate, config)
}

fn compare(
    interface: &Interface,
    analytic: &Partials,
    point: &Variables,
    wrt_names: &[&str],
    evaluate: impl Fn(&Variables) -> ComponentResult<Variables>,
    config: PartialsCheckConfig,
) -> ComponentResult<PartialsReport> {
    for (of, wrt, _) in analytic.iter() {
        if interface.declaration(of, wrt).is_none() {
            return Err(ComponentError::UndeclaredPartial {
                of: of.to_owned(),
                wrt: wrt.to_owned(),
            });
        }
    }

    let base = evaluate(point)?;
    let mut report = PartialsReport::default();

    for wrt in wrt_names {
        let x = point.get(wrt)?.to_vec();
        let cols = x.len();

        // Finite-difference columns, indexed [output][col][row].
        let mut columns: Vec<Vec<Vec<f64>>> = vec![Vec::with_capacity(cols); interface.outputs().len()];
        for col in 0..cols {
            let h = if x[col] == 0.0 {
                config.step
            } else {
                config.step * x[col].abs()
            };

            let mut forward = point.clone();
            forward.get_mut(wrt)?[col] = x[col] + h;
            let mut backward = point.clone();
            backward.get_mut(wrt)?[col] = x[col] - h;

            let plus = evaluate(&forward)?;
            let minus = evaluate(&backward)?;

            for (k, output) in interface.outputs().iter().enumerate() {
                let hi = plus.get(output.name())?;
                let lo = minus.get(output.name())?;
                columns[k].push(
                    hi.iter()
                        .zip(lo)
                        .map(|(a, b)| (a - b) / (2.0 * h))
                        .collect(),
                );
            }
        }

        for (k, output) in interface.outputs().iter().enumerate() {
            let of = output.name();
            let rows = base.get(of)?.len();
            let dense = match analytic.get(of, wrt) {
                Some(partial) => {
                    partial
                        .to_dense(rows, cols)
                        .ok_or_else(|| ComponentError::PartialShape {
                            of: of.to_owned(),
                            wrt: (*wrt).to_owned(),
                            rows,
                            cols,
                        })?
                }
                None => vec![0.0; rows * cols],
            };

            for (col, fd_column) in columns[k].iter().enumerate() {
                for (row, &fd) in fd_column.iter().enumerate() {
                    let a = dense[row * cols + col];
                    report.entries += 1;
                    let tol = config.abs_tol + config.rel_tol * a.abs().max(fd.abs());
                    if (a - fd).abs() > tol || a.is_nan() != fd.is_nan() {
                        report.mismatches.push(PartialsMismatch {
                            of: of.to_owned(),
                            wrt: (*wrt).to_owned(),
                            row,
                            col,
                            analytic: a,
                            finite_difference: fd,
                        });
                    }
                }
            }
        }
    }

    Ok(report)
}
