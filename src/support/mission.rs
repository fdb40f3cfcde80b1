//! Mission-level helpers shared by every powertrain subsystem.
//!
//! - [`MissionAdaptor`]: spreads a design value (voltage target, switching
//!   frequency, fixed temperature or efficiency) over every evaluation point.
//! - [`MissionMaximum`]: reduces mission arrays to their maximum, the value
//!   that calibers are sized against.

use std::num::NonZeroUsize;

use tracing::debug;

use super::component::{
    ComponentError, ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape,
    Sparsity, Variables,
};

/// Spreads `values` over `points` evaluation points.
///
/// A single value is repeated, a mission-length array is returned as is.
///
/// # Errors
///
/// Returns [`ComponentError::InvalidBroadcast`] for any other length.
pub fn broadcast(name: &str, values: &[f64], points: usize) -> ComponentResult<Vec<f64>> {
    match values.len() {
        1 => Ok(vec![values[0]; points]),
        len if len == points => Ok(values.to_vec()),
        found => {
            debug!(variable = name, points, found, "rejected mission input shape");
            Err(ComponentError::InvalidBroadcast {
                name: name.to_owned(),
                points,
                found,
            })
        }
    }
}

/// Turns a design value into a mission-length array.
///
/// The input may hold a single value (broadcast to every point) or one value
/// per point (passed through). The partial is an all-ones column in the
/// first case and the identity in the second.
///
/// Several outputs may be fed from the same input with
/// [`and_output`](Self::and_output).
#[derive(Debug, Clone, PartialEq)]
pub struct MissionAdaptor {
    input: String,
    outputs: Vec<String>,
    units: &'static str,
    number_of_points: NonZeroUsize,
    description: &'static str,
}

impl MissionAdaptor {
    pub fn new(
        input: impl Into<String>,
        output: impl Into<String>,
        units: &'static str,
        number_of_points: NonZeroUsize,
    ) -> Self {
        Self {
            input: input.into(),
            outputs: vec![output.into()],
            units,
            number_of_points,
            description: "",
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Adds another output carrying the same values.
    #[must_use]
    pub fn and_output(mut self, output: impl Into<String>) -> Self {
        self.outputs.push(output.into());
        self
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }
}

impl ExplicitComponent for MissionAdaptor {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(&self.input, self.units, Shape::Broadcast)
            .desc(self.description);
        for output in &self.outputs {
            interface
                .add_output(output, self.units, Shape::Points)
                .desc(self.description);
            interface
                .declare_partials(output, &self.input, Sparsity::Broadcast)
                .constant(1.0);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let values = broadcast(
            &self.input,
            inputs.get(&self.input)?,
            self.number_of_points.get(),
        )?;
        for output in &self.outputs {
            outputs.set(output, values.clone());
        }
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let partial = match inputs.get(&self.input)?.len() {
            1 => Partial::Column(vec![1.0; n]),
            len if len == n => Partial::Diagonal(vec![1.0; n]),
            found => {
                return Err(ComponentError::InvalidBroadcast {
                    name: self.input.clone(),
                    points: n,
                    found,
                });
            }
        };
        for output in &self.outputs {
            partials.set(output, &self.input, partial.clone());
        }
        Ok(())
    }
}

/// One quantity reduced by [`MissionMaximum`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reduced {
    input: String,
    output: String,
    units: &'static str,
}

/// Maximum of mission arrays over all evaluation points.
///
/// The partial is one at the (first) arg-max and zero elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionMaximum {
    number_of_points: NonZeroUsize,
    quantities: Vec<Reduced>,
}

impl MissionMaximum {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self {
            number_of_points,
            quantities: Vec::new(),
        }
    }

    /// Adds a mission array `input` whose maximum is written to `output`.
    #[must_use]
    pub fn quantity(
        mut self,
        input: impl Into<String>,
        output: impl Into<String>,
        units: &'static str,
    ) -> Self {
        self.quantities.push(Reduced {
            input: input.into(),
            output: output.into(),
            units,
        });
        self
    }
}

/// Index and value of the first maximum. The first NaN wins over any number.
fn arg_max(values: &[f64]) -> (usize, f64) {
    if let Some(idx) = values.iter().position(|v| v.is_nan()) {
        return (idx, f64::NAN);
    }
    values
        .iter()
        .enumerate()
        .skip(1)
        .fold((0, values[0]), |(best_idx, best), (idx, &value)| {
            if value > best {
                (idx, value)
            } else {
                (best_idx, best)
            }
        })
}

impl ExplicitComponent for MissionMaximum {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        for quantity in &self.quantities {
            interface.add_input(&quantity.input, quantity.units, Shape::Points);
            interface.add_output(&quantity.output, quantity.units, Shape::Scalar);
            interface.declare_partials(&quantity.output, &quantity.input, Sparsity::Row);
        }
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        for quantity in &self.quantities {
            let (_, max) = arg_max(inputs.array(&quantity.input, n)?);
            outputs.set(&quantity.output, [max]);
        }
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        for quantity in &self.quantities {
            let (idx, _) = arg_max(inputs.array(&quantity.input, n)?);
            let mut row = vec![0.0; n];
            row[idx] = 1.0;
            partials.set(&quantity.output, &quantity.input, Partial::Row(row));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::support::check::{PartialsCheckConfig, check_partials};

    fn points(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn broadcast_rejects_other_lengths() {
        assert_eq!(broadcast("x", &[2.0], 3).unwrap(), vec![2.0; 3]);
        assert_eq!(broadcast("x", &[1.0, 2.0, 3.0], 3).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(
            broadcast("x", &[1.0, 2.0], 3),
            Err(ComponentError::InvalidBroadcast {
                name: "x".into(),
                points: 3,
                found: 2
            })
        );
    }

    #[test]
    fn adaptor_partials_match_source_shape() {
        let adaptor = MissionAdaptor::new("in", "out", "Hz", points(5));

        let scalar = Variables::new().with("in", [12.0e3]);
        let report = check_partials(&adaptor, &scalar, PartialsCheckConfig::default()).unwrap();
        assert!(report.is_consistent(), "{report}");
        assert_eq!(
            adaptor.jacobian(&scalar).unwrap().get("out", "in"),
            Some(&Partial::Column(vec![1.0; 5]))
        );

        let array = Variables::new().with("in", [1.0, 2.0, 3.0, 4.0, 5.0]);
        let report = check_partials(&adaptor, &array, PartialsCheckConfig::default()).unwrap();
        assert!(report.is_consistent(), "{report}");
        assert_eq!(
            adaptor.jacobian(&array).unwrap().get("out", "in"),
            Some(&Partial::Diagonal(vec![1.0; 5]))
        );
    }

    #[test]
    fn adaptor_rejects_wrong_length_at_compute_time() {
        let adaptor = MissionAdaptor::new("in", "out", "V", points(4));
        let mut outputs = adaptor.interface().default_outputs();
        let err = adaptor
            .compute(&Variables::new().with("in", [1.0, 2.0]), &mut outputs)
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidBroadcast { found: 2, .. }));
    }

    #[test]
    fn maximum_picks_first_peak() {
        let maximum = MissionMaximum::new(points(4)).quantity("current", "current_max", "A");
        let inputs = Variables::new().with("current", [10.0, 133.0, 133.0, 50.0]);

        let mut outputs = maximum.interface().default_outputs();
        maximum.compute(&inputs, &mut outputs).unwrap();
        assert_eq!(outputs.scalar("current_max").unwrap(), 133.0);

        let partials = maximum.jacobian(&inputs).unwrap();
        assert_eq!(
            partials.get("current_max", "current"),
            Some(&Partial::Row(vec![0.0, 1.0, 0.0, 0.0]))
        );
    }

    #[test]
    fn maximum_propagates_nan() {
        let maximum = MissionMaximum::new(points(3)).quantity("current", "current_max", "A");
        let inputs = Variables::new().with("current", [1.0, f64::NAN, 3.0]);

        let mut outputs = maximum.interface().default_outputs();
        maximum.compute(&inputs, &mut outputs).unwrap();
        assert!(outputs.scalar("current_max").unwrap().is_nan());

        let partials = maximum.jacobian(&inputs).unwrap();
        assert_eq!(
            partials.get("current_max", "current"),
            Some(&Partial::Row(vec![0.0, 1.0, 0.0]))
        );
    }

    proptest! {
        #[test]
        fn scalar_input_equals_broadcast(value in -1.0e6_f64..1.0e6, n in 1_usize..50) {
            let adaptor = MissionAdaptor::new("in", "out", "W", points(n));
            let mut outputs = adaptor.interface().default_outputs();
            adaptor.compute(&Variables::new().with("in", [value]), &mut outputs).unwrap();
            prop_assert!(outputs.get("out").unwrap().iter().all(|v| *v == value));
        }

        #[test]
        fn mission_length_input_is_identity(values in prop::collection::vec(-1.0e3_f64..1.0e3, 2..40)) {
            let adaptor = MissionAdaptor::new("in", "out", "V", points(values.len()));
            let mut outputs = adaptor.interface().default_outputs();
            adaptor.compute(&Variables::new().with("in", values.clone()), &mut outputs).unwrap();
            prop_assert_eq!(outputs.get("out").unwrap(), values.as_slice());
        }
    }
}
