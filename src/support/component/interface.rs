use std::{collections::BTreeSet, num::NonZeroUsize};

use crate::support::units::Unit;

use super::{ComponentError, ComponentResult, Partial, Partials, Variables};

/// The length of a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A single value.
    Scalar,
    /// One value per evaluation point.
    Points,
    /// A fixed number of values.
    Fixed(usize),
    /// Either a single value or one value per evaluation point; the actual
    /// length is only known once a value arrives.
    Broadcast,
}

/// Declared sparsity of a partial block.
///
/// This is a hint to the external linear algebra; it must agree with the
/// [`Partial`] the component fills in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sparsity {
    Dense,
    Diagonal,
    /// Points-shaped output with respect to a scalar input.
    Column,
    /// Scalar output with respect to a points-shaped input.
    Row,
    /// Explicit (row, column) index pairs.
    Sparse { rows: Vec<usize>, cols: Vec<usize> },
    /// A column when the source is scalar, a diagonal when it is
    /// mission-length.
    Broadcast,
}

/// A declared input or output.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    units: &'static str,
    shape: Shape,
    value: f64,
    description: &'static str,
    lower: Option<f64>,
    upper: Option<f64>,
}

impl Variable {
    fn new(name: String, units: &'static str, shape: Shape, value: f64) -> Self {
        Self {
            name,
            units,
            shape,
            value,
            description: "",
            lower: None,
            upper: None,
        }
    }

    /// Sets the default value (for inputs) or initial guess (for outputs).
    pub fn val(&mut self, value: f64) -> &mut Self {
        self.value = value;
        self
    }

    pub fn desc(&mut self, description: &'static str) -> &mut Self {
        self.description = description;
        self
    }

    /// Sets a soft lower bound for the external solver.
    pub fn lower(&mut self, lower: f64) -> &mut Self {
        self.lower = Some(lower);
        self
    }

    /// Sets a soft upper bound for the external solver.
    pub fn upper(&mut self, upper: f64) -> &mut Self {
        self.upper = Some(upper);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn units(&self) -> &'static str {
        self.units
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    #[must_use]
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.lower, self.upper)
    }
}

/// A declared partial block.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialDeclaration {
    of: String,
    wrt: String,
    sparsity: Sparsity,
    constant: Option<f64>,
}

impl PartialDeclaration {
    /// Marks the block as constant: every structurally non-zero entry has
    /// this value and the component never recomputes it.
    pub fn constant(&mut self, value: f64) -> &mut Self {
        self.constant = Some(value);
        self
    }

    #[must_use]
    pub fn of(&self) -> &str {
        &self.of
    }

    #[must_use]
    pub fn wrt(&self) -> &str {
        &self.wrt
    }

    #[must_use]
    pub fn sparsity(&self) -> &Sparsity {
        &self.sparsity
    }

    #[must_use]
    pub fn constant_value(&self) -> Option<f64> {
        self.constant
    }
}

/// Inputs, outputs and partial sparsity of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    number_of_points: usize,
    inputs: Vec<Variable>,
    outputs: Vec<Variable>,
    partials: Vec<PartialDeclaration>,
}

impl Interface {
    /// Creates an empty interface for `number_of_points` evaluation points.
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self {
            number_of_points: number_of_points.get(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            partials: Vec::new(),
        }
    }

    /// Creates an empty interface for a component without mission arrays.
    #[must_use]
    pub fn sizing() -> Self {
        Self::new(NonZeroUsize::MIN)
    }

    /// Declares an input. Its default is NaN so a missing connection
    /// contaminates the outputs instead of passing unnoticed.
    pub fn add_input(
        &mut self,
        name: impl Into<String>,
        units: &'static str,
        shape: Shape,
    ) -> &mut Variable {
        self.inputs
            .push(Variable::new(name.into(), units, shape, f64::NAN));
        let last = self.inputs.len() - 1;
        &mut self.inputs[last]
    }

    /// Declares an output with an initial guess of `1.0`.
    pub fn add_output(
        &mut self,
        name: impl Into<String>,
        units: &'static str,
        shape: Shape,
    ) -> &mut Variable {
        self.outputs.push(Variable::new(name.into(), units, shape, 1.0));
        let last = self.outputs.len() - 1;
        &mut self.outputs[last]
    }

    /// Declares the sparsity of the partial of `of` with respect to `wrt`.
    pub fn declare_partials(
        &mut self,
        of: impl Into<String>,
        wrt: impl Into<String>,
        sparsity: Sparsity,
    ) -> &mut PartialDeclaration {
        self.partials.push(PartialDeclaration {
            of: of.into(),
            wrt: wrt.into(),
            sparsity,
            constant: None,
        });
        let last = self.partials.len() - 1;
        &mut self.partials[last]
    }

    #[must_use]
    pub fn number_of_points(&self) -> usize {
        self.number_of_points
    }

    #[must_use]
    pub fn inputs(&self) -> &[Variable] {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &[Variable] {
        &self.outputs
    }

    #[must_use]
    pub fn partials(&self) -> &[PartialDeclaration] {
        &self.partials
    }

    #[must_use]
    pub fn input(&self, name: &str) -> Option<&Variable> {
        self.inputs.iter().find(|v| v.name == name)
    }

    #[must_use]
    pub fn output(&self, name: &str) -> Option<&Variable> {
        self.outputs.iter().find(|v| v.name == name)
    }

    #[must_use]
    pub fn declaration(&self, of: &str, wrt: &str) -> Option<&PartialDeclaration> {
        self.partials.iter().find(|p| p.of == of && p.wrt == wrt)
    }

    /// The declared length of a shape. Broadcast shapes default to one value.
    #[must_use]
    pub fn len_of(&self, shape: Shape) -> usize {
        match shape {
            Shape::Scalar | Shape::Broadcast => 1,
            Shape::Points => self.number_of_points,
            Shape::Fixed(len) => len,
        }
    }

    /// Default input values, one entry per declared input.
    #[must_use]
    pub fn default_inputs(&self) -> Variables {
        self.defaults(&self.inputs)
    }

    /// Initial output guesses, one entry per declared output.
    #[must_use]
    pub fn default_outputs(&self) -> Variables {
        self.defaults(&self.outputs)
    }

    fn defaults(&self, variables: &[Variable]) -> Variables {
        let mut values = Variables::new();
        for variable in variables {
            values.set(
                variable.name.clone(),
                vec![variable.value; self.len_of(variable.shape)],
            );
        }
        values
    }

    /// Checks unit tags, duplicate names and that every partial refers to
    /// declared variables.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> ComponentResult<()> {
        let mut seen = BTreeSet::new();
        for variable in self.inputs.iter().chain(&self.outputs) {
            if !seen.insert(variable.name.as_str()) {
                return Err(ComponentError::DuplicateVariable {
                    name: variable.name.clone(),
                });
            }
            Unit::parse(variable.units).map_err(|source| ComponentError::Unit {
                name: variable.name.clone(),
                source,
            })?;
        }

        for partial in &self.partials {
            let known_of = self.output(&partial.of).is_some();
            let known_wrt = self.input(&partial.wrt).is_some() || self.output(&partial.wrt).is_some();
            if !known_of || !known_wrt {
                return Err(ComponentError::UndeclaredPartial {
                    of: partial.of.clone(),
                    wrt: partial.wrt.clone(),
                });
            }
        }

        Ok(())
    }

    /// The length a variable has for the given values: the actual length if a
    /// value is present, the declared length otherwise.
    #[must_use]
    pub fn actual_len(&self, name: &str, values: &Variables) -> usize {
        if let Ok(found) = values.get(name) {
            return found.len();
        }
        self.input(name)
            .or_else(|| self.output(name))
            .map_or(1, |v| self.len_of(v.shape))
    }

    /// Builds the blocks of every partial declared constant.
    #[must_use]
    pub fn constant_partials(&self, values: &Variables) -> Partials {
        let mut partials = Partials::new();
        for declaration in &self.partials {
            let Some(value) = declaration.constant else {
                continue;
            };
            let rows = self.actual_len(&declaration.of, values);
            let cols = self.actual_len(&declaration.wrt, values);
            partials.set(
                declaration.of.clone(),
                declaration.wrt.clone(),
                Partial::filled(&declaration.sparsity, value, rows, cols),
            );
        }
        partials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn defaults_follow_shapes() {
        let mut interface = Interface::new(points(3));
        interface.add_input("a", "A", Shape::Points);
        interface.add_input("b", "V", Shape::Scalar).val(2.0);
        interface.add_output("p", "W", Shape::Points).val(10.0);

        let inputs = interface.default_inputs();
        assert!(inputs.get("a").unwrap().iter().all(|v| v.is_nan()));
        assert_eq!(inputs.get("a").unwrap().len(), 3);
        assert_eq!(inputs.scalar("b").unwrap(), 2.0);
        assert_eq!(interface.default_outputs().get("p").unwrap(), &[10.0; 3]);
    }

    #[test]
    fn validate_catches_bad_declarations() {
        let mut interface = Interface::sizing();
        interface.add_input("a", "amps", Shape::Scalar);
        assert!(matches!(
            interface.validate(),
            Err(ComponentError::Unit { .. })
        ));

        let mut interface = Interface::sizing();
        interface.add_input("a", "A", Shape::Scalar);
        interface.add_output("b", "A", Shape::Scalar);
        interface.declare_partials("b", "c", Sparsity::Dense);
        assert!(matches!(
            interface.validate(),
            Err(ComponentError::UndeclaredPartial { .. })
        ));

        let mut interface = Interface::sizing();
        interface.add_input("a", "A", Shape::Scalar);
        interface.add_output("a", "A", Shape::Scalar);
        assert!(matches!(
            interface.validate(),
            Err(ComponentError::DuplicateVariable { .. })
        ));
    }

    #[test]
    fn constant_partials_use_actual_lengths() {
        let mut interface = Interface::new(points(4));
        interface.add_input("x", "A", Shape::Points);
        interface.add_output("y", "A", Shape::Points);
        interface
            .declare_partials("y", "x", Sparsity::Diagonal)
            .constant(-1.0);

        let values = Variables::new().with("x", vec![0.0; 4]);
        let partials = interface.constant_partials(&values);
        assert_eq!(partials.get("y", "x"), Some(&Partial::Diagonal(vec![-1.0; 4])));
    }
}
