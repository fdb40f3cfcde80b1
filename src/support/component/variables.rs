use std::collections::BTreeMap;

use super::{ComponentError, ComponentResult};

/// Named numeric values keyed by variable path.
///
/// Used for inputs, outputs and residuals alike. Every value is stored as a
/// flat vector; scalars are vectors of length one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: BTreeMap<String, Vec<f64>>,
}

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        self.set(name, values);
        self
    }

    /// Sets (or replaces) the values of a variable.
    pub fn set(&mut self, name: impl Into<String>, values: impl Into<Vec<f64>>) {
        self.values.insert(name.into(), values.into());
    }

    /// Copies every variable of `other` into `self`, replacing duplicates.
    pub fn extend(&mut self, other: &Variables) {
        for (name, values) in &other.values {
            self.values.insert(name.clone(), values.clone());
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the values of a variable.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::MissingVariable`] if the variable is not set.
    pub fn get(&self, name: &str) -> ComponentResult<&[f64]> {
        self.values
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ComponentError::MissingVariable {
                name: name.to_owned(),
            })
    }

    /// Returns the single value of a scalar variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set or does not hold exactly
    /// one value.
    pub fn scalar(&self, name: &str) -> ComponentResult<f64> {
        match self.get(name)? {
            [value] => Ok(*value),
            values => Err(ComponentError::ShapeMismatch {
                name: name.to_owned(),
                expected: 1,
                found: values.len(),
            }),
        }
    }

    /// Returns the values of a variable that must hold exactly `len` values.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set or has another length.
    pub fn array(&self, name: &str, len: usize) -> ComponentResult<&[f64]> {
        let values = self.get(name)?;
        if values.len() != len {
            return Err(ComponentError::ShapeMismatch {
                name: name.to_owned(),
                expected: len,
                found: values.len(),
            });
        }
        Ok(values)
    }

    /// Returns a mutable handle to the values of a variable.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::MissingVariable`] if the variable is not set.
    pub fn get_mut(&mut self, name: &str) -> ComponentResult<&mut Vec<f64>> {
        self.values
            .get_mut(name)
            .ok_or_else(|| ComponentError::MissingVariable {
                name: name.to_owned(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.values
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_rejects_arrays() {
        let vars = Variables::new().with("x", [1.0, 2.0]);

        assert_eq!(vars.get("x").unwrap(), &[1.0, 2.0]);
        assert_eq!(
            vars.scalar("x"),
            Err(ComponentError::ShapeMismatch {
                name: "x".into(),
                expected: 1,
                found: 2
            })
        );
        assert!(matches!(
            vars.scalar("y"),
            Err(ComponentError::MissingVariable { .. })
        ));
    }

    #[test]
    fn array_checks_length() {
        let vars = Variables::new().with("x", vec![0.0; 4]);

        assert!(vars.array("x", 4).is_ok());
        assert!(vars.array("x", 5).is_err());
    }
}
