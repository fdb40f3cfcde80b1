use thiserror::Error;

use crate::support::units::UnitError;

/// Errors raised while declaring or evaluating a component.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComponentError {
    /// A variable was read before any value was provided for it.
    #[error("variable `{name}` is not set")]
    MissingVariable { name: String },

    /// A variable has a different length than its declared shape.
    #[error("variable `{name}` has {found} value(s), expected {expected}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A mission control input is neither a single value nor one value per
    /// evaluation point.
    #[error(
        "variable `{name}` has {found} value(s), expected 1 or the number of points ({points})"
    )]
    InvalidBroadcast {
        name: String,
        points: usize,
        found: usize,
    },

    /// A partial was populated for a pair that was never declared, or
    /// declared against a variable that does not exist.
    #[error("partial of `{of}` with respect to `{wrt}` is not declared")]
    UndeclaredPartial { of: String, wrt: String },

    /// A partial's sparse form does not fit the sizes of its variables.
    #[error("partial of `{of}` with respect to `{wrt}` does not fit a {rows}x{cols} block")]
    PartialShape {
        of: String,
        wrt: String,
        rows: usize,
        cols: usize,
    },

    /// The same variable name was declared twice.
    #[error("variable `{name}` is declared more than once")]
    DuplicateVariable { name: String },

    /// A variable's unit tag is unknown.
    #[error("variable `{name}`: {source}")]
    Unit {
        name: String,
        #[source]
        source: UnitError,
    },
}

pub type ComponentResult<T> = Result<T, ComponentError>;
