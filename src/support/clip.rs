//! Clipping to a validity range, with masked derivatives.
//!
//! Regressions and physical ranges are enforced by clipping rather than by
//! raising: the model returns its best estimate at the boundary. Where a
//! value was clipped, its derivative is replaced by a stand-in. Most models
//! use [`CLIPPED_GRADIENT`], a small non-zero value that keeps gradient-based
//! solvers from stalling on the flat region.

/// Derivative stand-in used where a value was clipped.
pub const CLIPPED_GRADIENT: f64 = 1e-6;

/// A value after clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clipped {
    pub value: f64,
    /// `true` if the raw value was strictly outside the bounds.
    pub active: bool,
}

impl Clipped {
    /// Returns `derivative` where the value was not clipped and `stand_in`
    /// where it was.
    #[must_use]
    pub fn mask(&self, derivative: f64, stand_in: f64) -> f64 {
        if self.active { stand_in } else { derivative }
    }
}

/// Clips `value` to `[lower, upper]`.
///
/// NaN passes through unclipped.
#[must_use]
pub fn clip(value: f64, lower: f64, upper: f64) -> Clipped {
    if value < lower {
        Clipped {
            value: lower,
            active: true,
        }
    } else if value > upper {
        Clipped {
            value: upper,
            active: true,
        }
    } else {
        Clipped {
            value,
            active: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        assert!(!clip(1.0, 0.0, 1.0).active);
        assert_eq!(clip(1.0 + 1e-12, 0.0, 1.0).value, 1.0);
        assert!(clip(-0.5, 0.0, 1.0).active);
    }

    #[test]
    fn mask_replaces_derivative_when_active() {
        let clipped = clip(5.0, 0.0, 1.0);
        assert_eq!(clipped.mask(3.0, CLIPPED_GRADIENT), CLIPPED_GRADIENT);
        assert_eq!(clip(0.5, 0.0, 1.0).mask(3.0, CLIPPED_GRADIENT), 3.0);
    }

    #[test]
    fn nan_is_not_clipped() {
        let clipped = clip(f64::NAN, 0.0, 1.0);
        assert!(clipped.value.is_nan());
        assert!(!clipped.active);
    }
}
