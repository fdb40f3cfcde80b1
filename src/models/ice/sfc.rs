use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::support::{
    clip::{CLIPPED_GRADIENT, clip},
    component::{
        ComponentResult, ExplicitComponent, Interface, Partial, Partials, Shape, Sparsity,
        Variables,
    },
};

use super::{MEAN_EFFECTIVE_PRESSURE, RPM, SFC};

/// Validity range of one regression variable.
///
/// The variable is clipped to `[lower, upper]` and normalized to `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionAxis {
    pub lower: f64,
    pub upper: f64,
}

impl RegressionAxis {
    fn center(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    fn half_range(&self) -> f64 {
        0.5 * (self.upper - self.lower)
    }
}

/// Quadratic response surface of the specific fuel consumption.
///
/// With `x` the normalized speed and `y` the normalized mean effective
/// pressure, `sfc = c0 + c1 x + c2 y + c3 x^2 + c4 x y + c5 y^2` in g/kW/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SfcRegression {
    /// rpm
    pub rpm: RegressionAxis,
    /// bar
    pub mean_effective_pressure: RegressionAxis,
    pub coefficients: [f64; 6],
    /// Physical bounds of the result, g/kW/h.
    pub output: RegressionAxis,
}

impl Default for SfcRegression {
    fn default() -> Self {
        Self {
            rpm: RegressionAxis {
                lower: 2200.0,
                upper: 2700.0,
            },
            mean_effective_pressure: RegressionAxis {
                lower: 8.081,
                upper: 20.628,
            },
            coefficients: [236.2, 4.7, -21.3, 3.1, -2.2, 14.8],
            output: RegressionAxis {
                lower: 0.0,
                upper: 1000.0,
            },
        }
    }
}

/// SFC and its derivatives at one point.
struct Evaluation {
    sfc: f64,
    d_rpm: f64,
    d_mep: f64,
}

impl SfcRegression {
    fn evaluate(&self, rpm: f64, mep: f64) -> Evaluation {
        let rpm = clip(rpm, self.rpm.lower, self.rpm.upper);
        let mep = clip(mep, self.mean_effective_pressure.lower, self.mean_effective_pressure.upper);

        let x = (rpm.value - self.rpm.center()) / self.rpm.half_range();
        let y = (mep.value - self.mean_effective_pressure.center())
            / self.mean_effective_pressure.half_range();
        let [c0, c1, c2, c3, c4, c5] = self.coefficients;

        let raw = c0 + c1 * x + c2 * y + c3 * x * x + c4 * x * y + c5 * y * y;
        let d_x = c1 + 2.0 * c3 * x + c4 * y;
        let d_y = c2 + c4 * x + 2.0 * c5 * y;

        let sfc = clip(raw, self.output.lower, self.output.upper);
        Evaluation {
            sfc: sfc.value,
            d_rpm: sfc.mask(
                rpm.mask(d_x / self.rpm.half_range(), CLIPPED_GRADIENT),
                CLIPPED_GRADIENT,
            ),
            d_mep: sfc.mask(
                mep.mask(
                    d_y / self.mean_effective_pressure.half_range(),
                    CLIPPED_GRADIENT,
                ),
                CLIPPED_GRADIENT,
            ),
        }
    }
}

/// Specific fuel consumption of the engine from its operating point.
///
/// Speed and mean effective pressure are clipped to the validity range of
/// the regression and the result to physical bounds. Where either clip is
/// active the partial is replaced by a small stand-in.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformancesSfc {
    regression: SfcRegression,
    number_of_points: NonZeroUsize,
}

impl PerformancesSfc {
    #[must_use]
    pub fn new(number_of_points: NonZeroUsize) -> Self {
        Self::with_regression(number_of_points, SfcRegression::default())
    }

    #[must_use]
    pub fn with_regression(number_of_points: NonZeroUsize, regression: SfcRegression) -> Self {
        Self {
            regression,
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesSfc {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface.add_input(RPM, "rpm", Shape::Points);
        interface.add_input(MEAN_EFFECTIVE_PRESSURE, "bar", Shape::Points);
        interface
            .add_output(SFC, "g/kW/h", Shape::Points)
            .val(240.0);
        interface.declare_partials(SFC, RPM, Sparsity::Diagonal);
        interface.declare_partials(SFC, MEAN_EFFECTIVE_PRESSURE, Sparsity::Diagonal);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let rpm = inputs.array(RPM, n)?;
        let mep = inputs.array(MEAN_EFFECTIVE_PRESSURE, n)?;

        outputs.set(
            SFC,
            (0..n)
                .map(|i| self.regression.evaluate(rpm[i], mep[i]).sfc)
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    fn compute_partials(&self, inputs: &Variables, partials: &mut Partials) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let rpm = inputs.array(RPM, n)?;
        let mep = inputs.array(MEAN_EFFECTIVE_PRESSURE, n)?;

        let evaluations: Vec<Evaluation> = (0..n)
            .map(|i| self.regression.evaluate(rpm[i], mep[i]))
            .collect();
        partials.set(
            SFC,
            RPM,
            Partial::Diagonal(evaluations.iter().map(|e| e.d_rpm).collect()),
        );
        partials.set(
            SFC,
            MEAN_EFFECTIVE_PRESSURE,
            Partial::Diagonal(evaluations.iter().map(|e| e.d_mep).collect()),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::test_support::{assert_partials, evaluate, points};

    #[test]
    fn center_of_the_map() {
        let component = PerformancesSfc::new(points(1));
        let inputs = Variables::new()
            .with(RPM, [2450.0])
            .with(MEAN_EFFECTIVE_PRESSURE, [14.3545]);

        let outputs = evaluate(&component, &inputs);
        assert_relative_eq!(outputs.get(SFC).unwrap()[0], 236.2, epsilon = 1e-9);
    }

    #[test]
    fn inputs_are_clipped_to_the_regression_range() {
        let component = PerformancesSfc::new(points(2));
        let at_bounds = Variables::new()
            .with(RPM, [2700.0, 2200.0])
            .with(MEAN_EFFECTIVE_PRESSURE, [20.628, 8.081]);
        let beyond = Variables::new()
            .with(RPM, [3100.0, 1500.0])
            .with(MEAN_EFFECTIVE_PRESSURE, [25.0, 2.0]);

        assert_eq!(
            evaluate(&component, &at_bounds).get(SFC).unwrap(),
            evaluate(&component, &beyond).get(SFC).unwrap()
        );

        let partials = component.jacobian(&beyond).unwrap();
        assert_eq!(
            partials.get(SFC, RPM),
            Some(&Partial::Diagonal(vec![CLIPPED_GRADIENT; 2]))
        );
        assert_eq!(
            partials.get(SFC, MEAN_EFFECTIVE_PRESSURE),
            Some(&Partial::Diagonal(vec![CLIPPED_GRADIENT; 2]))
        );
    }

    #[test]
    fn output_is_clipped_to_physical_bounds() {
        let regression = SfcRegression {
            coefficients: [-50.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            ..SfcRegression::default()
        };
        let component = PerformancesSfc::with_regression(points(1), regression);
        let inputs = Variables::new()
            .with(RPM, [2400.0])
            .with(MEAN_EFFECTIVE_PRESSURE, [12.0]);

        assert_eq!(evaluate(&component, &inputs).get(SFC).unwrap(), &[0.0]);
        assert_eq!(
            component.jacobian(&inputs).unwrap().get(SFC, RPM),
            Some(&Partial::Diagonal(vec![CLIPPED_GRADIENT]))
        );
    }

    #[test]
    fn partials() {
        let component = PerformancesSfc::new(points(4));
        let inputs = Variables::new()
            .with(RPM, [2300.0, 2450.0, 2650.0, 2900.0])
            .with(MEAN_EFFECTIVE_PRESSURE, [10.0, 14.0, 19.0, 5.0]);
        assert_partials(&component, &inputs);
    }

    #[test]
    fn regression_deserializes_with_defaults() {
        let regression: SfcRegression =
            serde_json::from_str(r#"{"coefficients": [250.0, 0.0, 0.0, 0.0, 0.0, 0.0]}"#).unwrap();
        assert_eq!(regression.rpm, SfcRegression::default().rpm);
        assert_eq!(regression.coefficients[0], 250.0);
    }
}
