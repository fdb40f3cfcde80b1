use std::num::NonZeroUsize;

use crate::support::component::{
    ComponentResult, ExplicitComponent, Interface, Shape, Sparsity, Variables,
};

use super::{FUEL_BOIL_OFF, FUEL_CONSUMED, FUEL_REMAINING, FUEL_TOTAL_MISSION, paths};

/// Row and column indices of the entries strictly below the diagonal.
fn strictly_lower(n: usize) -> Sparsity {
    let (rows, cols): (Vec<usize>, Vec<usize>) =
        (0..n).flat_map(|i| (0..i).map(move |j| (i, j))).unzip();
    Sparsity::Sparse { rows, cols }
}

/// Fuel left in the tank at the start of each time step.
///
/// `remaining[i] = total - sum_{j < i} (consumed[j] + boil_off[j])`: the
/// fuel used during step `i` is only gone at step `i + 1`, so the first
/// point always holds the full load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesFuelRemaining {
    total: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesFuelRemaining {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            total: paths(id).data(FUEL_TOTAL_MISSION),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesFuelRemaining {
    fn interface(&self) -> Interface {
        let n = self.number_of_points.get();
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(&self.total, "kg", Shape::Scalar)
            .desc("fuel loaded for the mission");
        interface
            .add_input(FUEL_CONSUMED, "kg", Shape::Points)
            .val(0.0);
        interface
            .add_input(FUEL_BOIL_OFF, "kg", Shape::Points)
            .val(0.0);
        interface
            .add_output(FUEL_REMAINING, "kg", Shape::Points)
            .val(0.0);

        interface
            .declare_partials(FUEL_REMAINING, &self.total, Sparsity::Column)
            .constant(1.0);
        interface
            .declare_partials(FUEL_REMAINING, FUEL_CONSUMED, strictly_lower(n))
            .constant(-1.0);
        interface
            .declare_partials(FUEL_REMAINING, FUEL_BOIL_OFF, strictly_lower(n))
            .constant(-1.0);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let total = inputs.scalar(&self.total)?;
        let consumed = inputs.array(FUEL_CONSUMED, n)?;
        let boil_off = inputs.array(FUEL_BOIL_OFF, n)?;

        let mut remaining = Vec::with_capacity(n);
        let mut left = total;
        for (c, b) in consumed.iter().zip(boil_off) {
            remaining.push(left);
            left -= c + b;
        }
        outputs.set(FUEL_REMAINING, remaining);
        Ok(())
    }
}

/// Total fuel leaving the tank over the mission, burnt or boiled off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformancesTotalFuelFlowed {
    total: String,
    number_of_points: NonZeroUsize,
}

impl PerformancesTotalFuelFlowed {
    #[must_use]
    pub fn new(id: &str, number_of_points: NonZeroUsize) -> Self {
        Self {
            total: paths(id).data(FUEL_TOTAL_MISSION),
            number_of_points,
        }
    }
}

impl ExplicitComponent for PerformancesTotalFuelFlowed {
    fn interface(&self) -> Interface {
        let mut interface = Interface::new(self.number_of_points);
        interface
            .add_input(FUEL_CONSUMED, "kg", Shape::Points)
            .val(0.0);
        interface
            .add_input(FUEL_BOIL_OFF, "kg", Shape::Points)
            .val(0.0);
        interface
            .add_output(&self.total, "kg", Shape::Scalar)
            .val(100.0);

        interface
            .declare_partials(&self.total, FUEL_CONSUMED, Sparsity::Row)
            .constant(1.0);
        interface
            .declare_partials(&self.total, FUEL_BOIL_OFF, Sparsity::Row)
            .constant(1.0);
        interface
    }

    fn compute(&self, inputs: &Variables, outputs: &mut Variables) -> ComponentResult<()> {
        let n = self.number_of_points.get();
        let consumed: f64 = inputs.array(FUEL_CONSUMED, n)?.iter().sum();
        let boil_off: f64 = inputs.array(FUEL_BOIL_OFF, n)?.iter().sum();
        outputs.set(&self.total, [consumed + boil_off]);
        Ok(())
    }
}
