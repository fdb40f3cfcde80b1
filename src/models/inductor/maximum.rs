use std::num::NonZeroUsize;

use crate::support::mission::MissionMaximum;

use super::{CURRENT_RMS, LOSSES, paths};

/// Mission maxima of the inductor: current feeds the current caliber, losses
/// size the cooling.
#[must_use]
pub fn mission_maximum(id: &str, number_of_points: NonZeroUsize) -> MissionMaximum {
    let paths = paths(id);
    MissionMaximum::new(number_of_points)
        .quantity(CURRENT_RMS, paths.data("current_max"), "A")
        .quantity(LOSSES, paths.data("losses_max"), "W")
}
