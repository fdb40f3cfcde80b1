use std::num::NonZeroUsize;

use crate::support::{mission::MissionMaximum, naming::ComponentPaths};

use super::{MEAN_EFFECTIVE_PRESSURE, RPM, SHAFT_POWER, SUBSYSTEM};

/// Mission maxima of the engine. Power feeds the power caliber; speed and
/// mean effective pressure are reported for the regression range checks.
#[must_use]
pub fn mission_maximum(id: &str, number_of_points: NonZeroUsize) -> MissionMaximum {
    let paths = ComponentPaths::new(SUBSYSTEM, id);
    MissionMaximum::new(number_of_points)
        .quantity(SHAFT_POWER, paths.data("power_max"), "kW")
        .quantity(RPM, paths.data("rpm_max"), "rpm")
        .quantity(
            MEAN_EFFECTIVE_PRESSURE,
            paths.data("mean_effective_pressure_max_mission"),
            "bar",
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        models::test_support::{assert_partials, evaluate, points},
        support::component::{ExplicitComponent, Variables},
    };

    #[test]
    fn power_maximum_feeds_the_caliber() {
        let component = mission_maximum("ice_1", points(3));
        let inputs = Variables::new()
            .with(SHAFT_POWER, [80.0, 100.0, 60.0])
            .with(RPM, [2500.0, 2700.0, 2300.0])
            .with(MEAN_EFFECTIVE_PRESSURE, [15.0, 18.0, 12.0]);

        let outputs = evaluate(&component, &inputs);
        assert_eq!(
            outputs
                .scalar(&ComponentPaths::new(SUBSYSTEM, "ice_1").data("power_max"))
                .unwrap(),
            100.0
        );
        assert!(component.interface().validate().is_ok());
        assert_partials(&component, &inputs);
    }
}
