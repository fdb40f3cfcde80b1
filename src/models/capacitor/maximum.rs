use std::num::NonZeroUsize;

use crate::support::mission::MissionMaximum;

use super::{DC_VOLTAGE, paths};

/// Highest DC-link voltage over the mission, which the voltage caliber is
/// sized against.
#[must_use]
pub fn mission_maximum(id: &str, number_of_points: NonZeroUsize) -> MissionMaximum {
    MissionMaximum::new(number_of_points).quantity(DC_VOLTAGE, paths(id).data("voltage_max"), "V")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        models::{
            capacitor::{CAPACITANCE, SizingWeight, VOLTAGE, VOLTAGE_CALIBER},
            test_support::{evaluate, points},
        },
        support::{
            component::{ExplicitComponent, Variables},
            constraints::EnforceCaliber,
        },
    };

    #[test]
    fn maximum_voltage_sizes_the_capacitor() {
        let maximum = mission_maximum("capacitor_1", points(3));
        let peaks = evaluate(
            &maximum,
            &Variables::new().with(DC_VOLTAGE, [780.0, 815.0, 800.0]),
        );

        let caliber = evaluate(&EnforceCaliber::new(paths("capacitor_1"), [VOLTAGE]), &peaks);
        assert_eq!(
            caliber.scalar(&paths("capacitor_1").data(VOLTAGE_CALIBER)).unwrap(),
            815.0
        );

        let mut sizing = caliber;
        sizing.set(paths("capacitor_1").data(CAPACITANCE), [1.0e-3]);
        sizing.set(paths("capacitor_1").settings("specific_energy"), [100.0]);
        let weight = SizingWeight::new("capacitor_1");
        assert!(weight.interface().validate().is_ok());
        let mass = evaluate(&weight, &sizing);
        assert!(mass.scalar(&paths("capacitor_1").data("mass")).unwrap() > 3.0);
    }
}
