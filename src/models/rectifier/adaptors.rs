//! Design values spread over the mission.

use std::num::NonZeroUsize;

use crate::support::{mission::MissionAdaptor, naming::ComponentPaths};

use super::{
    DC_VOLTAGE_TARGET, Device, EFFICIENCY, HEAT_SINK_TEMPERATURE, SUBSYSTEM, SWITCHING_FREQUENCY,
};

fn paths(id: &str) -> ComponentPaths {
    ComponentPaths::new(SUBSYSTEM, id)
}

#[must_use]
pub fn voltage_target(id: &str, number_of_points: NonZeroUsize) -> MissionAdaptor {
    MissionAdaptor::new(
        paths(id).data("voltage_out_target_mission"),
        DC_VOLTAGE_TARGET,
        "V",
        number_of_points,
    )
    .with_description("target DC output voltage")
}

#[must_use]
pub fn switching_frequency(id: &str, number_of_points: NonZeroUsize) -> MissionAdaptor {
    MissionAdaptor::new(
        paths(id).data("switching_frequency_mission"),
        SWITCHING_FREQUENCY,
        "Hz",
        number_of_points,
    )
}

#[must_use]
pub fn heat_sink_temperature(id: &str, number_of_points: NonZeroUsize) -> MissionAdaptor {
    MissionAdaptor::new(
        paths(id).data("heat_sink_temperature_mission"),
        HEAT_SINK_TEMPERATURE,
        "degK",
        number_of_points,
    )
}

/// Both device junction temperatures set to one fixed value.
#[must_use]
pub fn junction_temperature_fixed(id: &str, number_of_points: NonZeroUsize) -> MissionAdaptor {
    let [first, rest @ ..] = Device::ALL;
    rest.iter().fold(
        MissionAdaptor::new(
            paths(id).data("junction_temperature_mission"),
            first.temperature(),
            "degK",
            number_of_points,
        ),
        |adaptor, device| adaptor.and_output(device.temperature()),
    )
}

#[must_use]
pub fn efficiency_fixed(id: &str, number_of_points: NonZeroUsize) -> MissionAdaptor {
    MissionAdaptor::new(
        paths(id).data("efficiency"),
        EFFICIENCY,
        "unitless",
        number_of_points,
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
    fn fixed_junction_temperature_feeds_both_devices() {
        let adaptor = junction_temperature_fixed("rectifier_1", points(3));
        let inputs = Variables::new().with(paths("rectifier_1").data("junction_temperature_mission"), [373.15]);

        let outputs = evaluate(&adaptor, &inputs);
        for device in Device::ALL {
            assert_eq!(outputs.get(device.temperature()).unwrap(), &[373.15; 3]);
        }
        assert_partials(&adaptor, &inputs);
    }

    #[test]
    fn interfaces_are_valid() {
        let n = points(4);
        for adaptor in [
            voltage_target("r", n),
            switching_frequency("r", n),
            heat_sink_temperature("r", n),
            efficiency_fixed("r", n),
        ] {
            assert!(adaptor.interface().validate().is_ok());
        }
    }
}
