use crate::support::{
    constraints::{CaliberQuantity, EnforceCaliber, EnsureCaliber},
    naming::ComponentPaths,
};

use super::{SUBSYSTEM, services};

/// Sized quantities, each with the registry service that picks its strategy.
pub const CALIBERS: [(&str, CaliberQuantity); 6] = [
    (
        services::CONSTRAINTS_CURRENT_AC,
        CaliberQuantity::new("current_ac", "A"),
    ),
    (
        services::CONSTRAINTS_CURRENT_DC,
        CaliberQuantity::new("current_dc", "A"),
    ),
    (
        services::CONSTRAINTS_VOLTAGE_AC,
        CaliberQuantity::new("voltage_ac", "V"),
    ),
    (
        services::CONSTRAINTS_VOLTAGE_DC,
        CaliberQuantity::new("voltage_dc", "V"),
    ),
    (
        services::CONSTRAINTS_LOSSES,
        CaliberQuantity::new("losses", "W"),
    ),
    (
        services::CONSTRAINTS_JUNCTION_TEMPERATURE,
        CaliberQuantity::new("junction_temperature", "degK"),
    ),
];

fn quantities() -> Vec<CaliberQuantity> {
    CALIBERS.iter().map(|(_, quantity)| *quantity).collect()
}

/// Enforces every rectifier caliber.
#[must_use]
pub fn enforce(id: &str) -> EnforceCaliber {
    EnforceCaliber::new(ComponentPaths::new(SUBSYSTEM, id), quantities())
}

/// Ensures every rectifier caliber.
#[must_use]
pub fn ensure(id: &str) -> EnsureCaliber {
    EnsureCaliber::new(ComponentPaths::new(SUBSYSTEM, id), quantities())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        models::test_support::{assert_partials, evaluate},
        support::component::{ExplicitComponent, Variables},
    };

    #[test]
    fn all_calibers_at_once() {
        let paths = ComponentPaths::new(SUBSYSTEM, "rectifier_1");
        let mut inputs = Variables::new();
        for (i, (_, quantity)) in CALIBERS.iter().enumerate() {
            inputs.set(paths.data(&format!("{}_max", quantity.stem)), [100.0 + i as f64]);
            inputs.set(paths.data(&format!("{}_caliber", quantity.stem)), [110.0]);
        }

        let enforced = evaluate(&enforce("rectifier_1"), &inputs);
        assert_eq!(enforced.len(), CALIBERS.len());
        assert_eq!(
            enforced.scalar(&paths.data("losses_caliber")).unwrap(),
            104.0
        );

        let ensure = ensure("rectifier_1");
        let margins = evaluate(&ensure, &inputs);
        assert_eq!(
            margins
                .scalar(&paths.constraints("junction_temperature_caliber"))
                .unwrap(),
            -5.0
        );
        assert!(ensure.interface().validate().is_ok());
        assert_partials(&ensure, &inputs);
    }
}
