//! Variable path construction.
//!
//! The external runtime connects components purely by matching variable
//! paths, so a renamed segment breaks wiring without any type error.
//! All powertrain paths are therefore built here.
//!
//! A path is colon-delimited: a category prefix, the fixed
//! `propulsion:he_power_train` segment, the subsystem, the component
//! identifier and the attribute.
//!
//! ```
//! use powertrain_models::support::naming::{Category, variable_path};
//!
//! assert_eq!(
//!     variable_path(Category::Data, "rectifier", "rectifier_1", "current_ac_caliber"),
//!     "data:propulsion:he_power_train:rectifier:rectifier_1:current_ac_caliber",
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category prefix of a variable path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Design data: sizing values, reference constants, calibers.
    Data,
    /// Modelling settings that are not design variables.
    Settings,
    /// Constraint values handed to the optimizer.
    Constraints,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Data => "data",
            Category::Settings => "settings",
            Category::Constraints => "constraints",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the path of a powertrain component variable.
///
/// `attribute` may itself contain colons (e.g. `"igbt:resistance"`).
#[must_use]
pub fn variable_path(
    category: Category,
    subsystem: &str,
    identifier: &str,
    attribute: &str,
) -> String {
    format!("{category}:propulsion:he_power_train:{subsystem}:{identifier}:{attribute}")
}

/// Paths of one component instance.
///
/// Holds the subsystem and identifier so call sites only name attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPaths {
    subsystem: &'static str,
    identifier: String,
}

impl ComponentPaths {
    #[must_use]
    pub fn new(subsystem: &'static str, identifier: impl Into<String>) -> Self {
        Self {
            subsystem,
            identifier: identifier.into(),
        }
    }

    #[must_use]
    pub fn subsystem(&self) -> &'static str {
        self.subsystem
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// `data:propulsion:he_power_train:<subsystem>:<id>:<attribute>`
    #[must_use]
    pub fn data(&self, attribute: &str) -> String {
        variable_path(Category::Data, self.subsystem, &self.identifier, attribute)
    }

    /// `settings:propulsion:he_power_train:<subsystem>:<id>:<attribute>`
    #[must_use]
    pub fn settings(&self, attribute: &str) -> String {
        variable_path(
            Category::Settings,
            self.subsystem,
            &self.identifier,
            attribute,
        )
    }

    /// `constraints:propulsion:he_power_train:<subsystem>:<id>:<attribute>`
    #[must_use]
    pub fn constraints(&self, attribute: &str) -> String {
        variable_path(
            Category::Constraints,
            self.subsystem,
            &self.identifier,
            attribute,
        )
    }
}
