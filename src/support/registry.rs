//! Submodel registry.
//!
//! Several physical quantities have interchangeable implementations (a
//! fixed efficiency versus one derived from losses, an enforced caliber
//! versus an ensured one). The registry maps a service name and an
//! implementation key to a factory.
//!
//! Registration order never matters:
//!
//! - Registering an implementation key twice is an error, not an overwrite.
//! - Declaring the same default twice is a no-op. Declaring a different
//!   default for the same service is an error.
//! - A selection may name an implementation that is registered later. It is
//!   only checked when the service is resolved.
//!
//! ```
//! use std::num::NonZeroUsize;
//! use powertrain_models::models::rectifier;
//! use powertrain_models::support::registry::{SubmodelOptions, SubmodelRegistry};
//!
//! let mut registry = SubmodelRegistry::builtin().unwrap();
//! registry.select(rectifier::services::EFFICIENCY, "fixed");
//!
//! let options = SubmodelOptions::new("rectifier_1", NonZeroUsize::new(10).unwrap());
//! let component = registry.build(rectifier::services::EFFICIENCY, &options).unwrap();
//! assert!(!component.is_implicit());
//! ```

use std::{
    collections::{BTreeMap, btree_map::Entry},
    num::NonZeroUsize,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::component::Component;

/// Options every factory receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmodelOptions {
    /// Identifier of the component instance, used in variable paths.
    pub id: String,
    /// Number of evaluation points along the mission.
    pub number_of_points: NonZeroUsize,
}

impl SubmodelOptions {
    pub fn new(id: impl Into<String>, number_of_points: NonZeroUsize) -> Self {
        Self {
            id: id.into(),
            number_of_points,
        }
    }
}

/// Builds a component from its options.
pub type Factory = fn(&SubmodelOptions) -> Component;

/// User choices of implementation, keyed by service name.
///
/// This is the configuration surface of the registry and deserializes from
/// a plain map, e.g. `{"submodel.propulsion.performances.rectifier.efficiency": "fixed"}`.
pub type Selection = BTreeMap<String, String>;

/// Errors raised by the [`SubmodelRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown submodel service `{service}`")]
    UnknownService { service: String },

    #[error("service `{service}` has no implementation `{key}`")]
    UnknownImplementation { service: String, key: String },

    #[error("service `{service}` already has an implementation `{key}`")]
    DuplicateImplementation { service: String, key: String },

    #[error("service `{service}` already defaults to `{existing}`, cannot default to `{requested}`")]
    ConflictingDefault {
        service: String,
        existing: String,
        requested: String,
    },

    #[error("service `{service}` has neither a selection nor a default")]
    NoDefault { service: String },
}

#[derive(Debug, Clone, Default)]
struct Service {
    implementations: BTreeMap<&'static str, Factory>,
    default: Option<&'static str>,
}

/// A process-local registry of interchangeable submodels.
#[derive(Debug, Clone, Default)]
pub struct SubmodelRegistry {
    services: BTreeMap<&'static str, Service>,
    selection: Selection,
}

impl SubmodelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every submodel shipped with this crate.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in registrations conflict.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        crate::models::register_builtin(&mut registry)?;
        Ok(registry)
    }

    /// Registers an implementation of `service` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateImplementation`] if `key` is taken.
    pub fn register(
        &mut self,
        service: &'static str,
        key: &'static str,
        factory: Factory,
    ) -> Result<(), RegistryError> {
        let entry = self.services.entry(service).or_default();
        match entry.implementations.entry(key) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateImplementation {
                service: service.to_owned(),
                key: key.to_owned(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(factory);
                Ok(())
            }
        }
    }

    /// Declares the implementation used when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ConflictingDefault`] if a different default
    /// was already declared.
    pub fn declare_default(
        &mut self,
        service: &'static str,
        key: &'static str,
    ) -> Result<(), RegistryError> {
        let entry = self.services.entry(service).or_default();
        match entry.default {
            Some(existing) if existing != key => Err(RegistryError::ConflictingDefault {
                service: service.to_owned(),
                existing: existing.to_owned(),
                requested: key.to_owned(),
            }),
            Some(_) => Ok(()),
            None => {
                debug!(service, key, "declared submodel default");
                entry.default = Some(key);
                Ok(())
            }
        }
    }

    /// Selects the implementation to use for `service`, overriding the
    /// default.
    pub fn select(&mut self, service: impl Into<String>, key: impl Into<String>) {
        self.selection.insert(service.into(), key.into());
    }

    /// Applies every entry of a [`Selection`].
    pub fn apply(&mut self, selection: &Selection) {
        for (service, key) in selection {
            self.select(service.clone(), key.clone());
        }
    }

    /// Returns the implementation key that [`build`](Self::build) would use.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unknown, the selected key is not
    /// registered, or there is neither a selection nor a default.
    pub fn active(&self, service: &str) -> Result<&str, RegistryError> {
        let entry = self
            .services
            .get(service)
            .ok_or_else(|| RegistryError::UnknownService {
                service: service.to_owned(),
            })?;

        let key = match self.selection.get(service) {
            Some(selected) => selected.as_str(),
            None => entry.default.ok_or_else(|| RegistryError::NoDefault {
                service: service.to_owned(),
            })?,
        };

        if !entry.implementations.contains_key(key) {
            warn!(service, key, "selected submodel is not registered");
            return Err(RegistryError::UnknownImplementation {
                service: service.to_owned(),
                key: key.to_owned(),
            });
        }

        Ok(key)
    }

    /// Builds the active implementation of `service`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`active`](Self::active).
    pub fn build(
        &self,
        service: &str,
        options: &SubmodelOptions,
    ) -> Result<Component, RegistryError> {
        let key = self.active(service)?;
        let factory = self.services[service].implementations[key];
        debug!(service, key, id = %options.id, "building submodel");
        Ok(factory(options))
    }

    /// Registered service names.
    pub fn services(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.services.keys().copied()
    }

    /// Implementation keys registered for `service`.
    pub fn implementations(&self, service: &str) -> impl Iterator<Item = &'static str> + '_ {
        self.services
            .get(service)
            .into_iter()
            .flat_map(|entry| entry.implementations.keys().copied())
    }
}
