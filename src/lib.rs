//! # Powertrain Models
//!
//! Analytical component models for sizing and evaluating hybrid-electric
//! aircraft powertrains, each paired with its exact analytic partial
//! derivatives.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain components (rectifier, ICE, cryogenic hydrogen tank,
//!   inductor, capacitor, heat sink).
//! - [`support`]: The component contract and the utilities shared by models
//!   (variable naming, units, mission adaptors, clipping, the submodel
//!   registry and the partials checker).
//!
//! ## Component contract
//!
//! Every component declares an [`Interface`](support::component::Interface)
//! once, then evaluates any number of times. Components are either
//! [`ExplicitComponent`](support::component::ExplicitComponent)s, which map
//! inputs to outputs, or [`ImplicitComponent`](support::component::ImplicitComponent)s,
//! which expose residuals an external solver drives to zero.
//!
//! Wiring components into a graph, solving implicit couplings and
//! optimizing are the job of the external MDO runtime.
//! Components connect by variable path only, so paths are built through
//! [`support::naming`] rather than by hand.

pub mod models;
pub mod support;
