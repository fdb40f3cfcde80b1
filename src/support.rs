//! Supporting utilities used by models.
//!
//! These modules are part of the public API because an assembler needs them
//! to drive components, but their APIs are not stable.

pub mod atmosphere;
pub mod check;
pub mod clip;
pub mod component;
pub mod constraints;
pub mod mission;
pub mod naming;
pub mod registry;
pub mod units;
