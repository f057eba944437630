//! Managed unit definitions.
//!
//! Describes the two units this tool manages and the registry holding them.

mod registry;
mod unit;

pub use registry::UnitRegistry;
pub use unit::{ManagedUnit, UnitRole};
