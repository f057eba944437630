//! Unit-definition templates.
//!
//! Reads a unit template and applies the placeholder substitution.

mod substitute;

pub use substitute::{render_unit, substitute_placeholder};
