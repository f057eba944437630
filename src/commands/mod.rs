//! Command handlers module.
//!
//! Contains the command registry and all command implementations.
//!
//! ## Adding a New Command
//!
//! 1. Create a new file in the appropriate subdirectory (e.g., `service/`)
//! 2. Implement the `Command` trait
//! 3. Register the command in `CommandRegistry::new()`

mod policy;
mod registry;
mod traits;
mod types;

pub mod service;
pub mod system;

pub use policy::{ErrorPolicy, StepFailure, StepRunner};
pub use registry::CommandRegistry;
pub use traits::Command;
pub use types::{CommandArgs, ExecutionContext, FAILURE_GLYPH, SUCCESS_GLYPH, WARNING_GLYPH};
