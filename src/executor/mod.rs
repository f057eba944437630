//! Command executor module.
//!
//! Handles direct subprocess spawning with an optional timeout.

mod subprocess;

pub use subprocess::{SubprocessBuilder, SubprocessResult};
