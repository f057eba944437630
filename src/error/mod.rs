//! Error types for tracker-ops.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
