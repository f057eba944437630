//! Configuration module for tracker-ops.
//!
//! Handles loading and validating configuration from an optional TOML file.

mod settings;

pub use settings::*;
