//! tracker-ops library
//!
//! Installs, starts, stops and inspects the two systemd units of the
//! tournament tracker (the web editor and the Discord bot). All host access
//! goes through [`host::ServiceHost`], so command sequencing can run
//! against [`host::MemoryHost`] in tests.

pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod host;
pub mod services;
pub mod templates;
pub mod validation;
