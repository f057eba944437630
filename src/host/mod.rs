//! Host init-system access.
//!
//! Every privileged side effect goes through the [`ServiceHost`] capability so
//! command sequencing can be exercised without a real init system.
//!
//! - [`SystemdHost`] - drives `systemctl` and writes unit files to disk
//! - [`MemoryHost`] - keeps unit state in memory and records every call

mod memory;
mod state;
mod systemd;
mod traits;

pub use memory::{HostCall, HostOp, MemoryHost, UnitState};
pub use state::ActiveState;
pub use systemd::{is_privileged, SystemdHost};
pub use traits::ServiceHost;
