//! Service host capability trait.

use std::path::{Path, PathBuf};

use crate::error::OpsResult;

use super::state::ActiveState;

/// Control interface of the host init system.
///
/// Each method is one blocking call. Implementations report failures as
/// errors and never retry; the caller's error policy decides whether a
/// failure aborts the sequence.
///
/// Unit names are given without the `.service` suffix.
pub trait ServiceHost {
    /// Add the execute bits to a program file (`chmod +x`).
    fn make_executable(&self, path: &Path) -> OpsResult<()>;

    /// Install a unit definition, replacing any existing one.
    ///
    /// Returns the path of the installed unit file.
    fn install_unit(&self, unit: &str, contents: &str) -> OpsResult<PathBuf>;

    /// Delete an installed unit definition. A missing file is not an error.
    fn remove_unit(&self, unit: &str) -> OpsResult<()>;

    /// Reload the init system's unit configuration.
    fn reload(&self) -> OpsResult<()>;

    /// Enable a unit at boot.
    fn enable(&self, unit: &str) -> OpsResult<()>;

    /// Disable a unit at boot.
    fn disable(&self, unit: &str) -> OpsResult<()>;

    /// Start a unit.
    fn start(&self, unit: &str) -> OpsResult<()>;

    /// Stop a unit.
    fn stop(&self, unit: &str) -> OpsResult<()>;

    /// Query the live active state of a unit.
    ///
    /// A unit the host does not know about is `Inactive`, not an error.
    fn active_state(&self, unit: &str) -> OpsResult<ActiveState>;
}
