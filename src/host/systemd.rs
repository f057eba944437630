//! Systemd-backed service host.
//!
//! Unit control goes through `systemctl`; unit files are written directly
//! into the unit directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SystemdConfig;
use crate::error::{CommandErrorKind, OpsError, OpsResult};
use crate::executor::{SubprocessBuilder, SubprocessResult};

use super::state::ActiveState;
use super::traits::ServiceHost;

/// Permissions for installed unit files.
const UNIT_FILE_MODE: u32 = 0o644;

/// Whether the current process runs with an effective UID of root.
pub fn is_privileged() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Service host driving the local systemd instance.
#[derive(Debug, Clone)]
pub struct SystemdHost {
    systemctl: String,
    unit_dir: PathBuf,
    timeout: Option<Duration>,
}

impl SystemdHost {
    /// Create a host from the `[systemd]` configuration section.
    pub fn new(config: &SystemdConfig) -> Self {
        Self {
            systemctl: config.systemctl.clone(),
            unit_dir: config.unit_dir.clone(),
            timeout: config.timeout(),
        }
    }

    /// Path a unit's definition is installed at.
    pub fn unit_path(&self, unit: &str) -> PathBuf {
        self.unit_dir.join(format!("{}.service", unit))
    }

    /// Run systemctl, failing on a non-zero exit.
    fn systemctl(&self, args: &[&str]) -> OpsResult<SubprocessResult> {
        SubprocessBuilder::new(&self.systemctl)
            .args(args.iter().copied())
            .timeout(self.timeout)
            .run_checked()
    }

    fn io_failure(action: &str, path: &Path, e: std::io::Error) -> OpsError {
        OpsError::Command {
            kind: CommandErrorKind::ExecutionFailed {
                message: format!("Failed to {} '{}': {}", action, path.display(), e),
            },
        }
    }
}

impl ServiceHost for SystemdHost {
    fn make_executable(&self, path: &Path) -> OpsResult<()> {
        let metadata = fs::metadata(path).map_err(|e| Self::io_failure("stat", path, e))?;
        let mode = metadata.permissions().mode() | 0o111;

        debug!(path = %path.display(), mode = %format!("{:o}", mode), "Marking program executable");

        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .map_err(|e| Self::io_failure("set permissions on", path, e))
    }

    fn install_unit(&self, unit: &str, contents: &str) -> OpsResult<PathBuf> {
        let path = self.unit_path(unit);

        // Write to a temporary file first so systemd never reads a partial unit.
        // Random suffix and create_new() keep a pre-created symlink from being followed.
        let temp_path = self
            .unit_dir
            .join(format!(".{}.service.{}.tmp", unit, Uuid::new_v4().simple()));

        let write = || -> std::io::Result<()> {
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&temp_path)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::set_permissions(&temp_path, fs::Permissions::from_mode(UNIT_FILE_MODE))?;
            fs::rename(&temp_path, &path)
        };

        if let Err(e) = write() {
            let _ = fs::remove_file(&temp_path);
            return Err(Self::io_failure("install unit file", &path, e));
        }

        info!(unit = %unit, path = %path.display(), bytes = contents.len(), "Unit file installed");
        Ok(path)
    }

    fn remove_unit(&self, unit: &str) -> OpsResult<()> {
        let path = self.unit_path(unit);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(unit = %unit, path = %path.display(), "Unit file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(unit = %unit, path = %path.display(), "Unit file already absent");
                Ok(())
            }
            Err(e) => Err(Self::io_failure("remove unit file", &path, e)),
        }
    }

    fn reload(&self) -> OpsResult<()> {
        self.systemctl(&["daemon-reload"])?;
        Ok(())
    }

    fn enable(&self, unit: &str) -> OpsResult<()> {
        self.systemctl(&["enable", unit])?;
        Ok(())
    }

    fn disable(&self, unit: &str) -> OpsResult<()> {
        self.systemctl(&["disable", unit])?;
        Ok(())
    }

    fn start(&self, unit: &str) -> OpsResult<()> {
        self.systemctl(&["start", unit])?;
        Ok(())
    }

    fn stop(&self, unit: &str) -> OpsResult<()> {
        self.systemctl(&["stop", unit])?;
        Ok(())
    }

    fn active_state(&self, unit: &str) -> OpsResult<ActiveState> {
        // is-active exits non-zero for anything but "active"; only the word matters.
        let result = SubprocessBuilder::new(&self.systemctl)
            .args(["is-active", unit])
            .timeout(self.timeout)
            .run()?;

        let state = ActiveState::parse(&result.stdout);
        debug!(unit = %unit, state = %state, exit_code = ?result.exit_code, "Queried unit state");
        Ok(state)
    }
}
