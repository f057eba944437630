//! Unit active state as reported by `systemctl is-active`.

use std::fmt;

/// Live state of a managed unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveState {
    Active,
    Reloading,
    Inactive,
    Failed,
    Activating,
    Deactivating,
    /// Anything else systemd reports, or a query that could not be made.
    Unknown(String),
}

impl ActiveState {
    /// Parse the first line of `systemctl is-active` output.
    pub fn parse(output: &str) -> Self {
        match output.lines().next().map(str::trim).unwrap_or("") {
            "active" => ActiveState::Active,
            "reloading" => ActiveState::Reloading,
            "inactive" => ActiveState::Inactive,
            "failed" => ActiveState::Failed,
            "activating" => ActiveState::Activating,
            "deactivating" => ActiveState::Deactivating,
            "" => ActiveState::Unknown("unknown".to_string()),
            other => ActiveState::Unknown(other.to_string()),
        }
    }

    /// Whether the unit's process is up.
    pub fn is_running(&self) -> bool {
        matches!(self, ActiveState::Active | ActiveState::Reloading)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActiveState::Active => "active",
            ActiveState::Reloading => "reloading",
            ActiveState::Inactive => "inactive",
            ActiveState::Failed => "failed",
            ActiveState::Activating => "activating",
            ActiveState::Deactivating => "deactivating",
            ActiveState::Unknown(s) => s,
        }
    }
}

impl fmt::Display for ActiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
