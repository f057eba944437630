//! In-memory service host.
//!
//! Models the slice of init-system state the commands touch and records
//! every call in order. Failures can be injected per operation and unit to
//! exercise the error policies.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CommandErrorKind, OpsError, OpsResult};

use super::state::ActiveState;
use super::traits::ServiceHost;

/// A host operation, used to match recorded calls and injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOp {
    MakeExecutable,
    Install,
    Remove,
    Reload,
    Enable,
    Disable,
    Start,
    Stop,
    Query,
}

/// One recorded host call. `target` is the unit name, the program path for
/// `MakeExecutable`, and empty for `Reload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCall {
    pub op: HostOp,
    pub target: String,
}

/// State of one installed unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitState {
    pub contents: String,
    pub enabled: bool,
    pub running: bool,
}

#[derive(Debug, Default)]
struct Inner {
    units: BTreeMap<String, UnitState>,
    executables: BTreeSet<PathBuf>,
    calls: Vec<HostCall>,
    failures: HashMap<(HostOp, String), i32>,
    reloads: usize,
}

/// Service host backed by in-memory state.
#[derive(Debug, Default)]
pub struct MemoryHost {
    inner: RefCell<Inner>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `op` on `target` fail with the given exit code.
    ///
    /// Use an empty target for `Reload`.
    pub fn fail_on(&self, op: HostOp, target: &str, exit_code: i32) {
        self.inner
            .borrow_mut()
            .failures
            .insert((op, target.to_string()), exit_code);
    }

    /// Seed an installed unit.
    pub fn insert_unit(&self, unit: &str, state: UnitState) {
        self.inner.borrow_mut().units.insert(unit.to_string(), state);
    }

    /// Current state of a unit, if installed.
    pub fn unit(&self, unit: &str) -> Option<UnitState> {
        self.inner.borrow().units.get(unit).cloned()
    }

    /// Every call made so far, in order (including failed ones).
    pub fn calls(&self) -> Vec<HostCall> {
        self.inner.borrow().calls.clone()
    }

    /// Operations of every call made so far, in order.
    pub fn ops(&self) -> Vec<HostOp> {
        self.inner.borrow().calls.iter().map(|c| c.op).collect()
    }

    /// Whether a program was marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.inner.borrow().executables.contains(path)
    }

    /// Number of successful configuration reloads.
    pub fn reload_count(&self) -> usize {
        self.inner.borrow().reloads
    }

    /// Record a call and return the injected failure for it, if any.
    fn record(&self, op: HostOp, target: &str) -> OpsResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(HostCall {
            op,
            target: target.to_string(),
        });
        debug!(op = ?op, target = %target, "Memory host call");

        match inner.failures.get(&(op, target.to_string())) {
            Some(&exit_code) => Err(OpsError::Command {
                kind: CommandErrorKind::NonZeroExit {
                    command: format!("{:?} {}", op, target).trim().to_string(),
                    exit_code: Some(exit_code),
                    stderr: "injected failure".to_string(),
                },
            }),
            None => Ok(()),
        }
    }

    /// Apply a change to an installed unit; unknown units fail like systemd does.
    fn with_unit(&self, op: HostOp, unit: &str, f: impl FnOnce(&mut UnitState)) -> OpsResult<()> {
        self.record(op, unit)?;
        let mut inner = self.inner.borrow_mut();
        match inner.units.get_mut(unit) {
            Some(state) => {
                f(state);
                Ok(())
            }
            None => Err(OpsError::Command {
                kind: CommandErrorKind::NonZeroExit {
                    command: format!("{:?} {}", op, unit),
                    exit_code: Some(5),
                    stderr: format!("Unit {}.service not loaded.", unit),
                },
            }),
        }
    }
}

impl ServiceHost for MemoryHost {
    fn make_executable(&self, path: &Path) -> OpsResult<()> {
        self.record(HostOp::MakeExecutable, &path.to_string_lossy())?;
        self.inner
            .borrow_mut()
            .executables
            .insert(path.to_path_buf());
        Ok(())
    }

    fn install_unit(&self, unit: &str, contents: &str) -> OpsResult<PathBuf> {
        self.record(HostOp::Install, unit)?;
        let mut inner = self.inner.borrow_mut();
        let state = inner.units.entry(unit.to_string()).or_default();
        state.contents = contents.to_string();
        Ok(PathBuf::from(format!("{}.service", unit)))
    }

    fn remove_unit(&self, unit: &str) -> OpsResult<()> {
        self.record(HostOp::Remove, unit)?;
        self.inner.borrow_mut().units.remove(unit);
        Ok(())
    }

    fn reload(&self) -> OpsResult<()> {
        self.record(HostOp::Reload, "")?;
        self.inner.borrow_mut().reloads += 1;
        Ok(())
    }

    fn enable(&self, unit: &str) -> OpsResult<()> {
        self.with_unit(HostOp::Enable, unit, |s| s.enabled = true)
    }

    fn disable(&self, unit: &str) -> OpsResult<()> {
        self.with_unit(HostOp::Disable, unit, |s| s.enabled = false)
    }

    fn start(&self, unit: &str) -> OpsResult<()> {
        self.with_unit(HostOp::Start, unit, |s| s.running = true)
    }

    fn stop(&self, unit: &str) -> OpsResult<()> {
        self.with_unit(HostOp::Stop, unit, |s| s.running = false)
    }

    fn active_state(&self, unit: &str) -> OpsResult<ActiveState> {
        self.record(HostOp::Query, unit)?;
        let running = self
            .inner
            .borrow()
            .units
            .get(unit)
            .map(|s| s.running)
            .unwrap_or(false);
        Ok(if running {
            ActiveState::Active
        } else {
            ActiveState::Inactive
        })
    }
}
