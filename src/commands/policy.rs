//! Per-command error policy and step sequencing.

use tracing::{debug, warn};

use crate::error::OpsResult;

use super::types::ExecutionContext;

/// What a failing step does to the rest of a command's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the first error; later steps do not run.
    FailFast,
    /// Log and report the error, then run the remaining steps.
    BestEffort,
}

/// A step that failed under [`ErrorPolicy::BestEffort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: String,
    pub error: String,
}

/// Runs a command's steps in order under one error policy.
#[derive(Debug)]
pub struct StepRunner {
    policy: ErrorPolicy,
    failures: Vec<StepFailure>,
}

impl StepRunner {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            failures: Vec::new(),
        }
    }

    /// Run one step.
    ///
    /// Under `FailFast` the step's error is returned as is. Under
    /// `BestEffort` it is printed as a warning line, collected, and `Ok` is
    /// returned; only a failure to write the report can still error.
    pub fn step<F>(&mut self, ctx: &mut ExecutionContext<'_>, label: &str, f: F) -> OpsResult<()>
    where
        F: FnOnce() -> OpsResult<()>,
    {
        debug!(run_id = %ctx.run_id, step = %label, "Running step");

        let err = match f() {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        match self.policy {
            ErrorPolicy::FailFast => {
                warn!(run_id = %ctx.run_id, step = %label, error = %err, "Step failed, aborting");
                Err(err)
            }
            ErrorPolicy::BestEffort => {
                warn!(run_id = %ctx.run_id, step = %label, error = %err, "Step failed, continuing");
                ctx.warning(format_args!("{} failed (ignored): {}", label, err))?;
                self.failures.push(StepFailure {
                    step: label.to_string(),
                    error: err.to_string(),
                });
                Ok(())
            }
        }
    }

    /// Failures swallowed so far.
    pub fn failures(&self) -> &[StepFailure] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CommandErrorKind, OpsError};
    use crate::host::MemoryHost;
    use crate::services::UnitRegistry;

    fn failing() -> OpsResult<()> {
        Err(OpsError::Command {
            kind: CommandErrorKind::ExecutionFailed {
                message: "boom".to_string(),
            },
        })
    }

    #[test]
    fn test_fail_fast_stops_at_first_error() {
        let host = MemoryHost::new();
        let units = UnitRegistry::default();
        let mut out = Vec::new();
        let mut ctx = ExecutionContext::new(&host, &units, &mut out);
        let mut ran = Vec::new();

        let mut runner = StepRunner::new(ErrorPolicy::FailFast);
        let result = (|| -> OpsResult<()> {
            runner.step(&mut ctx, "one", || {
                ran.push("one");
                Ok(())
            })?;
            runner.step(&mut ctx, "two", failing)?;
            runner.step(&mut ctx, "three", || {
                ran.push("three");
                Ok(())
            })?;
            Ok(())
        })();

        assert!(result.is_err());
        assert_eq!(ran, vec!["one"]);
        assert!(runner.failures().is_empty());
    }

    #[test]
    fn test_best_effort_continues() {
        let host = MemoryHost::new();
        let units = UnitRegistry::default();
        let mut out = Vec::new();
        let mut ran = Vec::new();
        {
            let mut ctx = ExecutionContext::new(&host, &units, &mut out);
            let mut runner = StepRunner::new(ErrorPolicy::BestEffort);

            runner.step(&mut ctx, "stop", failing).unwrap();
            runner
                .step(&mut ctx, "delete", || {
                    ran.push("delete");
                    Ok(())
                })
                .unwrap();

            assert_eq!(runner.failures().len(), 1);
            assert_eq!(runner.failures()[0].step, "stop");
        }

        assert_eq!(ran, vec!["delete"]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("stop failed (ignored)"));
    }
}
