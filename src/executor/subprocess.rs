//! Blocking subprocess execution.
//!
//! Provides utilities for running host commands with:
//! - No shell interpretation (direct exec)
//! - An optional timeout (none by default: block until the command returns)
//! - Captured stdout/stderr

use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{CommandErrorKind, OpsError};

/// Result of a subprocess execution.
#[derive(Debug, Clone)]
pub struct SubprocessResult {
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
    /// The exit code, if available.
    pub exit_code: Option<i32>,
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
}

impl SubprocessResult {
    /// Create a SubprocessResult from a std::process::Output.
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Builder for subprocess execution.
pub struct SubprocessBuilder {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl SubprocessBuilder {
    /// Create a new subprocess builder.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Add arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args.extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Set the timeout for the command. `None` waits indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The command line as it would be typed, for messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command and wait for completion.
    ///
    /// A non-zero exit is reported in the result, not as an error. If a
    /// timeout is set and exceeded, the process is killed and a timeout
    /// error is returned.
    pub fn run(self) -> Result<SubprocessResult, OpsError> {
        debug!(
            program = %self.program,
            args = ?self.args,
            timeout_secs = self.timeout.map(|t| t.as_secs()),
            "Executing subprocess"
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let start = Instant::now();

        let Some(timeout) = self.timeout else {
            let output = cmd.output().map_err(|e| OpsError::Command {
                kind: CommandErrorKind::ExecutionFailed {
                    message: format!("Failed to execute {}: {}", self.program, e),
                },
            })?;
            let result = SubprocessResult::from_output(output);
            debug!(
                success = result.success,
                exit_code = ?result.exit_code,
                duration_ms = start.elapsed().as_millis(),
                "Subprocess completed"
            );
            return Ok(result);
        };

        // Spawn the process
        let mut child = cmd.spawn().map_err(|e| OpsError::Command {
            kind: CommandErrorKind::ExecutionFailed {
                message: format!("Failed to spawn {}: {}", self.program, e),
            },
        })?;

        // Poll for completion with timeout enforcement
        let poll_interval = Duration::from_millis(100);

        loop {
            match child.try_wait() {
                Ok(Some(_status)) => {
                    let output = child.wait_with_output().map_err(|e| OpsError::Command {
                        kind: CommandErrorKind::ExecutionFailed {
                            message: format!("Failed to get output from {}: {}", self.program, e),
                        },
                    })?;
                    let result = SubprocessResult::from_output(output);
                    debug!(
                        success = result.success,
                        exit_code = ?result.exit_code,
                        duration_ms = start.elapsed().as_millis(),
                        "Subprocess completed"
                    );
                    return Ok(result);
                }
                Ok(None) => {
                    if start.elapsed() > timeout {
                        warn!(
                            program = %self.program,
                            timeout_secs = timeout.as_secs(),
                            "Process timed out, killing"
                        );
                        if let Err(e) = child.kill() {
                            warn!(error = %e, "Failed to kill timed-out process");
                        }
                        // Reap the zombie process
                        let _ = child.wait();
                        return Err(OpsError::Command {
                            kind: CommandErrorKind::Timeout {
                                timeout_secs: timeout.as_secs(),
                            },
                        });
                    }
                    std::thread::sleep(poll_interval);
                }
                Err(e) => {
                    return Err(OpsError::Command {
                        kind: CommandErrorKind::ExecutionFailed {
                            message: format!("Failed to check process status: {}", e),
                        },
                    });
                }
            }
        }
    }

    /// Execute the command and turn a non-zero exit into an error carrying
    /// the command's exit code and stderr.
    pub fn run_checked(self) -> Result<SubprocessResult, OpsError> {
        let command = self.display();
        let result = self.run()?;

        if !result.success {
            warn!(
                command = %command,
                exit_code = ?result.exit_code,
                stderr = %result.stderr.trim(),
                "Subprocess failed"
            );
            // The command's own diagnostic, whole; stdout when stderr is silent
            let diagnostic = match result.stderr.trim() {
                "" => result.stdout.trim_end(),
                _ => result.stderr.trim_end(),
            };
            return Err(OpsError::Command {
                kind: CommandErrorKind::NonZeroExit {
                    command,
                    exit_code: result.exit_code,
                    stderr: diagnostic.to_string(),
                },
            });
        }

        Ok(result)
    }
}
