//! Error types for tracker-ops.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the service manager.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Bad or missing command-line arguments.
    #[error("{kind}")]
    Usage { kind: UsageErrorKind },

    /// Validation errors for configured values.
    #[error("Validation error: {kind}")]
    Validation { kind: ValidationErrorKind },

    /// Host command execution errors.
    #[error("{kind}")]
    Command { kind: CommandErrorKind },

    /// Unit-definition template errors.
    #[error("Template error: {message}")]
    Template { message: String },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Usage error kinds.
#[derive(Error, Debug)]
pub enum UsageErrorKind {
    #[error("Discord bot token is required for '{command}'")]
    MissingToken { command: String },

    #[error("Invalid Discord bot token: {message}")]
    InvalidToken { message: String },
}

/// Validation error kinds.
#[derive(Error, Debug)]
pub enum ValidationErrorKind {
    #[error("Invalid unit name '{unit}': {message}")]
    InvalidUnitName { unit: String, message: String },

    #[error("Path must be absolute: {path}")]
    RelativePath { path: PathBuf },
}

/// Command error kinds.
#[derive(Error, Debug)]
pub enum CommandErrorKind {
    #[error("Command execution failed: {message}")]
    ExecutionFailed { message: String },

    #[error("'{command}' exited with {}: {stderr}", describe_exit(.exit_code))]
    NonZeroExit {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Command timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("status {}", code),
        None => "no status (killed by signal)".to_string(),
    }
}

impl OpsError {
    /// Process exit status to report for this error.
    ///
    /// Usage errors exit with 1. A failing host command propagates its own
    /// exit status so callers see the same code the command produced.
    pub fn exit_code(&self) -> u8 {
        match self {
            OpsError::Command {
                kind: CommandErrorKind::NonZeroExit { exit_code, .. },
            } => match exit_code {
                Some(code) if (1..=255).contains(code) => *code as u8,
                _ => 1,
            },
            OpsError::Command {
                kind: CommandErrorKind::Timeout { .. },
            } => 124,
            _ => 1,
        }
    }

    /// Whether this error came from bad arguments rather than the host.
    pub fn is_usage(&self) -> bool {
        matches!(self, OpsError::Usage { .. })
    }
}

/// Result type alias for service manager operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn non_zero(code: Option<i32>) -> OpsError {
        OpsError::Command {
            kind: CommandErrorKind::NonZeroExit {
                command: "systemctl start discord-bot".to_string(),
                exit_code: code,
                stderr: "Access denied".to_string(),
            },
        }
    }

    #[test]
    fn test_exit_code_propagates_command_status() {
        assert_eq!(non_zero(Some(5)).exit_code(), 5);
        assert_eq!(non_zero(Some(255)).exit_code(), 255);
    }

    #[test]
    fn test_exit_code_out_of_range_falls_back_to_one() {
        assert_eq!(non_zero(None).exit_code(), 1);
        assert_eq!(non_zero(Some(0)).exit_code(), 1);
        assert_eq!(non_zero(Some(300)).exit_code(), 1);
        assert_eq!(non_zero(Some(-1)).exit_code(), 1);
    }

    #[test]
    fn test_usage_exit_code() {
        let err = OpsError::Usage {
            kind: UsageErrorKind::MissingToken {
                command: "setup-all".to_string(),
            },
        };
        assert!(err.is_usage());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_timeout_exit_code() {
        let err = OpsError::Command {
            kind: CommandErrorKind::Timeout { timeout_secs: 30 },
        };
        assert_eq!(err.exit_code(), 124);
    }

    #[test]
    fn test_non_zero_display() {
        let message = non_zero(Some(5)).to_string();
        assert!(message.contains("systemctl start discord-bot"));
        assert!(message.contains("status 5"));
        assert!(message.contains("Access denied"));
    }
}
