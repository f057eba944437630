//! Command trait definition.

use crate::error::OpsResult;

use super::policy::ErrorPolicy;
use super::types::{CommandArgs, ExecutionContext};

/// Core trait for all CLI commands.
///
/// # Example
///
/// ```ignore
/// pub struct MyCommand;
///
/// impl Command for MyCommand {
///     fn name(&self) -> &'static str {
///         "my-command"
///     }
///
///     fn summary(&self) -> &'static str {
///         "Do the thing"
///     }
///
///     fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &CommandArgs) -> OpsResult<()> {
///         ctx.success("Done")
///     }
/// }
/// ```
pub trait Command {
    /// Exact name matched against the first argument (e.g. "setup-web").
    fn name(&self) -> &'static str;

    /// Argument synopsis shown after the name in help and usage lines.
    fn usage(&self) -> &'static str {
        ""
    }

    /// One-line description for the help text.
    fn summary(&self) -> &'static str;

    /// Check the arguments before any side effect happens.
    fn validate(&self, _args: &CommandArgs) -> OpsResult<()> {
        Ok(())
    }

    /// Run the command's step sequence.
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &CommandArgs) -> OpsResult<()>;

    /// How a failing step affects the rest of the sequence.
    fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::FailFast
    }

    /// Whether the command changes host state (and so needs privilege).
    fn mutates_host(&self) -> bool {
        true
    }
}
