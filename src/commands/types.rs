//! Command types: arguments and execution context.

use std::fmt::Display;
use std::io::Write;

use uuid::Uuid;

use crate::error::OpsResult;
use crate::host::ServiceHost;
use crate::services::UnitRegistry;

/// Prefix for success lines.
pub const SUCCESS_GLYPH: &str = "✅";
/// Prefix for failure lines.
pub const FAILURE_GLYPH: &str = "❌";
/// Prefix for ignored step failures.
pub const WARNING_GLYPH: &str = "⚠️";

/// Positional arguments following the command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    inner: Vec<String>,
}

impl CommandArgs {
    pub fn new(args: Vec<String>) -> Self {
        Self { inner: args }
    }

    /// Get a positional argument by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.inner.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CommandArgs {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Execution context for a command.
///
/// Carries the host capability, the managed units and the report sink for
/// one invocation.
pub struct ExecutionContext<'a> {
    /// Unique identifier for this invocation, attached to log events.
    pub run_id: Uuid,
    /// Host init-system interface.
    pub host: &'a dyn ServiceHost,
    /// The managed units.
    pub units: &'a UnitRegistry,
    out: &'a mut dyn Write,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(host: &'a dyn ServiceHost, units: &'a UnitRegistry, out: &'a mut dyn Write) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            host,
            units,
            out,
        }
    }

    /// Print one line of the human-readable report.
    pub fn say(&mut self, line: impl Display) -> OpsResult<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    pub fn success(&mut self, message: impl Display) -> OpsResult<()> {
        self.say(format_args!("{} {}", SUCCESS_GLYPH, message))
    }

    pub fn failure(&mut self, message: impl Display) -> OpsResult<()> {
        self.say(format_args!("{} {}", FAILURE_GLYPH, message))
    }

    pub fn warning(&mut self, message: impl Display) -> OpsResult<()> {
        self.say(format_args!("{}  {}", WARNING_GLYPH, message))
    }
}
