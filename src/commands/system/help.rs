//! Help command.
//!
//! The fallback for a missing or unrecognized command name. Always succeeds.

use crate::commands::traits::Command;
use crate::commands::types::{CommandArgs, ExecutionContext};
use crate::error::OpsResult;

/// Name the binary is invoked as in help and usage text.
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

/// Print the command list and an example invocation.
pub struct HelpCommand {
    entries: Vec<(String, &'static str)>,
}

impl HelpCommand {
    /// Build the help text from the registered commands, in order.
    pub fn new(commands: &[Box<dyn Command>]) -> Self {
        let entries = commands
            .iter()
            .map(|c| (synopsis(c.as_ref()), c.summary()))
            .collect();
        Self { entries }
    }

    /// The full help text.
    pub fn text(&self) -> String {
        let width = self
            .entries
            .iter()
            .map(|(s, _)| s.len())
            .max()
            .unwrap_or(0);

        let mut text = String::new();
        text.push_str("Tournament tracker service manager\n\n");
        text.push_str(&format!("Usage: {} <command> [arguments]\n\n", PROGRAM_NAME));
        text.push_str("Commands:\n");
        for (synopsis, summary) in &self.entries {
            text.push_str(&format!("  {:<width$}  {}\n", synopsis, summary, width = width));
        }
        text.push_str("\nExample:\n");
        text.push_str(&format!(
            "  sudo {} setup-all YOUR_DISCORD_BOT_TOKEN\n",
            PROGRAM_NAME
        ));
        text
    }
}

/// `name <args>` as shown in help and usage lines.
pub fn synopsis(command: &dyn Command) -> String {
    match command.usage() {
        "" => command.name().to_string(),
        usage => format!("{} {}", command.name(), usage),
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn summary(&self) -> &'static str {
        "Show this help"
    }

    fn mutates_host(&self) -> bool {
        false
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &CommandArgs) -> OpsResult<()> {
        ctx.say(self.text().trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::service::{SetupDiscordCommand, StatusCommand};

    #[test]
    fn test_help_lists_commands() {
        let commands: Vec<Box<dyn Command>> =
            vec![Box::new(SetupDiscordCommand), Box::new(StatusCommand)];
        let help = HelpCommand::new(&commands);
        let text = help.text();

        assert!(text.contains("setup-discord <TOKEN>"));
        assert!(text.contains("status"));
        assert!(text.contains("Show whether each service is running"));
        assert!(text.contains("Example:"));
    }

    #[test]
    fn test_synopsis() {
        assert_eq!(synopsis(&SetupDiscordCommand), "setup-discord <TOKEN>");
        assert_eq!(synopsis(&StatusCommand), "status");
    }
}
