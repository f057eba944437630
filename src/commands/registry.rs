//! Command registry for dispatching invocations to handlers.

use tracing::{debug, info};

use crate::error::OpsError;

use super::service::{
    RemoveAllCommand, SetupAllCommand, SetupDiscordCommand, SetupWebCommand, StartAllCommand,
    StatusCommand, StopAllCommand,
};
use super::system::{synopsis, HelpCommand, PROGRAM_NAME};
use super::traits::Command;
use super::types::{CommandArgs, ExecutionContext};

/// Registry of all available commands.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    help: HelpCommand,
}

impl CommandRegistry {
    /// Create a new command registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Box<dyn Command>> = vec![
            Box::new(SetupWebCommand),
            Box::new(SetupDiscordCommand),
            Box::new(SetupAllCommand),
            Box::new(StatusCommand),
            Box::new(StartAllCommand),
            Box::new(StopAllCommand),
            Box::new(RemoveAllCommand),
        ];
        let help = HelpCommand::new(&commands);

        debug!(count = commands.len(), "Command registry initialized");

        Self { commands, help }
    }

    /// Get a command by exact name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    /// Pick the handler for an argument vector (without the program name).
    ///
    /// The first argument must match a command name exactly; anything else,
    /// including no argument at all, selects help.
    pub fn resolve<'r>(&'r self, args: &[String]) -> (&'r dyn Command, CommandArgs) {
        let help: &dyn Command = &self.help;
        match args.split_first() {
            Some((name, rest)) => match self.get(name) {
                Some(command) => (command, rest.iter().cloned().collect()),
                None => (help, CommandArgs::default()),
            },
            None => (help, CommandArgs::default()),
        }
    }

    /// Whether `args` falls through to help.
    ///
    /// Help reads no settings and touches no host, so it can be answered
    /// before configuration is loaded.
    pub fn selects_help(&self, args: &[String]) -> bool {
        args.first().map_or(true, |name| self.get(name).is_none())
    }

    /// Validate and execute the handler selected by `args`.
    pub fn dispatch(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> Result<(), OpsError> {
        let (command, command_args) = self.resolve(args);

        info!(
            run_id = %ctx.run_id,
            command = command.name(),
            policy = ?command.error_policy(),
            "Dispatching command"
        );

        command.validate(&command_args)?;
        command.execute(ctx, &command_args)
    }

    /// Dispatch and report the outcome, returning the process exit status.
    ///
    /// Errors are printed as a failure line; usage errors are followed by the
    /// command's usage line.
    pub fn run(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> u8 {
        let err = match self.dispatch(ctx, args) {
            Ok(()) => return 0,
            Err(e) => e,
        };

        let (command, _) = self.resolve(args);
        let code = err.exit_code();

        info!(
            run_id = %ctx.run_id,
            command = command.name(),
            exit_code = code,
            error = %err,
            "Command failed"
        );

        // The exit status is what matters once the report itself cannot be written.
        let _ = ctx.failure(format_args!("Error: {}", err));
        if err.is_usage() {
            let _ = ctx.say(format_args!(
                "Usage: {} {}",
                PROGRAM_NAME,
                synopsis(command)
            ));
        }

        code
    }

    /// The help text printed for unrecognized invocations.
    pub fn help_text(&self) -> String {
        self.help.text()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
