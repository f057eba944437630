//! Setup commands.
//!
//! Install a unit from its template, then reload, enable and start it.
//! Every step is fail-fast and nothing is rolled back: a unit installed
//! before a failure stays installed.

use tracing::info;

use crate::commands::policy::{ErrorPolicy, StepRunner};
use crate::commands::traits::Command;
use crate::commands::types::{CommandArgs, ExecutionContext};
use crate::error::OpsResult;
use crate::services::{ManagedUnit, UnitRole};
use crate::templates::render_unit;
use crate::validation::validate_token;

/// Install, enable and start one unit.
///
/// The template is rendered before the first side effect, so a missing
/// template or placeholder leaves the host untouched.
pub(crate) fn setup_unit(
    ctx: &mut ExecutionContext<'_>,
    unit: &ManagedUnit,
    token: Option<&str>,
) -> OpsResult<()> {
    let host = ctx.host;
    let name = unit.service_name.as_str();
    let icon = match unit.role {
        UnitRole::Web => "🌐",
        UnitRole::Bot => "🤖",
    };

    ctx.say(format_args!(
        "{} Setting up {} service ({})...",
        icon, unit.display_name, name
    ))?;

    let contents = render_unit(unit, token)?;

    let mut steps = StepRunner::new(ErrorPolicy::FailFast);
    steps.step(ctx, "make program executable", || {
        host.make_executable(&unit.program)
    })?;
    steps.step(ctx, "install unit file", || {
        host.install_unit(name, &contents).map(|_| ())
    })?;
    steps.step(ctx, "reload unit configuration", || host.reload())?;
    steps.step(ctx, "enable unit", || host.enable(name))?;
    steps.step(ctx, "start unit", || host.start(name))?;

    info!(run_id = %ctx.run_id, unit = %name, role = %unit.role, "Unit set up");

    ctx.success(format_args!("{} service installed and started", unit.display_name))
}

/// Set up the web editor unit.
pub struct SetupWebCommand;

impl Command for SetupWebCommand {
    fn name(&self) -> &'static str {
        "setup-web"
    }

    fn summary(&self) -> &'static str {
        "Install, enable and start the web editor service"
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &CommandArgs) -> OpsResult<()> {
        let units = ctx.units;
        setup_unit(ctx, units.web(), None)
    }
}

/// Set up the Discord bot unit with the given token.
pub struct SetupDiscordCommand;

impl Command for SetupDiscordCommand {
    fn name(&self) -> &'static str {
        "setup-discord"
    }

    fn usage(&self) -> &'static str {
        "<TOKEN>"
    }

    fn summary(&self) -> &'static str {
        "Install, enable and start the Discord bot service"
    }

    fn validate(&self, args: &CommandArgs) -> OpsResult<()> {
        validate_token(self.name(), args.get(0))?;
        Ok(())
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &CommandArgs) -> OpsResult<()> {
        let token = validate_token(self.name(), args.get(0))?;
        let units = ctx.units;
        setup_unit(ctx, units.bot(), Some(token))
    }
}

/// Set up the web editor, then the Discord bot.
pub struct SetupAllCommand;

impl Command for SetupAllCommand {
    fn name(&self) -> &'static str {
        "setup-all"
    }

    fn usage(&self) -> &'static str {
        "<TOKEN>"
    }

    fn summary(&self) -> &'static str {
        "Set up both the web editor and the Discord bot"
    }

    fn validate(&self, args: &CommandArgs) -> OpsResult<()> {
        validate_token(self.name(), args.get(0))?;
        Ok(())
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &CommandArgs) -> OpsResult<()> {
        let token = validate_token(self.name(), args.get(0))?;
        let units = ctx.units;

        setup_unit(ctx, units.web(), None)?;
        setup_unit(ctx, units.bot(), Some(token))?;

        ctx.success("All services set up")
    }
}
