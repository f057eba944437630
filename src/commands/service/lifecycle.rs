//! Start and stop commands for both units.

use tracing::info;

use crate::commands::policy::StepRunner;
use crate::commands::traits::Command;
use crate::commands::types::{CommandArgs, ExecutionContext};
use crate::error::OpsResult;

/// Start both units, web first.
pub struct StartAllCommand;

impl Command for StartAllCommand {
    fn name(&self) -> &'static str {
        "start-all"
    }

    fn summary(&self) -> &'static str {
        "Start both services"
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &CommandArgs) -> OpsResult<()> {
        let host = ctx.host;
        let units = ctx.units;
        let mut steps = StepRunner::new(self.error_policy());

        ctx.say("▶️  Starting services...")?;
        for unit in units.all() {
            let name = unit.service_name.as_str();
            steps.step(ctx, &format!("start {}", name), || host.start(name))?;
        }

        info!(run_id = %ctx.run_id, "All units started");
        ctx.success("All services started")
    }
}

/// Stop both units, web first.
pub struct StopAllCommand;

impl Command for StopAllCommand {
    fn name(&self) -> &'static str {
        "stop-all"
    }

    fn summary(&self) -> &'static str {
        "Stop both services"
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &CommandArgs) -> OpsResult<()> {
        let host = ctx.host;
        let units = ctx.units;
        let mut steps = StepRunner::new(self.error_policy());

        ctx.say("⏹️  Stopping services...")?;
        for unit in units.all() {
            let name = unit.service_name.as_str();
            steps.step(ctx, &format!("stop {}", name), || host.stop(name))?;
        }

        info!(run_id = %ctx.run_id, "All units stopped");
        ctx.success("All services stopped")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::policy::ErrorPolicy;
    use crate::host::{HostOp, MemoryHost, UnitState};
    use crate::services::UnitRegistry;

    fn installed_host() -> MemoryHost {
        let host = MemoryHost::new();
        for unit in ["tournament-web", "discord-bot"] {
            host.insert_unit(unit, UnitState::default());
        }
        host
    }

    #[test]
    fn test_start_all_starts_both() {
        let host = installed_host();
        let units = UnitRegistry::default();
        let mut out = Vec::new();
        let mut ctx = ExecutionContext::new(&host, &units, &mut out);

        StartAllCommand
            .execute(&mut ctx, &CommandArgs::default())
            .unwrap();

        assert!(host.unit("tournament-web").unwrap().running);
        assert!(host.unit("discord-bot").unwrap().running);
    }

    #[test]
    fn test_stop_all_aborts_on_first_failure() {
        let host = installed_host();
        host.fail_on(HostOp::Stop, "tournament-web", 5);
        let units = UnitRegistry::default();
        let mut out = Vec::new();
        let mut ctx = ExecutionContext::new(&host, &units, &mut out);

        let err = StopAllCommand
            .execute(&mut ctx, &CommandArgs::default())
            .unwrap_err();

        assert_eq!(err.exit_code(), 5);
        assert_eq!(host.ops(), vec![HostOp::Stop]);
    }

    #[test]
    fn test_policies() {
        assert_eq!(StartAllCommand.error_policy(), ErrorPolicy::FailFast);
        assert_eq!(StopAllCommand.error_policy(), ErrorPolicy::FailFast);
    }
}
