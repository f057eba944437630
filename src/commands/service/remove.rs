//! Remove command.
//!
//! The one best-effort command: a failing stop, disable, delete or reload
//! is reported and skipped, and the command still succeeds. This makes
//! teardown idempotent even when the units were never installed.

use tracing::info;

use crate::commands::policy::{ErrorPolicy, StepRunner};
use crate::commands::traits::Command;
use crate::commands::types::{CommandArgs, ExecutionContext};
use crate::error::OpsResult;

/// Stop, disable and uninstall both units.
pub struct RemoveAllCommand;

impl Command for RemoveAllCommand {
    fn name(&self) -> &'static str {
        "remove-all"
    }

    fn summary(&self) -> &'static str {
        "Stop, disable and uninstall both services"
    }

    fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::BestEffort
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &CommandArgs) -> OpsResult<()> {
        let host = ctx.host;
        let units = ctx.units;
        let mut steps = StepRunner::new(self.error_policy());

        ctx.say("🧹 Removing services...")?;

        for unit in units.all() {
            let name = unit.service_name.as_str();
            steps.step(ctx, &format!("stop {}", name), || host.stop(name))?;
        }
        for unit in units.all() {
            let name = unit.service_name.as_str();
            steps.step(ctx, &format!("disable {}", name), || host.disable(name))?;
        }
        for unit in units.all() {
            let name = unit.service_name.as_str();
            steps.step(ctx, &format!("delete {}.service", name), || {
                host.remove_unit(name)
            })?;
        }
        steps.step(ctx, "reload unit configuration", || host.reload())?;

        info!(
            run_id = %ctx.run_id,
            ignored_failures = steps.failures().len(),
            "Units removed"
        );

        ctx.success("All services removed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostOp, MemoryHost, UnitState};
    use crate::services::UnitRegistry;

    #[test]
    fn test_remove_all_on_empty_host() {
        let host = MemoryHost::new();
        let units = UnitRegistry::default();
        let mut out = Vec::new();
        {
            let mut ctx = ExecutionContext::new(&host, &units, &mut out);
            RemoveAllCommand
                .execute(&mut ctx, &CommandArgs::default())
                .unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("✅ All services removed\n"));
        assert_eq!(host.reload_count(), 1);
    }

    #[test]
    fn test_remove_all_order() {
        let host = MemoryHost::new();
        host.insert_unit(
            "tournament-web",
            UnitState {
                contents: "x".to_string(),
                enabled: true,
                running: true,
            },
        );
        let units = UnitRegistry::default();
        let mut out = Vec::new();
        let mut ctx = ExecutionContext::new(&host, &units, &mut out);

        RemoveAllCommand
            .execute(&mut ctx, &CommandArgs::default())
            .unwrap();

        assert_eq!(
            host.ops(),
            vec![
                HostOp::Stop,
                HostOp::Stop,
                HostOp::Disable,
                HostOp::Disable,
                HostOp::Remove,
                HostOp::Remove,
                HostOp::Reload,
            ]
        );
        assert!(host.unit("tournament-web").is_none());
    }

    #[test]
    fn test_remove_all_continues_after_disable_failure() {
        let host = MemoryHost::new();
        for unit in ["tournament-web", "discord-bot"] {
            host.insert_unit(unit, UnitState::default());
        }
        host.fail_on(HostOp::Disable, "tournament-web", 1);
        let units = UnitRegistry::default();
        let mut out = Vec::new();
        {
            let mut ctx = ExecutionContext::new(&host, &units, &mut out);
            RemoveAllCommand
                .execute(&mut ctx, &CommandArgs::default())
                .unwrap();
        }

        assert!(host.unit("tournament-web").is_none());
        assert!(host.unit("discord-bot").is_none());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("disable tournament-web failed (ignored)"));
    }

    #[test]
    fn test_policy_is_best_effort() {
        assert_eq!(RemoveAllCommand.error_policy(), ErrorPolicy::BestEffort);
    }
}
