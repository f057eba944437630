//! Status command.
//!
//! Read-only: queries each unit's active state and always succeeds.

use tracing::{debug, warn};

use crate::commands::traits::Command;
use crate::commands::types::{CommandArgs, ExecutionContext, FAILURE_GLYPH, SUCCESS_GLYPH};
use crate::error::OpsResult;
use crate::host::ActiveState;
use crate::services::ManagedUnit;

/// Format the status line for one unit.
pub(crate) fn status_line(unit: &ManagedUnit, state: &ActiveState) -> String {
    if state.is_running() {
        format!(
            "{} {} ({}): running",
            SUCCESS_GLYPH, unit.display_name, unit.service_name
        )
    } else {
        format!(
            "{} {} ({}): not running ({})",
            FAILURE_GLYPH, unit.display_name, unit.service_name, state
        )
    }
}

/// Show whether each managed unit is running.
pub struct StatusCommand;

impl Command for StatusCommand {
    fn name(&self) -> &'static str {
        "status"
    }

    fn summary(&self) -> &'static str {
        "Show whether each service is running"
    }

    fn mutates_host(&self) -> bool {
        false
    }

    fn execute(&self, ctx: &mut ExecutionContext<'_>, _args: &CommandArgs) -> OpsResult<()> {
        let host = ctx.host;
        let units = ctx.units;

        ctx.say("📊 Service status:")?;

        for unit in units.all() {
            let state = host.active_state(&unit.service_name).unwrap_or_else(|e| {
                warn!(
                    run_id = %ctx.run_id,
                    unit = %unit.service_name,
                    error = %e,
                    "Failed to query unit state"
                );
                ActiveState::Unknown("unknown".to_string())
            });
            debug!(run_id = %ctx.run_id, unit = %unit.service_name, state = %state, "Unit state");
            ctx.say(status_line(unit, &state))?;
        }

        ctx.say("")?;
        ctx.say("Management commands:")?;
        for unit in units.all() {
            let name = &unit.service_name;
            ctx.say(format_args!("  sudo systemctl status {}", name))?;
            ctx.say(format_args!("  sudo systemctl restart {}", name))?;
            ctx.say(format_args!("  sudo journalctl -u {} -f", name))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostOp, MemoryHost, UnitState};
    use crate::services::UnitRegistry;

    fn run_status(host: &MemoryHost) -> String {
        let units = UnitRegistry::default();
        let mut out = Vec::new();
        {
            let mut ctx = ExecutionContext::new(host, &units, &mut out);
            StatusCommand
                .execute(&mut ctx, &CommandArgs::default())
                .unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    fn glyph_lines(text: &str) -> Vec<&str> {
        text.lines()
            .filter(|l| l.starts_with(SUCCESS_GLYPH) || l.starts_with(FAILURE_GLYPH))
            .collect()
    }

    #[test]
    fn test_status_absent_units_not_running() {
        let text = run_status(&MemoryHost::new());
        let lines = glyph_lines(&text);
        assert_eq!(
            lines,
            vec![
                "❌ Web editor (tournament-web): not running (inactive)",
                "❌ Discord bot (discord-bot): not running (inactive)",
            ]
        );
        assert!(text.contains("sudo journalctl -u discord-bot -f"));
    }

    #[test]
    fn test_status_running_unit() {
        let host = MemoryHost::new();
        host.insert_unit(
            "discord-bot",
            UnitState {
                contents: String::new(),
                enabled: true,
                running: true,
            },
        );
        let text = run_status(&host);
        let lines = glyph_lines(&text);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "✅ Discord bot (discord-bot): running");
    }

    #[test]
    fn test_status_query_failure_reports_unknown() {
        let host = MemoryHost::new();
        host.fail_on(HostOp::Query, "tournament-web", 1);
        let text = run_status(&host);
        let lines = glyph_lines(&text);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "❌ Web editor (tournament-web): not running (unknown)"
        );
    }

    #[test]
    fn test_status_is_read_only() {
        assert!(!StatusCommand.mutates_host());
    }
}
