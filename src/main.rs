//! tracker-ops - installs and controls the tournament web editor and Discord bot units.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tracker_ops::commands::{CommandRegistry, ExecutionContext, FAILURE_GLYPH};
use tracker_ops::config::Settings;
use tracker_ops::host::{is_privileged, SystemdHost};
use tracker_ops::services::UnitRegistry;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

fn main() -> ExitCode {
    // Positional arguments only; the first one selects the command
    let args: Vec<String> = env::args().skip(1).collect();
    let registry = CommandRegistry::new();

    // Help needs neither settings nor logging; a broken config must not hide it
    if registry.selects_help(&args) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(out, "{}", registry.help_text().trim_end());
        let _ = out.flush();
        return ExitCode::SUCCESS;
    }

    // Configuration comes from the environment so argv stays positional
    let (settings, config_path) = match Settings::from_env() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{} {}", FAILURE_GLYPH, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&settings) {
        eprintln!("{} Error initializing logging: {}", FAILURE_GLYPH, e);
        return ExitCode::FAILURE;
    }

    debug!(
        version = VERSION,
        config = ?config_path,
        unit_dir = %settings.systemd.unit_dir.display(),
        "Starting {}",
        NAME
    );

    let (command, _) = registry.resolve(&args);
    if command.mutates_host() && !is_privileged() {
        warn!(
            command = command.name(),
            "Not running as root; systemctl and unit file changes will likely be refused"
        );
    }

    let host = SystemdHost::new(&settings.systemd);
    let units = UnitRegistry::from_settings(&settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = {
        let mut ctx = ExecutionContext::new(&host, &units, &mut out);
        registry.run(&mut ctx, &args)
    };
    let _ = out.flush();

    ExitCode::from(code)
}

/// Initialize logging based on settings.
///
/// Logs go to stderr; stdout carries only the report.
fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}
