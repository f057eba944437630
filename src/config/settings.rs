//! Configuration settings for tracker-ops.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::OpsError;
use crate::validation::{validate_absolute_path, validate_unit_name};

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_ENV_VAR: &str = "TRACKER_OPS_CONFIG";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub units: UnitsConfig,
    #[serde(default)]
    pub systemd: SystemdConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The two managed units.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitsConfig {
    #[serde(default = "default_web_unit")]
    pub web: UnitConfig,
    #[serde(default = "default_bot_unit")]
    pub bot: UnitConfig,
}

/// A single managed unit.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    /// Systemd unit name without the `.service` suffix.
    pub service: String,
    /// Human-readable name used in status output.
    pub display_name: String,
    /// Program the unit runs; made executable during setup.
    pub program: PathBuf,
    /// Unit-definition template installed during setup.
    pub template: PathBuf,
    /// Marker in the template replaced by the bot token.
    #[serde(default)]
    pub placeholder: Option<String>,
}

/// Host init-system configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemdConfig {
    /// systemctl binary (name or absolute path).
    #[serde(default = "default_systemctl")]
    pub systemctl: String,
    /// Directory unit files are installed into.
    #[serde(default = "default_unit_dir")]
    pub unit_dir: PathBuf,
    /// Per-call timeout. Unset means block until systemctl returns.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_install_dir() -> PathBuf {
    PathBuf::from("/home/ubuntu/claude")
}

fn default_web_unit() -> UnitConfig {
    UnitConfig {
        service: "tournament-web".to_string(),
        display_name: "Web editor".to_string(),
        program: default_install_dir().join("web_editor.py"),
        template: default_install_dir().join("tournament-web.service"),
        placeholder: None,
    }
}

fn default_bot_unit() -> UnitConfig {
    UnitConfig {
        service: "discord-bot".to_string(),
        display_name: "Discord bot".to_string(),
        program: default_install_dir().join("discord_ai_bot.py"),
        template: default_install_dir().join("discord-bot.service"),
        placeholder: Some(default_placeholder()),
    }
}

fn default_placeholder() -> String {
    "YOUR_DISCORD_BOT_TOKEN".to_string()
}

fn default_systemctl() -> String {
    "systemctl".to_string()
}

fn default_unit_dir() -> PathBuf {
    PathBuf::from("/etc/systemd/system")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            web: default_web_unit(),
            bot: default_bot_unit(),
        }
    }
}

impl Default for SystemdConfig {
    fn default() -> Self {
        Self {
            systemctl: default_systemctl(),
            unit_dir: default_unit_dir(),
            timeout_seconds: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SystemdConfig {
    /// The configured per-call timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OpsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| OpsError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let settings = Self::from_toml(&content).map_err(|e| match e {
            OpsError::Config { message } => OpsError::Config {
                message: format!("{} (in '{}')", message, path.display()),
            },
            other => other,
        })?;

        Ok(settings)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, OpsError> {
        let settings: Settings = toml::from_str(content).map_err(|e| OpsError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Load settings from the file named by `TRACKER_OPS_CONFIG`, or the
    /// built-in defaults when the variable is unset.
    ///
    /// Returns the settings and the path they were read from.
    pub fn from_env() -> Result<(Self, Option<PathBuf>), OpsError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => {
                let path = PathBuf::from(path);
                let settings = Self::load(&path)?;
                Ok((settings, Some(path)))
            }
            _ => Ok((Self::default(), None)),
        }
    }

    /// Validate the settings.
    fn validate(&self) -> Result<(), OpsError> {
        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(OpsError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        // Validate log format
        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(OpsError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        let as_config = |e: OpsError| OpsError::Config {
            message: e.to_string(),
        };

        for unit in [&self.units.web, &self.units.bot] {
            validate_unit_name(&unit.service).map_err(as_config)?;
            validate_absolute_path(&unit.program).map_err(as_config)?;
            validate_absolute_path(&unit.template).map_err(as_config)?;
        }
        validate_absolute_path(&self.systemd.unit_dir).map_err(as_config)?;

        if self.units.web.service == self.units.bot.service {
            return Err(OpsError::Config {
                message: format!(
                    "Web and bot units must have distinct names (both are '{}')",
                    self.units.web.service
                ),
            });
        }

        match &self.units.bot.placeholder {
            Some(p) if !p.trim().is_empty() => {}
            _ => {
                return Err(OpsError::Config {
                    message: "units.bot.placeholder must be a non-empty marker string"
                        .to_string(),
                })
            }
        }

        if self.units.web.placeholder.is_some() {
            return Err(OpsError::Config {
                message: "units.web.placeholder is not supported; the web unit takes no token"
                    .to_string(),
            });
        }

        if self.systemd.systemctl.trim().is_empty() {
            return Err(OpsError::Config {
                message: "systemd.systemctl cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}
