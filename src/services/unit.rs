//! Managed unit descriptors.

use std::fmt;
use std::path::PathBuf;

use crate::config::UnitConfig;

/// Which of the two managed programs a unit runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitRole {
    /// The tournament web editor.
    Web,
    /// The Discord chat-bot.
    Bot,
}

impl fmt::Display for UnitRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitRole::Web => f.write_str("web"),
            UnitRole::Bot => f.write_str("bot"),
        }
    }
}

/// A program registered with the host init system.
///
/// The host owns the enabled and running flags; this only describes where
/// the unit's pieces live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedUnit {
    pub role: UnitRole,
    /// Systemd unit name without the `.service` suffix.
    pub service_name: String,
    pub display_name: String,
    /// Program made executable during setup.
    pub program: PathBuf,
    /// Unit-definition template read during setup.
    pub template: PathBuf,
    /// Marker replaced by the bot token. Units without one are installed verbatim.
    pub placeholder: Option<String>,
}

impl ManagedUnit {
    pub fn from_config(role: UnitRole, config: &UnitConfig) -> Self {
        Self {
            role,
            service_name: config.service.clone(),
            display_name: config.display_name.clone(),
            program: config.program.clone(),
            template: config.template.clone(),
            placeholder: config.placeholder.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_from_default_config() {
        let settings = Settings::default();
        let web = ManagedUnit::from_config(UnitRole::Web, &settings.units.web);
        let bot = ManagedUnit::from_config(UnitRole::Bot, &settings.units.bot);

        assert_eq!(web.service_name, "tournament-web");
        assert!(web.placeholder.is_none());
        assert_eq!(bot.service_name, "discord-bot");
        assert_eq!(bot.placeholder.as_deref(), Some("YOUR_DISCORD_BOT_TOKEN"));
        assert_eq!(bot.display_name, "Discord bot");
    }

    #[test]
    fn test_role_display() {
        assert_eq!(UnitRole::Web.to_string(), "web");
        assert_eq!(UnitRole::Bot.to_string(), "bot");
    }
}
