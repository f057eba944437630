//! Unit registry.
//!
//! Holds the two managed units in their fixed order (web, then bot).

use tracing::debug;

use crate::config::Settings;

use super::unit::{ManagedUnit, UnitRole};

/// Registry of the managed units.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    web: ManagedUnit,
    bot: ManagedUnit,
}

impl UnitRegistry {
    /// Build the registry from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let registry = Self {
            web: ManagedUnit::from_config(UnitRole::Web, &settings.units.web),
            bot: ManagedUnit::from_config(UnitRole::Bot, &settings.units.bot),
        };

        debug!(
            web = %registry.web.service_name,
            bot = %registry.bot.service_name,
            "Unit registry initialized"
        );

        registry
    }

    pub fn web(&self) -> &ManagedUnit {
        &self.web
    }

    pub fn bot(&self) -> &ManagedUnit {
        &self.bot
    }

    /// All units, web first.
    pub fn all(&self) -> [&ManagedUnit; 2] {
        [&self.web, &self.bot]
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
