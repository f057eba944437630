//! Service management commands.
//!
//! - `setup-web` - Install and start the web editor unit
//! - `setup-discord` - Install and start the Discord bot unit with a token
//! - `setup-all` - Both of the above, web first
//! - `start-all` / `stop-all` - Start or stop both units
//! - `remove-all` - Best-effort teardown of both units
//! - `status` - Report each unit's active state

mod lifecycle;
mod remove;
mod setup;
mod status;

pub use lifecycle::{StartAllCommand, StopAllCommand};
pub use remove::RemoveAllCommand;
pub use setup::{SetupAllCommand, SetupDiscordCommand, SetupWebCommand};
pub use status::StatusCommand;
