//! Input validation module.
//!
//! Provides validators for the bot token, systemd unit names and configured paths.

mod path;
mod token;
mod unit_name;

pub use path::validate_absolute_path;
pub use token::validate_token;
pub use unit_name::validate_unit_name;
