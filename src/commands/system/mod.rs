//! System commands.
//!
//! - `help` - Command list, printed for any unrecognized invocation

mod help;

pub use help::{synopsis, HelpCommand, PROGRAM_NAME};
