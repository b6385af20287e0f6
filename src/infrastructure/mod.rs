//! Infrastructure layer for the Zellij sandbox and external commands.
//!
//! # Modules
//!
//! - [`command`]: Command templates for the keyword source and mutations
//! - [`paths`]: Sandbox paths (`/host` prefix, data directory)

pub mod command;
pub mod paths;

pub use command::{CommandSet, CommandTemplate};
pub use paths::{expand_tilde, get_data_dir};
