//! Gazette CLI library.
//!
//! Configuration loading, input reading, the generate and config commands and
//! output formatting for the `gazette` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;


pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
