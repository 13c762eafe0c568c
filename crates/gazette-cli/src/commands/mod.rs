//! Command implementations.

pub mod config;
pub mod generate;

pub use self::config::execute_config;
pub use self::generate::{execute_generate, extract, Extraction};
