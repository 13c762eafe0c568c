//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gazette - Turn transcripts and notes into a structured newsletter.
#[derive(Debug, Parser)]
#[command(name = "gazette")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ~/.gazette/config.toml)
    #[arg(short, long, global = true, env = "GAZETTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Debug logging for the pipeline
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a newsletter from one or more text files
    Generate(GenerateArgs),

    /// Show or initialize the configuration
    Config(ConfigArgs),
}

/// Completion provider options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProviderArg {
    /// OpenAI-compatible chat completions API
    Openai,
    /// Local Ollama server
    Ollama,
    /// Canned responses, no network
    Mock,
}

/// Configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Smaller chunks and budgets
    Compact,
    /// Defaults
    Standard,
    /// Larger chunks and budgets
    Thorough,
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Input files (UTF-8 text)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Newsletter title
    #[arg(short, long, default_value = "Technology Newsletter")]
    pub title: String,

    /// Newsletter subtitle
    #[arg(short, long, default_value = "Enterprise IT Update")]
    pub subtitle: String,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Model name (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Completion provider (overrides config)
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Extraction preset applied before config overrides
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Skip refinement and accuracy review
    #[arg(long)]
    pub no_edit: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the default configuration if none exists
    #[arg(long)]
    pub init: bool,
}
