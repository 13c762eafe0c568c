//! Gazette CLI - Turn transcripts and notes into a structured newsletter.

use clap::Parser;
use gazette_cli::commands;
use gazette_cli::logging::init_tracing;
use gazette_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> gazette_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate(args) => {
            let config = Config::load(cli.config.as_deref())?;

            // Determine color setting
            let formatter = Formatter::new(!cli.no_color && config.output.color);
            commands::execute_generate(args, config, &formatter).await?;
        }
        Command::Config(args) => {
            let formatter = Formatter::new(!cli.no_color);
            commands::execute_config(args, cli.config.as_deref(), &formatter)?;
        }
    }

    Ok(())
}
