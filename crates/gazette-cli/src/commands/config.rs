//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// Prints the effective configuration as TOML. With `--init`, writes the
/// defaults to the config path first unless a file is already there.
pub fn execute_config(
    args: ConfigArgs,
    config_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::path()?,
    };

    if args.init {
        if init_config(&path)? {
            println!("{}", formatter.success(&format!("Wrote {}", path.display())));
        } else {
            println!(
                "{}",
                formatter.info(&format!("{} already exists", path.display()))
            );
        }
    }

    let config = Config::load(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration unless `path` exists.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Config::default().save_to(path)?;
    Ok(true)
}
