use anyhow::Result;

use crate::config::CliConfig;

/// Execute the config command: print the effective configuration
pub fn execute(config: &CliConfig) -> Result<()> {
    print!("{}", config.display_as_toml()?);
    Ok(())
}
