use anyhow::Result;
use clap::Parser;

use notepic_cli::{
    cli::{Cli, Commands},
    commands, config, logging,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::CliConfig::load(cli.config.clone())?;

    logging::init(cli.log_level, cli.verbose, config.log_level);

    match cli.command {
        Commands::Process(args) => {
            commands::process::execute(&config, &args)?;
        }
        Commands::Config => commands::config::execute(&config)?,
        Commands::Version => commands::version::execute(),
    }

    Ok(())
}
