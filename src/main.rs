//! chaincfg CLI entry point.

use clap::Parser;

use chaincfg::cli::{commands, Cli, Commands};
use chaincfg::infrastructure::logging::LoggerImpl;

fn main() {
    let cli = Cli::parse();

    let _logger = match LoggerImpl::init(&cli.logging.to_log_config()) {
        Ok(logger) => logger,
        Err(err) => chaincfg::cli::handle_error(err, cli.json),
    };

    let result = match &cli.command {
        Commands::Check => commands::check::execute(&cli.sources, cli.json),
        Commands::Show { prefix } => commands::show::execute(&cli.sources, prefix.as_deref(), cli.json),
        Commands::Schema => commands::schema::execute(&cli.sources, cli.json),
    };

    if let Err(err) = result {
        chaincfg::cli::handle_error(err, cli.json);
    }
}
