//! CIP CLI - Lint domain profiles and run detection.

use cip_cli::commands;
use cip_cli::{Cli, Command, Formatter};
use cip_sdk::Settings;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> cip_cli::Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.verbose {
        settings.log_level = "debug".to_string();
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(&settings.log_level))
        .init();

    let formatter = Formatter::new(cli.format, !cli.no_color);

    match cli.command {
        Command::Validate(args) => commands::execute_validate(args, &formatter),
        Command::Check(args) => commands::execute_check(args, &formatter),
        Command::List(args) => commands::execute_list(args, &settings, &formatter),
        Command::Detect(args) => commands::execute_detect(args, &settings, &formatter),
    }
}
