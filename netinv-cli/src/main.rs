use clap::Parser;
use colored::Colorize;

use netinv::cli::{Cli, commands};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = commands::run(cli).await {
        log::debug!("Command failed: {:?}", err);
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
