//! Command handlers

mod export;
mod import;
mod inventory;
mod search;
mod serials;

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use super::{Cli, Commands};
use crate::config::Config;

/// Shared state for command handlers
pub struct AppContext {
    pub config: Config,
    pub pool: SqlitePool,
}

/// Run the parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let db_path = config.database_path(cli.database.as_deref());
    let pool = crate::config::connect(&db_path).await?;
    let ctx = AppContext { config, pool };

    match cli.command {
        Commands::Import { file } => import::handle_import(&ctx, &file).await,
        Commands::Export { file } => export::handle_export(&ctx, &file).await,
        Commands::Show { format } => inventory::handle_show(&ctx, format).await,
        Commands::Replace { file } => inventory::handle_replace(&ctx, &file).await,
        Commands::CheckSerials {
            file,
            format,
            output,
        } => serials::handle_check_serials(&ctx, &file, format, output.as_deref()).await,
        Commands::Search(args) => search::handle_search(&ctx, args).await,
        Commands::Suggest(args) => search::handle_suggest(&ctx, args).await,
    }
}

fn read_upload(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}
