//! `export` command

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::AppContext;
use crate::config::repository::inventory::load_inventory;
use crate::workbook::export_inventory;

pub async fn handle_export(ctx: &AppContext, file: &Path) -> Result<()> {
    let regions = load_inventory(&ctx.pool).await?;
    if regions.is_empty() {
        anyhow::bail!("Inventory is empty; nothing to export");
    }

    export_inventory(&regions, file)?;
    println!(
        "Exported {} regions to {}",
        regions.len(),
        file.display().to_string().bright_green()
    );
    Ok(())
}
