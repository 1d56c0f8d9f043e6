//! `import` command

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::{AppContext, read_upload};
use crate::config::repository::inventory::replace_inventory;
use crate::workbook::import_workbook;

pub async fn handle_import(ctx: &AppContext, file: &Path) -> Result<()> {
    let bytes = read_upload(file)?;
    let schema = ctx.config.import.header_schema();

    // Nothing is stored unless the workbook yields at least one location
    let regions = import_workbook(&bytes, &schema)?;

    replace_inventory(&ctx.pool, &regions).await?;

    let locations: usize = regions.iter().map(|r| r.locations.len()).sum();
    let devices: usize = regions.iter().map(|r| r.devices().count()).sum();
    println!(
        "Imported {} regions, {} locations, {} devices from {}",
        regions.len().to_string().bright_green(),
        locations,
        devices,
        file.display().to_string().cyan()
    );
    for region in &regions {
        println!("  {} ({} locations)", region.name.bold(), region.locations.len());
    }

    Ok(())
}
