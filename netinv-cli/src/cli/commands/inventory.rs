//! `show` and `replace` commands

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use super::AppContext;
use crate::cli::InventoryFormat;
use crate::config::repository::inventory::{load_inventory, replace_inventory};
use crate::inventory::Region;

pub async fn handle_show(ctx: &AppContext, format: InventoryFormat) -> Result<()> {
    let regions = load_inventory(&ctx.pool).await?;

    match format {
        InventoryFormat::Json => {
            let json =
                serde_json::to_string_pretty(&regions).context("Failed to format JSON output")?;
            println!("{}", json);
        }
        InventoryFormat::Table => print_inventory(&regions),
    }

    Ok(())
}

fn print_inventory(regions: &[Region]) {
    if regions.is_empty() {
        println!("{}", "Inventory is empty".dimmed());
        return;
    }

    for region in regions {
        println!("{}", region.name.bold().cyan());
        for (idx, location) in region.locations.iter().enumerate() {
            if location.network_id.is_empty() {
                println!("  {}. {}", idx + 1, location.name.bold());
            } else {
                println!(
                    "  {}. {} [{}]",
                    idx + 1,
                    location.name.bold(),
                    location.network_id.dimmed()
                );
            }
            for device in &location.devices {
                println!(
                    "      {:<20} {:<32} {} {}",
                    device.device_type,
                    device.ip,
                    device.description,
                    device.status.dimmed()
                );
                for sub in &device.sub_devices {
                    println!("        - {:<16} {}", sub.name, sub.ip);
                }
            }
        }
    }
}

/// Replace the inventory with a hand-edited JSON document
pub async fn handle_replace(ctx: &AppContext, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let regions: Vec<Region> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid inventory JSON: {}", file.display()))?;

    if let Some(device) = regions
        .iter()
        .flat_map(Region::devices)
        .find(|d| d.device_type.trim().is_empty())
    {
        anyhow::bail!("Device with ip '{}' has an empty type", device.ip);
    }

    replace_inventory(&ctx.pool, &regions).await?;
    println!(
        "Replaced inventory with {} regions",
        regions.len().to_string().bright_green()
    );
    Ok(())
}
