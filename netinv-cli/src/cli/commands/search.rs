//! `search` and `suggest` commands

use anyhow::{Context, Result};
use colored::Colorize;

use super::AppContext;
use crate::cli::SearchArgs;
use crate::config::repository::inventory::load_inventory;
use crate::inventory::{SearchQuery, search, suggest};

fn to_query(args: SearchArgs) -> Result<SearchQuery> {
    if args.term.trim().is_empty() {
        anyhow::bail!("Search term is required");
    }
    Ok(SearchQuery {
        term: args.term,
        field: args.field,
        region: args.region,
    })
}

pub async fn handle_search(ctx: &AppContext, args: SearchArgs) -> Result<()> {
    let json = args.json;
    let query = to_query(args)?;
    let regions = load_inventory(&ctx.pool).await?;
    let hits = search(&regions, &query);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&hits).context("Failed to format JSON output")?
        );
        return Ok(());
    }

    if hits.is_empty() {
        println!("{}", "No matches".dimmed());
        return Ok(());
    }

    for hit in &hits {
        println!(
            "{} / {}: {} {} {}",
            hit.region_name.cyan(),
            hit.location_name.bold(),
            hit.device.device_type,
            hit.device.ip.bright_green(),
            hit.device.description.dimmed()
        );
    }
    println!("{} matches", hits.len());
    Ok(())
}

pub async fn handle_suggest(ctx: &AppContext, args: SearchArgs) -> Result<()> {
    let json = args.json;
    let query = SearchQuery {
        term: args.term,
        field: args.field,
        region: args.region,
    };
    let regions = load_inventory(&ctx.pool).await?;
    let suggestions = suggest(&regions, &query);

    if json {
        println!(
            "{}",
            serde_json::to_string(&suggestions).context("Failed to format JSON output")?
        );
    } else {
        for suggestion in suggestions {
            println!("{}", suggestion);
        }
    }
    Ok(())
}
