//! `check-serials` command

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::{AppContext, read_upload};
use crate::config::repository::inventory::load_inventory;
use crate::serials::{ReportFormat, check_serials, export_report, render_report};

pub async fn handle_check_serials(
    ctx: &AppContext,
    file: &Path,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let bytes = read_upload(file)?;
    // Read-only snapshot; nothing here writes back to the store
    let inventory = load_inventory(&ctx.pool).await?;
    let report = check_serials(&bytes, &inventory)?;

    println!("{}", render_report(&report, format)?);

    if let Some(path) = output {
        export_report(&report, path)?;
        eprintln!("Report saved to: {}", path.display().to_string().bright_green());
    }

    Ok(())
}
