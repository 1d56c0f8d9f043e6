//! Rendering of availability reports

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use rust_xlsxwriter::{Color, Format, Workbook};

use super::reconcile::AvailabilityReport;

/// Output format for reports printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub fn render_report(report: &AvailabilityReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to format JSON output")
        }
        ReportFormat::Csv => render_csv(report),
        ReportFormat::Table => Ok(render_table(report)),
    }
}

fn render_csv(report: &AvailabilityReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["region", "ip", "status"])?;
    for (region, entries) in &report.regions {
        for entry in entries {
            let status = entry.status.to_string();
            writer.write_record([region.as_str(), entry.ip.as_str(), status.as_str()])?;
        }
    }

    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn render_table(report: &AvailabilityReport) -> String {
    let mut out = String::new();
    for (region, entries) in &report.regions {
        out.push_str(&format!(
            "{} ({} unused)\n",
            region.bold(),
            entries.len().to_string().bright_green()
        ));
        if entries.is_empty() {
            out.push_str(&format!("  {}\n", "all candidates in use".dimmed()));
        }
        for entry in entries {
            out.push_str(&format!("  {}\n", entry.ip));
        }
    }
    out.push_str(&format!("Total unused: {}", report.total_unused()));
    out
}

/// Write the report as a workbook, one sheet per region
pub fn export_report(report: &AvailabilityReport, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White);

    let summary = workbook.add_worksheet();
    summary.set_name("Summary")?;
    summary.write_string_with_format(0, 0, "Region", &header_format)?;
    summary.write_string_with_format(0, 1, "Unused", &header_format)?;
    summary.write_string(
        0,
        3,
        format!("Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")),
    )?;
    for (idx, (region, entries)) in report.regions.iter().enumerate() {
        let row = (idx + 1) as u32;
        summary.write_string(row, 0, region)?;
        summary.write_number(row, 1, entries.len() as f64)?;
    }
    summary.autofit();

    for (idx, (region, entries)) in report.regions.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        // Region names may clash with "Summary" or exceed Excel's limit
        let name: String = format!("{} {}", idx + 1, region).chars().take(31).collect();
        sheet
            .set_name(&name)
            .with_context(|| format!("Invalid sheet name: {}", name))?;

        sheet.write_string_with_format(0, 0, "IP", &header_format)?;
        sheet.write_string_with_format(0, 1, "Status", &header_format)?;
        for (row_idx, entry) in entries.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            sheet.write_string(row, 0, &entry.ip)?;
            sheet.write_string(row, 1, entry.status.to_string())?;
        }
        sheet.autofit();
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Availability report exported to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serials::{SerialEntry, SerialStatus};

    fn report() -> AvailabilityReport {
        AvailabilityReport {
            regions: vec![
                (
                    "East".to_string(),
                    vec![SerialEntry {
                        ip: "172.16.0.2".to_string(),
                        status: SerialStatus::Unused,
                    }],
                ),
                ("West".to_string(), vec![]),
            ],
        }
    }

    #[test]
    fn test_csv_output() {
        let csv = render_report(&report(), ReportFormat::Csv).unwrap();
        assert_eq!(csv, "region,ip,status\nEast,172.16.0.2,Unused\n");
    }

    #[test]
    fn test_table_output_lists_every_region() {
        colored::control::set_override(false);
        let table = render_report(&report(), ReportFormat::Table).unwrap();
        assert!(table.contains("East (1 unused)"));
        assert!(table.contains("  172.16.0.2"));
        assert!(table.contains("West (0 unused)"));
        assert!(table.ends_with("Total unused: 1"));
    }
}
