//! Serial address availability: which candidate addresses from a serials
//! workbook are not yet used anywhere in the inventory

mod extractor;
mod reconcile;
mod report;

pub use extractor::{SerialCandidates, SerialSet, extract_serials, extract_sheet, is_dotted_quad};
pub use reconcile::{
    AvailabilityReport, SerialEntry, SerialStatus, normalize_device_ip, reconcile, used_ips,
};
pub use report::{ReportFormat, export_report, render_report};

use anyhow::Result;

use crate::inventory::Region;

/// Extract candidates from a serials upload and reconcile them against the inventory
pub fn check_serials(bytes: &[u8], inventory: &[Region]) -> Result<AvailabilityReport> {
    let candidates = extract_serials(bytes)?;
    Ok(reconcile(&candidates, inventory))
}
