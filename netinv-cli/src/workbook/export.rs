//! Write the inventory back out in the flat S.No./Location/Interface layout

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::inventory::{Location, Region};

/// Column indices (must match the structured reader's header keywords)
mod cols {
    pub const SERIAL_NO: u16 = 0;
    pub const LOCATION: u16 = 1;
    pub const INTERFACE: u16 = 2;
    pub const IP_ADDRESS: u16 = 3;
    pub const DESCRIPTION: u16 = 4;
    pub const STATUS: u16 = 5;
}

pub const HEADERS: [&str; 6] = [
    "S.No.",
    "Location",
    "Interface",
    "IP Address",
    "Description",
    "Status",
];

/// Excel rejects sheet names longer than this
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Render the inventory as an xlsx workbook in memory
pub fn write_inventory_workbook(regions: &[Region]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(regions)?;
    workbook
        .save_to_buffer()
        .context("Failed to render inventory workbook")
}

/// Write the inventory to an xlsx file
pub fn export_inventory(regions: &[Region], path: &Path) -> Result<()> {
    let mut workbook = build_workbook(regions)?;
    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Exported {} regions to {}", regions.len(), path.display());
    Ok(())
}

fn build_workbook(regions: &[Region]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for region in regions {
        let worksheet = workbook.add_worksheet();
        let sheet_name = sheet_name(&region.name);
        worksheet
            .set_name(&sheet_name)
            .with_context(|| format!("Invalid sheet name: {}", sheet_name))?;

        for (col, title) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        let mut row: u32 = 1;
        for (idx, location) in region.locations.iter().enumerate() {
            row = write_location(worksheet, row, idx + 1, location)?;
        }

        worksheet.autofit();
    }

    Ok(workbook)
}

fn write_location(ws: &mut Worksheet, start_row: u32, number: usize, location: &Location) -> Result<u32> {
    ws.write_number(start_row, cols::SERIAL_NO, number as f64)?;
    ws.write_string(start_row, cols::LOCATION, &location.name)?;
    ws.write_string(start_row, cols::INTERFACE, "Network ID")?;
    ws.write_string(start_row, cols::IP_ADDRESS, &location.network_id)?;

    let mut row = start_row + 1;
    for device in &location.devices {
        ws.write_string(row, cols::INTERFACE, &device.device_type)?;
        ws.write_string(row, cols::IP_ADDRESS, &device.ip)?;
        ws.write_string(row, cols::DESCRIPTION, &device.description)?;
        ws.write_string(row, cols::STATUS, &device.status)?;
        row += 1;

        for sub in &device.sub_devices {
            ws.write_string(row, cols::INTERFACE, &format!("  - {}", sub.name))?;
            ws.write_string(row, cols::IP_ADDRESS, &sub.ip)?;
            row += 1;
        }
    }

    // Blank separator row
    Ok(row + 1)
}

fn sheet_name(region_name: &str) -> String {
    region_name.chars().take(MAX_SHEET_NAME_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Device, SubDevice};
    use crate::workbook::{HeaderSchema, import_workbook, open_workbook_bytes, read_sheets};

    fn sample() -> Vec<Region> {
        let mut hq = Location::new("HQ");
        hq.network_id = "10.0.0.0/24".to_string();
        hq.devices.push(Device::new("Router", "10.0.0.1", "Core", "Up"));
        hq.devices.push(Device::new("Switch", "10.0.0.2 to 10.0.0.9", "", ""));

        let mut dc = Location::new("DC");
        dc.devices.push(Device::new("Firewall", "10.2.0.1", "Edge", "Down"));

        vec![
            Region::new("East", vec![hq, dc]),
            Region::new("West", vec![Location::new("Empty Site")]),
        ]
    }

    #[test]
    fn test_round_trip_through_import() {
        let regions = sample();
        let bytes = write_inventory_workbook(&regions).unwrap();
        let imported = import_workbook(&bytes, &HeaderSchema::default()).unwrap();
        assert_eq!(imported, regions);
    }

    #[test]
    fn test_layout_rows() {
        let mut regions = sample();
        regions[0].locations[0].devices[1].sub_devices.push(SubDevice {
            name: "sw-3".to_string(),
            ip: "10.0.0.3".to_string(),
        });

        let bytes = write_inventory_workbook(&regions).unwrap();
        let mut workbook = open_workbook_bytes(&bytes).unwrap();
        let sheets = read_sheets(&mut workbook).unwrap();
        let (name, table) = &sheets[0];

        assert_eq!(name, "East");
        assert_eq!(table.row(0), HEADERS);
        assert_eq!(table.row(1), ["1", "HQ", "Network ID", "10.0.0.0/24", "", ""]);
        assert_eq!(table.row(2), ["", "", "Router", "10.0.0.1", "Core", "Up"]);
        assert_eq!(table.cell(4, 2), "- sw-3");
        assert_eq!(table.cell(4, 3), "10.0.0.3");
        assert!(table.row(5).iter().all(String::is_empty));
        assert_eq!(table.cell(6, 0), "2");
    }

    #[test]
    fn test_long_sheet_names_truncated() {
        let name = "A".repeat(40);
        assert_eq!(sheet_name(&name).chars().count(), 31);
        assert_eq!(sheet_name("East"), "East");
    }
}
