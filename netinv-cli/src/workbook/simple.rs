//! Shape-based parsing for sheets without a header row

use crate::inventory::{Device, Location};

use super::row_table::{RowTable, cell, is_blank_row};

/// Group rows under lone column-0 labels
///
/// A row with only column 0 filled (columns 1 and 2 empty) opens a location.
/// Rows with columns 1 and 2 filled become devices of the open location.
pub fn parse_grouped(table: &RowTable) -> Vec<Location> {
    let mut locations: Vec<Location> = Vec::new();

    for row in table.rows() {
        if is_blank_row(row) {
            continue;
        }

        if !cell(row, 0).is_empty() && cell(row, 1).is_empty() && cell(row, 2).is_empty() {
            locations.push(Location::new(cell(row, 0)));
        } else if let Some(current) = locations.last_mut() {
            if let Some(device) = shape_device(row) {
                current.devices.push(device);
            }
        }
    }

    locations
}

/// Treat the whole sheet as a single location named after the sheet
///
/// Always yields exactly one location, possibly without devices.
pub fn parse_single_location(table: &RowTable, sheet_name: &str) -> Vec<Location> {
    let mut location = Location::new(sheet_name);
    location.devices = table.rows().filter_map(shape_device).collect();
    vec![location]
}

/// Column 1 is the type, column 2 the address, column 3 an optional description
fn shape_device(row: &[String]) -> Option<Device> {
    let device_type = cell(row, 1);
    let ip = cell(row, 2);
    if device_type.is_empty() || ip.is_empty() {
        return None;
    }
    Some(Device::new(device_type, ip, cell(row, 3), ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_locations() {
        let table = RowTable::new(vec![
            vec!["Branch1", "", ""],
            vec!["", "Switch", "192.168.1.1", "Access"],
        ]);
        let locations = parse_grouped(&table);
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Branch1");
        assert_eq!(locations[0].network_id, "");
        assert_eq!(
            locations[0].devices,
            vec![Device::new("Switch", "192.168.1.1", "Access", "")]
        );
    }

    #[test]
    fn test_grouped_requires_type_and_ip() {
        let table = RowTable::new(vec![
            vec!["Branch1", "", "", ""],
            vec!["", "Switch", "", "no address"],
            vec!["", "", "10.0.0.1", ""],
            vec!["Branch2", "", "", ""],
            vec!["x", "AP", "10.0.0.9", ""],
        ]);
        let locations = parse_grouped(&table);
        assert_eq!(locations.len(), 2);
        assert!(locations[0].devices.is_empty());
        assert_eq!(locations[1].devices[0].device_type, "AP");
    }

    #[test]
    fn test_grouped_rows_before_first_label_ignored() {
        let table = RowTable::new(vec![vec!["", "Router", "10.0.0.1"]]);
        assert!(parse_grouped(&table).is_empty());
    }

    #[test]
    fn test_single_location_fallback() {
        let table = RowTable::new(vec![
            vec!["Name", "Type", "IP"],
            vec!["a", "Router", "10.0.0.1"],
            vec!["b", "Switch", ""],
        ]);
        let locations = parse_single_location(&table, "Sheet7");
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Sheet7");
        assert_eq!(locations[0].devices.len(), 2);
        assert_eq!(locations[0].devices[0], Device::new("Type", "IP", "", ""));
    }

    #[test]
    fn test_single_location_without_devices() {
        let locations = parse_single_location(&RowTable::new(vec![vec!["note"]]), "Notes");
        assert_eq!(locations.len(), 1);
        assert!(locations[0].devices.is_empty());
    }
}
