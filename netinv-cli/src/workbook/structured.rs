//! Parser for sheets with a recognizable header row
//!
//! A numbered row (integer S.No. plus a location name) opens a location.
//! Following rows list its interfaces. The "Network ID" interface row sets
//! the location's network id instead of adding a device.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inventory::{Device, Location};

use super::header::{ColumnKey, HeaderMap};
use super::row_table::{RowTable, cell_at, is_blank_row};

static SERIAL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("serial number pattern is valid"));

const NETWORK_ID_LABEL: &str = "network id";

/// Walk the rows after the header and assemble locations
///
/// Returns an empty list when no row ever opens a location.
pub fn parse_structured(table: &RowTable, header: &HeaderMap) -> Vec<Location> {
    let col = |key| header.column(key);
    let mut locations: Vec<Location> = Vec::new();

    for row in table.rows().skip(header.row + 1) {
        if is_blank_row(row) {
            continue;
        }

        let serial = cell_at(row, col(ColumnKey::SerialNo));
        let location_name = cell_at(row, col(ColumnKey::Location));
        if SERIAL_NUMBER.is_match(serial) && !location_name.is_empty() {
            locations.push(Location::new(location_name));
        }

        // The opening row may itself carry an interface, so fall through
        let Some(current) = locations.last_mut() else {
            continue;
        };

        let interface = cell_at(row, col(ColumnKey::Interface));
        if interface.is_empty() {
            continue;
        }

        let ip = cell_at(row, col(ColumnKey::IpAddress));
        if interface.to_lowercase().contains(NETWORK_ID_LABEL) {
            // Last one wins when a location repeats the label
            current.network_id = ip.to_string();
        } else {
            current.devices.push(Device::new(
                interface,
                ip,
                cell_at(row, col(ColumnKey::Description)),
                cell_at(row, col(ColumnKey::Status)),
            ));
        }
    }

    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::header::{HeaderSchema, detect_header};

    fn parse(rows: Vec<Vec<&str>>) -> Vec<Location> {
        let table = RowTable::new(rows);
        let header = detect_header(&table, &HeaderSchema::default()).unwrap();
        parse_structured(&table, &header)
    }

    fn header_row() -> Vec<&'static str> {
        vec!["S.No.", "Location", "Interface", "IP Address", "Description", "Status"]
    }

    #[test]
    fn test_network_id_and_device() {
        let locations = parse(vec![
            header_row(),
            vec!["1", "HQ", "Network ID", "10.0.0.0/24", "", ""],
            vec!["", "", "Router", "10.0.0.1", "Core", "Up"],
        ]);

        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "HQ");
        assert_eq!(locations[0].network_id, "10.0.0.0/24");
        assert_eq!(
            locations[0].devices,
            vec![Device::new("Router", "10.0.0.1", "Core", "Up")]
        );
    }

    #[test]
    fn test_rows_before_first_location_dropped() {
        let locations = parse(vec![
            header_row(),
            vec!["", "", "Orphan", "1.1.1.1", "", ""],
            vec!["1", "Site A", "", "", "", ""],
            vec!["", "", "Switch", "1.1.1.2", "", ""],
        ]);
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].devices.len(), 1);
        assert_eq!(locations[0].devices[0].device_type, "Switch");
    }

    #[test]
    fn test_empty_interface_rows_skipped() {
        let locations = parse(vec![
            header_row(),
            vec!["1", "Site A", "", "", "", ""],
            vec!["", "", "", "9.9.9.9", "stray", ""],
            vec!["", "", "", "", "", ""],
        ]);
        assert!(locations[0].devices.is_empty());
    }

    #[test]
    fn test_non_integer_serial_does_not_open_location() {
        let locations = parse(vec![
            header_row(),
            vec!["1", "Site A", "Router", "10.0.0.1", "", ""],
            vec!["1a", "Site B", "Switch", "10.0.0.2", "", ""],
            vec!["2", "", "Firewall", "10.0.0.3", "", ""],
        ]);
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].devices.len(), 3);
    }

    #[test]
    fn test_repeated_network_id_last_wins() {
        let locations = parse(vec![
            header_row(),
            vec!["1", "HQ", "Network ID", "10.0.0.0/24", "", ""],
            vec!["", "", "network id (mgmt)", "10.9.0.0/24", "", ""],
        ]);
        assert_eq!(locations[0].network_id, "10.9.0.0/24");
        assert!(locations[0].devices.is_empty());
    }

    #[test]
    fn test_missing_optional_columns() {
        let locations = parse(vec![
            vec!["S.No", "Location", "Interface", "IP Address"],
            vec!["1", "HQ", "Router", "10.0.0.1"],
        ]);
        assert_eq!(
            locations[0].devices,
            vec![Device::new("Router", "10.0.0.1", "", "")]
        );
    }

    #[test]
    fn test_header_without_numbered_rows_is_empty() {
        let locations = parse(vec![
            header_row(),
            vec!["", "HQ", "Router", "10.0.0.1", "", ""],
        ]);
        assert!(locations.is_empty());
    }
}
