//! Reconcile serial candidates against addresses used in the inventory

use std::collections::HashSet;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::inventory::Region;

use super::extractor::SerialCandidates;

/// Availability of a candidate address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SerialStatus {
    Used,
    Unused,
}

impl std::fmt::Display for SerialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerialStatus::Used => write!(f, "Used"),
            SerialStatus::Unused => write!(f, "Unused"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerialEntry {
    pub ip: String,
    pub status: SerialStatus,
}

/// Unused candidates per region, in serials-workbook order
///
/// Serializes as a JSON object keyed by region name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityReport {
    pub regions: Vec<(String, Vec<SerialEntry>)>,
}

impl AvailabilityReport {
    pub fn get(&self, region: &str) -> Option<&[SerialEntry]> {
        self.regions
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn total_unused(&self) -> usize {
        self.regions.iter().map(|(_, e)| e.len()).sum()
    }
}

impl Serialize for AvailabilityReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.regions.len()))?;
        for (region, entries) in &self.regions {
            map.serialize_entry(region, entries)?;
        }
        map.end()
    }
}

/// Reduce a device address to the form compared against candidates
///
/// Keeps the text before the first space, then before the first '/'.
/// Ranges and lists therefore contribute only their first token.
pub fn normalize_device_ip(ip: &str) -> &str {
    let first = ip.split(' ').next().unwrap_or("");
    first.split('/').next().unwrap_or("")
}

/// Every normalized device address across the whole inventory
pub fn used_ips(inventory: &[Region]) -> HashSet<String> {
    inventory
        .iter()
        .flat_map(Region::devices)
        .filter(|d| !d.ip.is_empty())
        .map(|d| normalize_device_ip(&d.ip).to_string())
        .collect()
}

/// Report candidates absent from the inventory, per region
///
/// Usage is global: an address used in any region counts as used everywhere.
pub fn reconcile(candidates: &SerialCandidates, inventory: &[Region]) -> AvailabilityReport {
    let used = used_ips(inventory);
    log::debug!("Inventory uses {} distinct addresses", used.len());

    let regions = candidates
        .iter()
        .map(|(region, set)| {
            let unused = set
                .iter()
                .map(|ip| SerialEntry {
                    ip: ip.to_string(),
                    status: if used.contains(ip) {
                        SerialStatus::Used
                    } else {
                        SerialStatus::Unused
                    },
                })
                .filter(|entry| entry.status == SerialStatus::Unused)
                .collect();
            (region.to_string(), unused)
        })
        .collect();

    AvailabilityReport { regions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Device, Location};

    fn inventory_with(ips: &[&str]) -> Vec<Region> {
        let mut location = Location::new("HQ");
        for ip in ips {
            location.devices.push(Device::new("Router", *ip, "", ""));
        }
        vec![Region::new("West", vec![location])]
    }

    fn candidates(region: &str, ips: &[&str]) -> SerialCandidates {
        let mut c = SerialCandidates::default();
        c.insert(region, ips.iter().copied().collect());
        c
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_device_ip("10.0.0.5/24"), "10.0.0.5");
        assert_eq!(normalize_device_ip("10.0.0.5"), "10.0.0.5");
        assert_eq!(normalize_device_ip("10.0.0.1 to 10.0.0.9"), "10.0.0.1");
        assert_eq!(normalize_device_ip("10.0.0.1/30 (wan)"), "10.0.0.1");
        assert_eq!(normalize_device_ip("10.0.0.1,10.0.0.2"), "10.0.0.1,10.0.0.2");
    }

    #[test]
    fn test_used_anywhere_filters_candidate() {
        let report = reconcile(
            &candidates("East", &["172.16.0.1", "172.16.0.2"]),
            &inventory_with(&["172.16.0.1/30"]),
        );
        let ips: Vec<_> = report.get("East").unwrap().iter().map(|e| e.ip.as_str()).collect();
        assert_eq!(ips, vec!["172.16.0.2"]);
        assert!(report
            .get("East")
            .unwrap()
            .iter()
            .all(|e| e.status == SerialStatus::Unused));
    }

    #[test]
    fn test_adding_usage_only_removes_entries() {
        let c = candidates("East", &["1.1.1.1", "1.1.1.2", "1.1.1.3"]);
        let before = reconcile(&c, &inventory_with(&["1.1.1.2"]));
        let after = reconcile(&c, &inventory_with(&["1.1.1.2", "1.1.1.3 to 1.1.1.9"]));

        assert_eq!(before.total_unused(), 2);
        assert_eq!(after.total_unused(), 1);
        for entry in after.get("East").unwrap() {
            assert!(before.get("East").unwrap().contains(entry));
        }
    }

    #[test]
    fn test_fully_used_region_is_empty_not_missing() {
        let report = reconcile(&candidates("East", &["1.1.1.1"]), &inventory_with(&["1.1.1.1"]));
        assert_eq!(report.get("East"), Some(&[][..]));
    }

    #[test]
    fn test_report_serializes_as_ordered_object() {
        let mut c = SerialCandidates::default();
        c.insert("Zulu", ["2.2.2.2"].into_iter().collect());
        c.insert("Alpha", ["3.3.3.3"].into_iter().collect());
        let report = reconcile(&c, &[]);

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"Zulu":[{"ip":"2.2.2.2","status":"Unused"}],"Alpha":[{"ip":"3.3.3.3","status":"Unused"}]}"#
        );
    }
}
