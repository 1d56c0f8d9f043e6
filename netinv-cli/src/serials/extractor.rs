//! Candidate address extraction from a "serials" workbook

use std::collections::HashSet;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::workbook::{RowTable, cell, open_workbook_bytes, read_sheets};

/// Dotted-quad shape only; octet ranges are not checked
static DOTTED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$")
        .expect("dotted quad pattern is valid")
});

const SERIAL_IP_HEADER: &str = "serial ip";

/// Columns scanned when no "Serial ip" column exists (column 0 is skipped)
const SCAN_COLUMNS: std::ops::Range<usize> = 1..15;

pub fn is_dotted_quad(value: &str) -> bool {
    DOTTED_QUAD.is_match(value)
}

/// Unique candidate addresses in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialSet {
    ips: Vec<String>,
    seen: HashSet<String>,
}

impl SerialSet {
    pub fn insert(&mut self, ip: &str) -> bool {
        if self.seen.insert(ip.to_string()) {
            self.ips.push(ip.to_string());
            true
        } else {
            false
        }
    }

    pub fn contains(&self, ip: &str) -> bool {
        self.seen.contains(ip)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ips.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for SerialSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = SerialSet::default();
        for ip in iter {
            set.insert(ip);
        }
        set
    }
}

/// Candidates per region, in worksheet order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialCandidates {
    regions: Vec<(String, SerialSet)>,
}

impl SerialCandidates {
    /// Set a region's candidates, replacing any earlier set with the same name
    pub fn insert(&mut self, region: impl Into<String>, set: SerialSet) {
        let region = region.into();
        match self.regions.iter_mut().find(|(name, _)| *name == region) {
            Some((_, existing)) => *existing = set,
            None => self.regions.push((region, set)),
        }
    }

    pub fn get(&self, region: &str) -> Option<&SerialSet> {
        self.regions
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, set)| set)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SerialSet)> {
        self.regions.iter().map(|(name, set)| (name.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Read a serials workbook and collect candidates for every worksheet
pub fn extract_serials(bytes: &[u8]) -> Result<SerialCandidates> {
    let mut workbook = open_workbook_bytes(bytes)?;
    let sheets = read_sheets(&mut workbook)?;

    let mut candidates = SerialCandidates::default();
    for (sheet_name, table) in &sheets {
        let set = extract_sheet(table);
        log::info!("Serials sheet '{}': {} candidates", sheet_name.trim(), set.len());
        candidates.insert(sheet_name.trim(), set);
    }

    Ok(candidates)
}

/// Candidates from one worksheet
///
/// With a "Serial ip" column only that column is read. Otherwise the first
/// dotted-quad cell in columns 1..15 of each row is taken.
pub fn extract_sheet(table: &RowTable) -> SerialSet {
    let serial_column = find_serial_ip_column(table);
    let mut set = SerialSet::default();

    for row in table.rows() {
        let candidate = match serial_column {
            Some(col) => cell(row, col),
            None => SCAN_COLUMNS
                .map(|col| cell(row, col))
                .find(|c| is_dotted_quad(c))
                .unwrap_or(""),
        };

        if is_dotted_quad(candidate) {
            set.insert(candidate);
        }
    }

    set
}

/// First cell containing "serial ip" in the first row that has one
fn find_serial_ip_column(table: &RowTable) -> Option<usize> {
    table.rows().find_map(|row| {
        row.iter()
            .position(|c| c.to_lowercase().contains(SERIAL_IP_HEADER))
    })
}
