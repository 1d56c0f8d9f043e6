//! Header row detection for tabular inventory sheets

use std::collections::HashMap;

use super::row_table::RowTable;

/// Semantic columns of a structured inventory sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    SerialNo,
    Location,
    Interface,
    IpAddress,
    Description,
    Status,
}

impl ColumnKey {
    /// Key name used in configuration files
    pub fn config_name(&self) -> &'static str {
        match self {
            ColumnKey::SerialNo => "s_no",
            ColumnKey::Location => "location",
            ColumnKey::Interface => "interface",
            ColumnKey::IpAddress => "ip_address",
            ColumnKey::Description => "description",
            ColumnKey::Status => "status",
        }
    }

    pub fn from_config_name(name: &str) -> Option<Self> {
        DEFAULT_KEYWORDS
            .iter()
            .map(|(key, _)| *key)
            .find(|key| key.config_name() == name.trim().to_lowercase())
    }
}

/// Built-in header keywords, matched exactly against lower-cased cells
const DEFAULT_KEYWORDS: &[(ColumnKey, &[&str])] = &[
    (ColumnKey::SerialNo, &["s.no.", "s.no"]),
    (ColumnKey::Location, &["location"]),
    (ColumnKey::Interface, &["interface"]),
    (ColumnKey::IpAddress, &["ip address"]),
    (ColumnKey::Description, &["description"]),
    (ColumnKey::Status, &["status"]),
];

pub const DEFAULT_SCAN_ROWS: usize = 15;
pub const DEFAULT_MIN_MATCHES: usize = 3;

/// Declarative header schema: keyword synonyms per column plus thresholds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    pub columns: Vec<(ColumnKey, Vec<String>)>,
    /// Only the first `scan_rows` rows are considered
    pub scan_rows: usize,
    /// Minimum number of distinct columns a header row must name
    pub min_matches: usize,
}

impl Default for HeaderSchema {
    fn default() -> Self {
        HeaderSchema {
            columns: DEFAULT_KEYWORDS
                .iter()
                .map(|(key, words)| (*key, words.iter().map(|w| w.to_string()).collect()))
                .collect(),
            scan_rows: DEFAULT_SCAN_ROWS,
            min_matches: DEFAULT_MIN_MATCHES,
        }
    }
}

impl HeaderSchema {
    /// Register an extra synonym for a column
    pub fn add_synonym(&mut self, key: ColumnKey, keyword: &str) {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return;
        }
        match self.columns.iter_mut().find(|(k, _)| *k == key) {
            Some((_, words)) => {
                if !words.contains(&keyword) {
                    words.push(keyword);
                }
            }
            None => self.columns.push((key, vec![keyword])),
        }
    }
}

/// Resolved header: row index plus column key -> column index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    pub row: usize,
    columns: HashMap<ColumnKey, usize>,
}

impl HeaderMap {
    pub fn column(&self, key: ColumnKey) -> Option<usize> {
        self.columns.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Find the first row within the scan window naming enough known columns
///
/// Returns `None` when no row qualifies; callers fall back to shape-based parsing.
pub fn detect_header(table: &RowTable, schema: &HeaderSchema) -> Option<HeaderMap> {
    let window = table.len().min(schema.scan_rows);

    for row_idx in 0..window {
        let cells: Vec<String> = table
            .row(row_idx)
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect();

        let columns: HashMap<ColumnKey, usize> = schema
            .columns
            .iter()
            .filter_map(|(key, keywords)| {
                cells
                    .iter()
                    .position(|c| keywords.iter().any(|k| k == c))
                    .map(|idx| (*key, idx))
            })
            .collect();

        if columns.len() >= schema.min_matches {
            log::debug!(
                "Header detected at row {} with {} known columns",
                row_idx,
                columns.len()
            );
            return Some(HeaderMap {
                row: row_idx,
                columns,
            });
        }
    }

    None
}
