//! Turn an inventory workbook into regions, one per non-empty worksheet

use crate::inventory::{Location, Region};

use super::header::{HeaderSchema, detect_header};
use super::row_table::{RowTable, open_workbook_bytes, read_sheets};
use super::simple::{parse_grouped, parse_single_location};
use super::structured::parse_structured;

/// Why an import produced nothing usable
#[derive(Debug)]
pub enum ImportError {
    /// The upload could not be read as a workbook
    Workbook(anyhow::Error),
    /// The workbook was readable but no worksheet yielded any location
    NothingExtracted,
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Workbook(_) => write!(f, "Error processing Excel file"),
            ImportError::NothingExtracted => write!(
                f,
                "Could not extract any valid data from the Excel file. Please check the format."
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Workbook(e) => Some(&**e),
            ImportError::NothingExtracted => None,
        }
    }
}

/// Parsing strategies in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetStrategy {
    Structured,
    Grouped,
    SingleLocation,
}

impl SheetStrategy {
    pub const CASCADE: [SheetStrategy; 3] = [
        SheetStrategy::Structured,
        SheetStrategy::Grouped,
        SheetStrategy::SingleLocation,
    ];

    fn apply(self, table: &RowTable, sheet_name: &str, schema: &HeaderSchema) -> Vec<Location> {
        match self {
            SheetStrategy::Structured => detect_header(table, schema)
                .map(|header| parse_structured(table, &header))
                .unwrap_or_default(),
            SheetStrategy::Grouped => parse_grouped(table),
            SheetStrategy::SingleLocation => parse_single_location(table, sheet_name),
        }
    }
}

/// Locations for one worksheet: the first strategy with a non-empty result wins
pub fn parse_sheet(
    table: &RowTable,
    sheet_name: &str,
    schema: &HeaderSchema,
) -> (SheetStrategy, Vec<Location>) {
    for strategy in SheetStrategy::CASCADE {
        let locations = strategy.apply(table, sheet_name, schema);
        if !locations.is_empty() {
            return (strategy, locations);
        }
    }
    (SheetStrategy::SingleLocation, Vec::new())
}

/// Build regions from already-materialized sheets, in sheet order
///
/// Blank sheets are skipped, as are sheets that yield no locations.
pub fn assemble_regions<'a, I>(sheets: I, schema: &HeaderSchema) -> Vec<Region>
where
    I: IntoIterator<Item = (&'a str, &'a RowTable)>,
{
    let mut regions = Vec::new();

    for (sheet_name, table) in sheets {
        if table.is_blank() {
            log::debug!("Skipping blank sheet '{}'", sheet_name);
            continue;
        }

        let (strategy, locations) = parse_sheet(table, sheet_name, schema);
        if locations.is_empty() {
            continue;
        }

        log::info!(
            "Sheet '{}': {} locations via {:?} parsing",
            sheet_name,
            locations.len(),
            strategy
        );
        regions.push(Region::new(sheet_name.trim(), locations));
    }

    regions
}

/// Extract regions from raw workbook bytes
///
/// An empty result is reported as `NothingExtracted`, never as an empty import.
pub fn import_workbook(bytes: &[u8], schema: &HeaderSchema) -> Result<Vec<Region>, ImportError> {
    let mut workbook = open_workbook_bytes(bytes).map_err(ImportError::Workbook)?;
    let sheets = read_sheets(&mut workbook).map_err(ImportError::Workbook)?;

    let regions = assemble_regions(
        sheets.iter().map(|(name, table)| (name.as_str(), table)),
        schema,
    );

    if regions.is_empty() {
        log::warn!("Workbook with {} sheets produced no regions", sheets.len());
        return Err(ImportError::NothingExtracted);
    }

    Ok(regions)
}
