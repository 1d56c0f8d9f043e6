//! Worksheets reduced to rectangular grids of trimmed strings

use std::io::Cursor;

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto_from_rs};

/// Workbook opened from an in-memory upload
pub type WorkbookBytes = Sheets<Cursor<Vec<u8>>>;

/// Open a workbook of any format calamine recognizes from raw bytes
pub fn open_workbook_bytes(bytes: &[u8]) -> Result<WorkbookBytes> {
    open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .context("Failed to parse workbook")
}

/// Read every worksheet in workbook order as `(sheet name, rows)`
pub fn read_sheets(workbook: &mut WorkbookBytes) -> Result<Vec<(String, RowTable)>> {
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;
        sheets.push((sheet_name, RowTable::from_range(&range)));
    }

    Ok(sheets)
}

/// Ordered rows of trimmed cells; every row has the same width
///
/// Missing cells are empty strings. Indexing past the grid also yields "".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowTable {
    rows: Vec<Vec<String>>,
}

impl RowTable {
    /// Build from literal rows, padding short rows to the widest one
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = Vec<C>>,
        C: AsRef<str>,
    {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.iter().map(|c| c.as_ref().trim().to_string()).collect())
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }

        RowTable { rows }
    }

    /// Build from a calamine range
    ///
    /// Coordinates are relative to the used range: row 0 and column 0 are
    /// the first used row and column, not A1.
    pub fn from_range(range: &Range<Data>) -> Self {
        RowTable::new(
            range
                .rows()
                .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>()),
        )
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// True when no cell holds any text
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|r| is_blank_row(r))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn row(&self, idx: usize) -> &[String] {
        self.rows.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        cell(self.row(row), col)
    }
}

/// Cell text at `col`, or "" when the row is shorter
pub fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

/// Cell text for an optional column
pub fn cell_at(row: &[String], col: Option<usize>) -> &str {
    col.map(|c| cell(row, c)).unwrap_or("")
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(String::is_empty)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole numbers render without a fractional part ("1", not "1.0")
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    }
}
