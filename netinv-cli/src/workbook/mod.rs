//! Inventory workbook import and export
//!
//! Import tries, per worksheet, a header-driven parser first and then two
//! shape-based fallbacks. Export writes the same layout the header-driven
//! parser reads.

mod assembler;
mod export;
pub mod header;
mod row_table;
mod simple;
mod structured;

pub use assembler::{ImportError, SheetStrategy, assemble_regions, import_workbook, parse_sheet};
pub use export::{HEADERS, export_inventory, write_inventory_workbook};
pub use header::{ColumnKey, HeaderMap, HeaderSchema, detect_header};
pub use row_table::{RowTable, cell, WorkbookBytes, open_workbook_bytes, read_sheets};
pub use simple::{parse_grouped, parse_single_location};
pub use structured::parse_structured;
