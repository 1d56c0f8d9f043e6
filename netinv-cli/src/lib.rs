//! Network inventory spreadsheet import, export and serial reconciliation
//!
//! Inventory workbooks are normalized into regions, locations and devices
//! whatever their layout. A separate serials workbook can be checked against
//! the stored inventory to list candidate addresses still unused.

pub mod cli;
pub mod config;
pub mod inventory;
pub mod serials;
pub mod workbook;
