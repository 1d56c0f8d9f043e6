//! Command-line interface definition

pub mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::inventory::SearchField;
use crate::serials::ReportFormat;

#[derive(Debug, Parser)]
#[command(name = "netinv", version, about = "Network inventory spreadsheet tool")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the inventory database (overrides config and NETINV_DATABASE)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import an inventory workbook, replacing the stored inventory
    Import {
        /// Workbook to import (xlsx, xls, xlsb, ods)
        file: PathBuf,
    },
    /// Export the stored inventory as an xlsx workbook
    Export {
        /// Destination file
        file: PathBuf,
    },
    /// Print the stored inventory
    Show {
        #[arg(long, value_enum, default_value_t = InventoryFormat::Table)]
        format: InventoryFormat,
    },
    /// Replace the stored inventory with a JSON document
    Replace {
        /// JSON file holding a list of regions
        file: PathBuf,
    },
    /// Report serial addresses not yet used in the inventory
    CheckSerials {
        /// Serials workbook
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,

        /// Also write the report as an xlsx workbook
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search devices in the inventory
    Search(SearchArgs),
    /// Suggest completions for a search term
    Suggest(SearchArgs),
}

#[derive(Debug, clap::Args)]
pub struct SearchArgs {
    /// Search term (matched case-insensitively)
    pub term: String,

    #[arg(long, value_enum, default_value_t = SearchField::Global)]
    pub field: SearchField,

    /// Restrict to a region (ignored for global searches)
    #[arg(long)]
    pub region: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InventoryFormat {
    Table,
    Json,
}

impl Cli {
    /// Log filter implied by `-v` flags; `RUST_LOG` still takes precedence
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
