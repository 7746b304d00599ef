pub mod compare;
pub mod inspect;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::loader::{InputKind, COMPARISON_SHEET};
use crate::normalize::DEFAULT_DATA_START_ROW;

#[derive(Parser)]
#[command(
    name = "crosscheck",
    about = "Reconcile a general-ledger export against an invoice export."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare a reference ledger file against a comparison invoice file.
    Compare(CompareArgs),
    /// Show the normalized records and diagnostics for one input file.
    Inspect(InspectArgs),
    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct CompareArgs {
    /// Reference (general ledger) file: .xlsx, .xls or .csv
    pub reference: String,
    /// Comparison (invoice) file: .xlsx, .xls or .csv
    pub comparison: String,
    /// Row index where reference data begins (rows above are headers)
    #[arg(long = "header-offset", default_value_t = DEFAULT_DATA_START_ROW)]
    pub header_offset: usize,
    /// Comparison sheet name (workbook input only)
    #[arg(long, default_value = COMPARISON_SHEET)]
    pub sheet: String,
    /// Maximum amount difference still considered a match
    #[arg(long, default_value_t = crate::engine::DEFAULT_TOLERANCE)]
    pub tolerance: f64,
    /// Only show discrepancy tables, hide matched rows
    #[arg(long = "issues-only")]
    pub issues_only: bool,
    /// Emit the full report as JSON instead of tables
    #[arg(long)]
    pub json: bool,
    /// Write discrepancy rows to a CSV file
    #[arg(long)]
    pub export: Option<String>,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Input file: .xlsx, .xls or .csv
    pub file: String,
    /// Which record kind the file holds
    #[arg(long, value_enum, default_value_t = InputKindArg::Comparison)]
    pub kind: InputKindArg,
    /// Row index where reference data begins (reference kind only)
    #[arg(long = "header-offset", default_value_t = DEFAULT_DATA_START_ROW)]
    pub header_offset: usize,
    /// Comparison sheet name (workbook input only)
    #[arg(long, default_value = COMPARISON_SHEET)]
    pub sheet: String,
    /// Maximum number of records to print
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum InputKindArg {
    Reference,
    Comparison,
}

impl From<InputKindArg> for InputKind {
    fn from(kind: InputKindArg) -> Self {
        match kind {
            InputKindArg::Reference => InputKind::Reference,
            InputKindArg::Comparison => InputKind::Comparison,
        }
    }
}
