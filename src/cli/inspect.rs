use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{InputKindArg, InspectArgs};
use crate::error::Result;
use crate::fmt::money;
use crate::loader;
use crate::normalize::{self, NormalizeDiagnostics, ReferenceLayout};

/// Audit view: show what the normalizer makes of one input file.
pub fn run(args: &InspectArgs) -> Result<()> {
    let path = Path::new(&args.file);
    let grid = loader::load_grid(path, args.kind.into(), &args.sheet)?;

    match args.kind {
        InputKindArg::Reference => {
            let layout = ReferenceLayout {
                data_start_row: args.header_offset,
            };
            let out = normalize::normalize_reference(&grid, layout);
            println!(
                "{} {} reference records",
                "Normalized".bold(),
                out.records.len()
            );
            let mut table = Table::new();
            table.set_header(vec!["Identifier", "Date", "Counterparty", "Amount", "Balance"]);
            for record in out.records.iter().take(args.limit) {
                table.add_row(vec![
                    Cell::new(&record.identifier),
                    Cell::new(&record.transaction_date),
                    Cell::new(&record.counterparty_name),
                    Cell::new(money(record.amount)),
                    Cell::new(money(record.running_balance)),
                ]);
            }
            println!("{table}");
            print_truncation(out.records.len(), args.limit);
            print_diagnostics(&out.diagnostics);
        }
        InputKindArg::Comparison => {
            let out = normalize::normalize_comparison(&grid);
            println!(
                "{} {} comparison records",
                "Normalized".bold(),
                out.records.len()
            );
            let mut table = Table::new();
            table.set_header(vec!["Identifier", "Customer", "Total", "Business date"]);
            for record in out.records.iter().take(args.limit) {
                table.add_row(vec![
                    Cell::new(&record.identifier),
                    Cell::new(&record.customer_name),
                    Cell::new(money(record.total_amount)),
                    Cell::new(&record.business_date),
                ]);
            }
            println!("{table}");
            print_truncation(out.records.len(), args.limit);
            print_diagnostics(&out.diagnostics);
        }
    }
    Ok(())
}

fn print_truncation(total: usize, limit: usize) {
    if total > limit {
        println!("… {} more not shown (raise --limit)", total - limit);
    }
}

fn print_diagnostics(diagnostics: &NormalizeDiagnostics) {
    println!(
        "Skipped for missing identifier: {}  Amounts defaulted to zero: {}",
        diagnostics.skipped_missing_identifier, diagnostics.defaulted_amounts
    );
}
