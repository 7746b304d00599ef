use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::CompareArgs;
use crate::engine::{self, ReconcileOptions, ReconcileReport};
use crate::error::Result;
use crate::export;
use crate::fmt::{money, signed_money};
use crate::loader::{self, InputKind};
use crate::normalize::{self, NormalizeDiagnostics, ReferenceLayout};

pub fn run(args: &CompareArgs) -> Result<()> {
    let reference_grid =
        loader::load_grid(Path::new(&args.reference), InputKind::Reference, &args.sheet)?;
    let comparison_grid =
        loader::load_grid(Path::new(&args.comparison), InputKind::Comparison, &args.sheet)?;

    let layout = ReferenceLayout {
        data_start_row: args.header_offset,
    };
    let reference = normalize::normalize_reference(&reference_grid, layout);
    let comparison = normalize::normalize_comparison(&comparison_grid);

    let report = engine::reconcile(
        Some(&reference.records),
        Some(&comparison.records),
        ReconcileOptions {
            tolerance: args.tolerance,
        },
    )?;

    if args.json {
        let doc = serde_json::json!({
            "report": &report,
            "normalization": {
                "reference": reference.diagnostics,
                "comparison": comparison.diagnostics,
            },
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_diagnostics("reference", &reference.diagnostics);
        print_diagnostics("comparison", &comparison.diagnostics);
        println!("{}", format_report(&report, args.issues_only));
    }

    if let Some(path) = &args.export {
        let written = export::write_discrepancies(&report, Path::new(path))?;
        println!("Wrote {written} discrepancy rows to {path}");
    }
    Ok(())
}

fn print_diagnostics(side: &str, diagnostics: &NormalizeDiagnostics) {
    if diagnostics.skipped_missing_identifier > 0 {
        eprintln!(
            "{} {} {side} rows skipped: missing identifier",
            "note:".yellow(),
            diagnostics.skipped_missing_identifier
        );
    }
    if diagnostics.defaulted_amounts > 0 {
        eprintln!(
            "{} {} {side} amount cells were unparsable and defaulted to zero",
            "note:".yellow(),
            diagnostics.defaulted_amounts
        );
    }
}

pub fn format_report(report: &ReconcileReport, issues_only: bool) -> String {
    let s = &report.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n  Comparison records: {}\n  Reference records:  {}\n  Accuracy: {}%\n",
        "Reconciliation summary".bold(),
        s.total_comparison_records,
        s.total_reference_records,
        s.accuracy_percentage
    ));

    if !report.duplicate_reference_identifiers.is_empty() {
        out.push_str(&format!(
            "  Duplicate reference identifiers: {}\n",
            report.duplicate_reference_identifiers.join(", ")
        ));
    }
    if !report.duplicate_comparison_identifiers.is_empty() {
        out.push_str(&format!(
            "  Duplicate comparison identifiers: {}\n",
            report.duplicate_comparison_identifiers.join(", ")
        ));
    }

    if !issues_only && !report.matched.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format!("Matched ({})", report.matched.len()).green().bold()
        ));
        let mut table = Table::new();
        table.set_header(vec!["Identifier", "Customer", "Amount", "Date"]);
        for m in &report.matched {
            table.add_row(vec![
                Cell::new(&m.comparison.identifier),
                Cell::new(&m.comparison.customer_name),
                Cell::new(money(m.comparison.total_amount)),
                Cell::new(&m.comparison.business_date),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    if !report.amount_mismatches.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format!("Amount mismatches ({})", report.amount_mismatches.len())
                .yellow()
                .bold()
        ));
        let mut table = Table::new();
        table.set_header(vec![
            "Identifier",
            "Customer",
            "Invoice amount",
            "Ledger amount",
            "Difference",
        ]);
        for m in &report.amount_mismatches {
            table.add_row(vec![
                Cell::new(&m.comparison.identifier),
                Cell::new(&m.comparison.customer_name),
                Cell::new(money(m.comparison.total_amount)),
                Cell::new(money(m.reference.amount)),
                Cell::new(signed_money(m.difference)),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    if !report.missing_from_reference.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format!(
                "Missing from reference ({})",
                report.missing_from_reference.len()
            )
            .red()
            .bold()
        ));
        let mut table = Table::new();
        table.set_header(vec!["Identifier", "Customer", "Amount", "Date"]);
        for record in &report.missing_from_reference {
            table.add_row(vec![
                Cell::new(&record.identifier),
                Cell::new(&record.customer_name),
                Cell::new(money(record.total_amount)),
                Cell::new(&record.business_date),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    if !report.missing_from_comparison.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            format!(
                "Missing from comparison ({})",
                report.missing_from_comparison.len()
            )
            .red()
            .bold()
        ));
        let mut table = Table::new();
        table.set_header(vec!["Identifier", "Counterparty", "Amount", "Date"]);
        for record in &report.missing_from_comparison {
            table.add_row(vec![
                Cell::new(&record.identifier),
                Cell::new(&record.counterparty_name),
                Cell::new(money(record.amount)),
                Cell::new(&record.transaction_date),
            ]);
        }
        out.push_str(&format!("{table}\n"));
    }

    out.push_str(&format!(
        "\nMatched: {}  Mismatched: {}  Missing from reference: {}  Missing from comparison: {}\n",
        s.matched_count,
        s.amount_mismatch_count,
        s.missing_from_reference_count,
        s.missing_from_comparison_count
    ));
    out
}
