use std::path::Path;

use crate::engine::ReconcileReport;
use crate::error::Result;

/// Write the discrepancy rows of a report to CSV: amount mismatches first,
/// then comparison records missing from the reference, then reference
/// records missing from the comparison, each section in input order.
/// Matched rows are not exported; the file is an action list.
pub fn write_discrepancies(report: &ReconcileReport, path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "outcome",
        "identifier",
        "name",
        "comparison_amount",
        "reference_amount",
        "difference",
    ])?;

    let mut written = 0usize;
    for m in &report.amount_mismatches {
        wtr.write_record([
            "amount_mismatch".to_string(),
            m.comparison.identifier.clone(),
            m.comparison.customer_name.clone(),
            format!("{:.2}", m.comparison.total_amount),
            format!("{:.2}", m.reference.amount),
            format!("{:.2}", m.difference),
        ])?;
        written += 1;
    }
    for record in &report.missing_from_reference {
        wtr.write_record([
            "missing_from_reference".to_string(),
            record.identifier.clone(),
            record.customer_name.clone(),
            format!("{:.2}", record.total_amount),
            String::new(),
            String::new(),
        ])?;
        written += 1;
    }
    for record in &report.missing_from_comparison {
        wtr.write_record([
            "missing_from_comparison".to_string(),
            record.identifier.clone(),
            record.counterparty_name.clone(),
            String::new(),
            format!("{:.2}", record.amount),
            String::new(),
        ])?;
        written += 1;
    }

    wtr.flush()?;
    Ok(written)
}
