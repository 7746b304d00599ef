use serde::Serialize;

use crate::error::{CrosscheckError, Result};
use crate::index::KeyIndex;
use crate::models::{AmountMismatch, ComparisonRecord, MatchedPair, ReferenceRecord, Summary};

/// Maximum absolute amount difference still considered a match: one cent,
/// so sub-cent rounding noise between independent sources is not flagged.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileOptions {
    pub tolerance: f64,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Result of one reconciliation run. Buckets preserve input order; each
/// comparison record lands in exactly one of the first three, each
/// unmatched reference record in the fourth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileReport {
    pub matched: Vec<MatchedPair>,
    pub amount_mismatches: Vec<AmountMismatch>,
    pub missing_from_reference: Vec<ComparisonRecord>,
    pub missing_from_comparison: Vec<ReferenceRecord>,
    /// Identifiers shared by several reference rows: matching used the
    /// last-seen row, the earlier ones are listed here for audit.
    pub duplicate_reference_identifiers: Vec<String>,
    pub duplicate_comparison_identifiers: Vec<String>,
    pub summary: Summary,
}

/// One reconciliation run: pure, stateless, order-preserving.
///
/// `None` on either side means upstream normalization produced nothing
/// usable; the run aborts before any classification. An *empty* sequence
/// is valid input.
pub fn reconcile(
    reference: Option<&[ReferenceRecord]>,
    comparison: Option<&[ComparisonRecord]>,
    options: ReconcileOptions,
) -> Result<ReconcileReport> {
    let reference = reference.ok_or(CrosscheckError::IncompleteInput("reference"))?;
    let comparison = comparison.ok_or(CrosscheckError::IncompleteInput("comparison"))?;

    let reference_index = KeyIndex::build(reference, |r| r.identifier.as_str());
    let comparison_index = KeyIndex::build(comparison, |r| r.identifier.as_str());

    let mut matched = Vec::new();
    let mut amount_mismatches = Vec::new();
    let mut missing_from_reference = Vec::new();
    let mut missing_from_comparison = Vec::new();

    for record in comparison {
        match reference_index.get(&record.identifier) {
            Some(entry) => {
                let difference = record.total_amount - entry.amount;
                if difference.abs() > options.tolerance {
                    amount_mismatches.push(AmountMismatch {
                        comparison: record.clone(),
                        reference: entry.clone(),
                        difference,
                    });
                } else {
                    matched.push(MatchedPair {
                        comparison: record.clone(),
                        reference: entry.clone(),
                    });
                }
            }
            None => missing_from_reference.push(record.clone()),
        }
    }

    // Reference rows already matched above are not classified a second time.
    for record in reference {
        if !comparison_index.contains(&record.identifier) {
            missing_from_comparison.push(record.clone());
        }
    }

    let summary = Summary::derive(
        comparison.len(),
        reference.len(),
        matched.len(),
        amount_mismatches.len(),
        missing_from_reference.len(),
        missing_from_comparison.len(),
    );

    Ok(ReconcileReport {
        matched,
        amount_mismatches,
        missing_from_reference,
        missing_from_comparison,
        duplicate_reference_identifiers: reference_index.duplicate_keys(),
        duplicate_comparison_identifiers: comparison_index.duplicate_keys(),
        summary,
    })
}
