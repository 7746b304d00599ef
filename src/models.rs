use serde::Serialize;

/// One row of the reference (general ledger) dataset. `identifier` is the
/// matching key; everything except `amount` is informational.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRecord {
    pub account: String,
    pub transaction_date: String,
    pub entry_type: String,
    pub identifier: String,
    pub counterparty_name: String,
    pub split_account: String,
    pub amount: f64,
    pub running_balance: f64,
}

/// One row of the comparison (invoice) dataset. `identifier` is the
/// matching key and `total_amount` the matching amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    pub identifier: String,
    pub customer_name: String,
    pub customer_id: String,
    pub product_amount: f64,
    pub misc_charges: f64,
    pub subtotal: f64,
    pub total_amount: f64,
    pub business_date: String,
    pub print_date: String,
}

/// Comparison record whose identifier and amount both agree with the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub comparison: ComparisonRecord,
    pub reference: ReferenceRecord,
}

/// Identifier found on both sides but amounts differ beyond tolerance.
/// `difference` is signed: comparison total minus reference amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountMismatch {
    pub comparison: ComparisonRecord,
    pub reference: ReferenceRecord,
    pub difference: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_comparison_records: usize,
    pub total_reference_records: usize,
    pub matched_count: usize,
    pub amount_mismatch_count: usize,
    pub missing_from_reference_count: usize,
    pub missing_from_comparison_count: usize,
    pub total_issues: usize,
    pub accuracy_percentage: u32,
}

impl Summary {
    pub fn derive(
        total_comparison_records: usize,
        total_reference_records: usize,
        matched_count: usize,
        amount_mismatch_count: usize,
        missing_from_reference_count: usize,
        missing_from_comparison_count: usize,
    ) -> Self {
        // Denominator floor of 1: an empty comparison set reports 0%
        // accuracy instead of dividing by zero.
        let accuracy_percentage = ((matched_count as f64
            / total_comparison_records.max(1) as f64)
            * 100.0)
            .round() as u32;
        Self {
            total_comparison_records,
            total_reference_records,
            matched_count,
            amount_mismatch_count,
            missing_from_reference_count,
            missing_from_comparison_count,
            total_issues: amount_mismatch_count
                + missing_from_reference_count
                + missing_from_comparison_count,
            accuracy_percentage,
        }
    }
}
