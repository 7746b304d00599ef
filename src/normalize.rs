use serde::Serialize;

use crate::grid::{cell_at, row_is_empty, CellValue, Grid};
use crate::models::{ComparisonRecord, ReferenceRecord};

/// Only ledger rows of this entry type participate in reconciliation.
/// The match is exact and case-sensitive.
pub const ENTRY_TYPE_INVOICE: &str = "Invoice";

/// Default row index where reference data begins. The ledger export carries
/// a three-row banner plus one header row above the data; this is a source
/// convention, overridable per run.
pub const DEFAULT_DATA_START_ROW: usize = 4;

// Reference sheet column positions (general-ledger export convention).
const REF_COL_ACCOUNT: usize = 1;
const REF_COL_DATE: usize = 2;
const REF_COL_ENTRY_TYPE: usize = 3;
const REF_COL_IDENTIFIER: usize = 4;
const REF_COL_COUNTERPARTY: usize = 5;
const REF_COL_SPLIT_ACCOUNT: usize = 6;
const REF_COL_AMOUNT: usize = 7;
const REF_COL_BALANCE: usize = 8;

// Comparison sheet column positions, data below a one-row header.
const CMP_DATA_START_ROW: usize = 1;
const CMP_COL_IDENTIFIER: usize = 0;
const CMP_COL_CUSTOMER: usize = 1;
const CMP_COL_CUSTOMER_ID: usize = 2;
const CMP_COL_PRODUCT: usize = 3;
const CMP_COL_MISC: usize = 4;
const CMP_COL_SUBTOTAL: usize = 5;
const CMP_COL_TOTAL: usize = 6;
const CMP_COL_BUSINESS_DATE: usize = 7;
const CMP_COL_PRINT_DATE: usize = 8;

/// Where reference data rows begin in the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceLayout {
    pub data_start_row: usize,
}

impl Default for ReferenceLayout {
    fn default() -> Self {
        Self {
            data_start_row: DEFAULT_DATA_START_ROW,
        }
    }
}

/// Total amount parse: spreadsheet amounts never fail, they default to zero.
/// The tag keeps "is zero" distinguishable from "failed to parse".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountParse {
    Parsed(f64),
    DefaultedToZero,
}

impl AmountParse {
    pub fn value(self) -> f64 {
        match self {
            AmountParse::Parsed(v) => v,
            AmountParse::DefaultedToZero => 0.0,
        }
    }

    pub fn defaulted(self) -> bool {
        matches!(self, AmountParse::DefaultedToZero)
    }
}

pub fn parse_amount_cell(cell: &CellValue) -> AmountParse {
    match cell {
        CellValue::Number(n) => AmountParse::Parsed(*n),
        CellValue::Empty => AmountParse::DefaultedToZero,
        CellValue::Text(raw) => {
            let s = raw.replace(',', "").replace('"', "").replace('$', "");
            let s = s.trim();
            if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
                return match inner.trim().parse::<f64>() {
                    Ok(v) => AmountParse::Parsed(-v),
                    Err(_) => AmountParse::DefaultedToZero,
                };
            }
            match s.parse::<f64>() {
                Ok(v) => AmountParse::Parsed(v),
                Err(_) => AmountParse::DefaultedToZero,
            }
        }
    }
}

/// Soft anomalies seen while normalizing one sheet. These are countable
/// for audit output, never errors: spreadsheet data is expected to be
/// imperfect and the tool's value is surfacing discrepancies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NormalizeDiagnostics {
    /// Rows dropped because the identifier was empty after trimming.
    pub skipped_missing_identifier: usize,
    /// Non-empty amount cells that failed numeric parsing and became zero.
    pub defaulted_amounts: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub diagnostics: NormalizeDiagnostics,
}

fn text_at(row: &[CellValue], index: usize) -> String {
    cell_at(row, index).text_value()
}

fn amount_at(row: &[CellValue], index: usize, diagnostics: &mut NormalizeDiagnostics) -> f64 {
    let cell = cell_at(row, index);
    let parsed = parse_amount_cell(cell);
    if parsed.defaulted() && !cell.is_empty() {
        diagnostics.defaulted_amounts += 1;
    }
    parsed.value()
}

/// Normalize a reference (general ledger) sheet: keep non-empty rows below
/// the header block whose entry type is exactly `Invoice` and whose
/// identifier is non-empty after trimming.
pub fn normalize_reference(grid: &Grid, layout: ReferenceLayout) -> Normalized<ReferenceRecord> {
    let mut records = Vec::new();
    let mut diagnostics = NormalizeDiagnostics::default();

    for row in grid.iter().skip(layout.data_start_row) {
        if row_is_empty(row) {
            continue;
        }
        if text_at(row, REF_COL_ENTRY_TYPE) != ENTRY_TYPE_INVOICE {
            continue;
        }
        let identifier = text_at(row, REF_COL_IDENTIFIER).trim().to_string();
        if identifier.is_empty() {
            diagnostics.skipped_missing_identifier += 1;
            continue;
        }
        records.push(ReferenceRecord {
            account: text_at(row, REF_COL_ACCOUNT),
            transaction_date: cell_at(row, REF_COL_DATE).display_text(),
            entry_type: text_at(row, REF_COL_ENTRY_TYPE),
            identifier,
            counterparty_name: text_at(row, REF_COL_COUNTERPARTY),
            split_account: text_at(row, REF_COL_SPLIT_ACCOUNT),
            amount: amount_at(row, REF_COL_AMOUNT, &mut diagnostics),
            running_balance: amount_at(row, REF_COL_BALANCE, &mut diagnostics),
        });
    }

    Normalized {
        records,
        diagnostics,
    }
}

/// Normalize a comparison (invoice) sheet: all non-empty rows below a
/// one-row header, same empty-identifier drop and zero-default amount
/// policy as the reference side.
pub fn normalize_comparison(grid: &Grid) -> Normalized<ComparisonRecord> {
    let mut records = Vec::new();
    let mut diagnostics = NormalizeDiagnostics::default();

    for row in grid.iter().skip(CMP_DATA_START_ROW) {
        if row_is_empty(row) {
            continue;
        }
        let identifier = text_at(row, CMP_COL_IDENTIFIER).trim().to_string();
        if identifier.is_empty() {
            diagnostics.skipped_missing_identifier += 1;
            continue;
        }
        records.push(ComparisonRecord {
            identifier,
            customer_name: text_at(row, CMP_COL_CUSTOMER),
            customer_id: text_at(row, CMP_COL_CUSTOMER_ID),
            product_amount: amount_at(row, CMP_COL_PRODUCT, &mut diagnostics),
            misc_charges: amount_at(row, CMP_COL_MISC, &mut diagnostics),
            subtotal: amount_at(row, CMP_COL_SUBTOTAL, &mut diagnostics),
            total_amount: amount_at(row, CMP_COL_TOTAL, &mut diagnostics),
            business_date: text_at(row, CMP_COL_BUSINESS_DATE),
            print_date: text_at(row, CMP_COL_PRINT_DATE),
        });
    }

    Normalized {
        records,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn ref_row(entry_type: &str, identifier: &str, amount: &str) -> Vec<CellValue> {
        vec![
            CellValue::Empty,
            text("Accounts Receivable"),
            text("01/15/2025"),
            text(entry_type),
            text(identifier),
            text("Acme Corp"),
            text("Sales"),
            text(amount),
            text("100.00"),
        ]
    }

    fn cmp_row(identifier: &str, total: &str) -> Vec<CellValue> {
        vec![
            text(identifier),
            text("Acme Corp"),
            text("C-100"),
            text("90.00"),
            text("10.00"),
            text("100.00"),
            text(total),
            text("01/15/2025"),
            text("01/16/2025"),
        ]
    }

    fn with_headers(mut data: Vec<Vec<CellValue>>, header_rows: usize) -> Grid {
        let mut grid: Grid = (0..header_rows).map(|_| vec![text("header")]).collect();
        grid.append(&mut data);
        grid
    }

    #[test]
    fn test_parse_amount_cell() {
        assert_eq!(parse_amount_cell(&text("1,234.56")), AmountParse::Parsed(1234.56));
        assert_eq!(parse_amount_cell(&text("$500.00")), AmountParse::Parsed(500.0));
        assert_eq!(parse_amount_cell(&text("(50.00)")), AmountParse::Parsed(-50.0));
        assert_eq!(parse_amount_cell(&CellValue::Number(42.5)), AmountParse::Parsed(42.5));
        assert_eq!(parse_amount_cell(&text("not_a_number")), AmountParse::DefaultedToZero);
        assert_eq!(parse_amount_cell(&CellValue::Empty), AmountParse::DefaultedToZero);
        assert_eq!(parse_amount_cell(&text("oops")).value(), 0.0);
    }

    #[test]
    fn test_reference_keeps_only_invoice_rows() {
        let grid = with_headers(
            vec![
                ref_row("Invoice", "INV1", "100.00"),
                ref_row("Payment", "PMT1", "-100.00"),
                ref_row("invoice", "INV2", "50.00"), // case-sensitive
            ],
            DEFAULT_DATA_START_ROW,
        );
        let out = normalize_reference(&grid, ReferenceLayout::default());
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].identifier, "INV1");
        assert_eq!(out.records[0].amount, 100.0);
    }

    #[test]
    fn test_reference_header_offset_is_configurable() {
        let grid = with_headers(vec![ref_row("Invoice", "INV1", "100.00")], 2);
        let out = normalize_reference(&grid, ReferenceLayout { data_start_row: 2 });
        assert_eq!(out.records.len(), 1);
        // Default offset skips past the single data row entirely
        let out = normalize_reference(&grid, ReferenceLayout::default());
        assert!(out.records.is_empty());
    }

    #[test]
    fn test_reference_drops_blank_identifiers() {
        let grid = with_headers(
            vec![
                ref_row("Invoice", "", "100.00"),
                ref_row("Invoice", "   ", "50.00"),
                ref_row("Invoice", " INV3 ", "25.00"),
            ],
            DEFAULT_DATA_START_ROW,
        );
        let out = normalize_reference(&grid, ReferenceLayout::default());
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].identifier, "INV3");
        assert_eq!(out.diagnostics.skipped_missing_identifier, 2);
    }

    #[test]
    fn test_reference_defaults_unparsable_amounts_to_zero() {
        let grid = with_headers(
            vec![ref_row("Invoice", "INV1", "N/A")],
            DEFAULT_DATA_START_ROW,
        );
        let out = normalize_reference(&grid, ReferenceLayout::default());
        assert_eq!(out.records[0].amount, 0.0);
        assert_eq!(out.diagnostics.defaulted_amounts, 1);
    }

    #[test]
    fn test_reference_serial_date_display_only() {
        let mut row = ref_row("Invoice", "INV1", "100.00");
        row[2] = CellValue::Number(45667.0);
        let grid = with_headers(vec![row], DEFAULT_DATA_START_ROW);
        let out = normalize_reference(&grid, ReferenceLayout::default());
        assert_eq!(out.records[0].transaction_date, "2025-01-10");
    }

    #[test]
    fn test_reference_numeric_identifier_cell() {
        let mut row = ref_row("Invoice", "", "100.00");
        row[4] = CellValue::Number(10235.0);
        let grid = with_headers(vec![row], DEFAULT_DATA_START_ROW);
        let out = normalize_reference(&grid, ReferenceLayout::default());
        assert_eq!(out.records[0].identifier, "10235");
    }

    #[test]
    fn test_comparison_skips_header_and_empty_rows() {
        let grid = vec![
            vec![text("Invoice Number"), text("Customer")],
            cmp_row("INV1", "100.00"),
            vec![CellValue::Empty, text("")],
            cmp_row("INV2", "50.00"),
        ];
        let out = normalize_comparison(&grid);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].identifier, "INV1");
        assert_eq!(out.records[1].total_amount, 50.0);
    }

    #[test]
    fn test_comparison_drops_blank_identifiers() {
        let grid = vec![
            vec![text("Invoice Number")],
            cmp_row("  ", "100.00"),
            cmp_row("INV1", "100.00"),
        ];
        let out = normalize_comparison(&grid);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.diagnostics.skipped_missing_identifier, 1);
    }

    #[test]
    fn test_comparison_amounts_parsed_independently() {
        let grid = vec![
            vec![text("Invoice Number")],
            cmp_row("INV1", "bad"),
        ];
        let out = normalize_comparison(&grid);
        let rec = &out.records[0];
        assert_eq!(rec.product_amount, 90.0);
        assert_eq!(rec.total_amount, 0.0);
        assert_eq!(out.diagnostics.defaulted_amounts, 1);
    }

    #[test]
    fn test_empty_cells_as_empty_string_equivalence() {
        // Loaders may emit Empty or "" for blank cells; both normalize alike.
        let mut a = cmp_row("INV1", "100.00");
        let mut b = cmp_row("INV1", "100.00");
        a[8] = CellValue::Empty;
        b[8] = text("");
        let header = vec![text("Invoice Number")];
        let out_a = normalize_comparison(&vec![header.clone(), a]);
        let out_b = normalize_comparison(&vec![header, b]);
        assert_eq!(out_a.records, out_b.records);
    }
}
