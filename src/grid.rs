use serde::Serialize;

/// One decoded spreadsheet cell. Loaders must emit `Empty` (or empty text)
/// for blank cells rather than dropping them, so column positions and
/// row-emptiness checks stay consistent downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

/// A decoded sheet: ordered rows of cells.
pub type Grid = Vec<Vec<CellValue>>;

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Cell content as plain text. Whole numbers render without a decimal
    /// point so numeric invoice identifiers match their text counterparts.
    pub fn text_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }

    /// Cell content for audit display. Excel serial-date numbers are shown
    /// as calendar dates; matching never reads this.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Number(n) if *n > 40000.0 && n.fract() == 0.0 => excel_serial_to_date(*n),
            other => other.text_value(),
        }
    }
}

/// Cell at `index`, treating short rows as padded with empty cells.
pub fn cell_at(row: &[CellValue], index: usize) -> &CellValue {
    row.get(index).unwrap_or(&EMPTY_CELL)
}

pub fn row_is_empty(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}

pub fn excel_serial_to_date(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let date = base + chrono::Duration::days(serial as i64);
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text(String::new()).is_empty());
        assert!(!CellValue::Text("x".into()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_text_value_whole_numbers() {
        assert_eq!(CellValue::Number(10235.0).text_value(), "10235");
        assert_eq!(CellValue::Number(42.5).text_value(), "42.5");
        assert_eq!(CellValue::Empty.text_value(), "");
    }

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(excel_serial_to_date(45667.0), "2025-01-10");
    }

    #[test]
    fn test_display_text_converts_serial_dates() {
        assert_eq!(CellValue::Number(45667.0).display_text(), "2025-01-10");
        // Small numbers are not dates
        assert_eq!(CellValue::Number(100.0).display_text(), "100");
        assert_eq!(CellValue::Text("01/15/2025".into()).display_text(), "01/15/2025");
    }

    #[test]
    fn test_cell_at_pads_short_rows() {
        let row = vec![CellValue::Text("a".into())];
        assert_eq!(cell_at(&row, 0), &CellValue::Text("a".into()));
        assert_eq!(cell_at(&row, 5), &CellValue::Empty);
    }

    #[test]
    fn test_row_is_empty() {
        assert!(row_is_empty(&[]));
        assert!(row_is_empty(&[CellValue::Empty, CellValue::Text(String::new())]));
        assert!(!row_is_empty(&[CellValue::Empty, CellValue::Number(1.0)]));
    }
}
