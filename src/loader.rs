use std::path::Path;

use crate::error::{CrosscheckError, Result};
use crate::grid::{CellValue, Grid};

/// Sheet holding invoice rows in the comparison workbook.
pub const COMPARISON_SHEET: &str = "Individual_Invoices";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    Reference,
    Comparison,
}

/// Decode one input file into a grid of cells. The format is chosen by
/// extension: workbooks via calamine, CSV via the csv crate using the same
/// column conventions. Normalization happens downstream.
#[cfg_attr(not(feature = "xlsx"), allow(unused_variables))]
pub fn load_grid(path: &Path, kind: InputKind, sheet: &str) -> Result<Grid> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => load_csv(path),
        #[cfg(feature = "xlsx")]
        "xlsx" | "xls" | "xlsm" => load_workbook(path, kind, sheet),
        _ => Err(CrosscheckError::UnsupportedFormat(path.display().to_string())),
    }
}

fn load_csv(path: &Path) -> Result<Grid> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let mut grid = Vec::new();
    for result in rdr.records() {
        let record = result?;
        grid.push(
            record
                .iter()
                .map(|field| CellValue::Text(field.to_string()))
                .collect(),
        );
    }
    Ok(grid)
}

#[cfg(feature = "xlsx")]
fn load_workbook(path: &Path, kind: InputKind, sheet: &str) -> Result<Grid> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| CrosscheckError::Workbook(format!("{}: {e}", path.display())))?;

    let range = match kind {
        InputKind::Reference => {
            let name = workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| CrosscheckError::Workbook(format!("{} has no sheets", path.display())))?;
            workbook
                .worksheet_range(&name)
                .map_err(|e| CrosscheckError::Workbook(e.to_string()))?
        }
        InputKind::Comparison => workbook.worksheet_range(sheet).map_err(|_| {
            CrosscheckError::MissingRequiredSheet {
                sheet: sheet.to_string(),
                file: path.display().to_string(),
            }
        })?,
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect())
}

#[cfg(feature = "xlsx")]
fn cell_value(data: &calamine::Data) -> CellValue {
    use calamine::Data;
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
