use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::input::{CellValue, InputError, Table, clean_header, is_blank_row};

pub fn list_sheets(path: &Path) -> Result<Vec<String>, InputError> {
    let workbook = open_workbook_auto(path).map_err(|source| InputError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(workbook.sheet_names())
}

/// Reads one sheet. The first row of the used range is the header row.
pub fn read_sheet_table(path: &Path, sheet: &str) -> Result<Table, InputError> {
    let workbook_err = |source| InputError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let available = workbook.sheet_names();
    if !available.iter().any(|s| s == sheet) {
        return Err(InputError::UnknownSheet {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook.worksheet_range(sheet).map_err(workbook_err)?;
    let header_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut rows_iter = range.rows();

    let headers: Vec<String> = match rows_iter.next() {
        Some(row) => row.iter().map(|c| clean_header(&convert_cell(c).to_string())).collect(),
        None => {
            return Err(InputError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
    };

    let mut rows = Vec::new();
    let mut row_numbers = Vec::new();
    for (idx, row) in rows_iter.enumerate() {
        let sheet_row = header_row + idx + 1;
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        if is_blank_row(&cells) {
            tracing::debug!("skipping blank sheet row {}", sheet_row);
            continue;
        }
        rows.push(cells);
        row_numbers.push(sheet_row);
    }

    tracing::info!(
        "read {} rows from sheet '{}' of {}",
        rows.len(),
        sheet,
        path.display()
    );

    Ok(Table::new(path.to_path_buf(), headers, rows).with_row_numbers(row_numbers))
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::text(s),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s),
        _ => CellValue::Empty,
    }
}
