use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::input::{CellValue, InputError, Table, clean_header, is_blank_row};

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let file = File::open(path).map_err(|e| InputError::io(path, e))?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn read_csv_table(path: &Path) -> Result<Table, InputError> {
    let reader = open_maybe_gz(path)?;
    read_csv_from(path, reader)
}

pub(crate) fn read_csv_from<R: Read>(path: &Path, reader: R) -> Result<Table, InputError> {
    let csv_err = |source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(clean_header)
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(InputError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    let mut row_numbers = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        let mut cells: Vec<CellValue> = record.iter().map(CellValue::text).collect();
        if is_blank_row(&cells) {
            tracing::debug!("skipping blank CSV line {}", line);
            continue;
        }
        cells.resize(headers.len().max(cells.len()), CellValue::Empty);
        rows.push(cells);
        row_numbers.push(line);
    }

    tracing::info!(
        "read {} rows from {} ({} columns)",
        rows.len(),
        path.display(),
        headers.len()
    );

    Ok(Table::new(path.to_path_buf(), headers, rows).with_row_numbers(row_numbers))
}
