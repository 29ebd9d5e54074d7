use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod base;
pub mod delimited;
pub mod workbook;

use thiserror::Error;

use crate::model::Field;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("workbook error in {}: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("sheet '{sheet}' not found; available sheets: {}", .available.join(", "))]
    UnknownSheet {
        sheet: String,
        available: Vec<String>,
    },
    #[error("{} has no header row", .path.display())]
    MissingHeader { path: PathBuf },
    #[error(
        "{} overrides the {} column, which this command does not read",
        .path.display(),
        .field.label()
    )]
    UnsupportedOverride { path: PathBuf, field: Field },
}

impl InputError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    pub fn text(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn render(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub source: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    row_numbers: Vec<usize>,
}

impl Table {
    /// Data rows are numbered as if they directly followed the header row.
    pub fn new(source: PathBuf, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let row_numbers = (0..rows.len()).map(|idx| idx + 2).collect();
        Self {
            source,
            headers,
            rows,
            row_numbers,
        }
    }

    pub(crate) fn with_row_numbers(mut self, row_numbers: Vec<usize>) -> Self {
        self.row_numbers = row_numbers;
        self
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn row_number(&self, idx: usize) -> usize {
        self.row_numbers.get(idx).copied().unwrap_or(idx + 2)
    }
}

pub(crate) fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

pub(crate) fn is_blank_row(cells: &[CellValue]) -> bool {
    cells.iter().all(|c| match c {
        CellValue::Empty => true,
        CellValue::Text(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Reads header overrides: a JSON object from canonical field name to the
/// list of accepted header texts.
pub fn load_schema_overrides(path: &Path) -> Result<BTreeMap<Field, Vec<String>>, InputError> {
    let bytes = std::fs::read(path).map_err(|e| InputError::io(path, e))?;
    let overrides: BTreeMap<Field, Vec<String>> =
        serde_json::from_slice(&bytes).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    for (field, headers) in &overrides {
        if headers.is_empty() {
            tracing::warn!(
                "schema override for {} lists no headers; keeping built-in names",
                field.label()
            );
        }
    }
    Ok(overrides)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
