use thiserror::Error;

use crate::input::CellValue;
use crate::model::entry::{INCLUDE_ACTIVE, INCLUDE_EXCLUDED};
use crate::model::{ColumnIndex, DictionaryEntry, Field, dictionary_key};
use crate::pipeline::assay::parse_assay_list;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Incremental,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing {} value", .0.label())]
    MissingField(Field),
    #[error("{} value '{value}' is not 0 or 1", .field.label())]
    TypeCoercion { field: Field, value: String },
}

#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    pub test_name: Option<&'a CellValue>,
    pub material: Option<&'a CellValue>,
    pub assay: Option<&'a CellValue>,
    pub include: Option<&'a CellValue>,
}

impl<'a> RawRow<'a> {
    pub fn from_cells(cells: &'a [CellValue], index: &ColumnIndex) -> Self {
        let cell = |field| index.position(field).and_then(|idx| cells.get(idx));
        Self {
            test_name: cell(Field::TestName),
            material: cell(Field::Material),
            assay: cell(Field::Assay),
            include: cell(Field::Include),
        }
    }
}

pub fn normalize_row(
    row: &RawRow<'_>,
    mode: RowMode,
) -> Result<(String, DictionaryEntry), RowError> {
    let test_name = row
        .test_name
        .and_then(CellValue::as_text)
        .ok_or(RowError::MissingField(Field::TestName))?;
    let key = dictionary_key(test_name);

    let material = row.material.and_then(CellValue::render).unwrap_or_default();

    let assay_text = row.assay.and_then(CellValue::render);
    let assay_name = parse_assay_list(assay_text.as_deref());

    let include = match mode {
        RowMode::Incremental => INCLUDE_ACTIVE,
        RowMode::Full => coerce_include(row.include)?,
    };

    Ok((key, DictionaryEntry::new(include, material, assay_name)))
}

pub fn coerce_include(cell: Option<&CellValue>) -> Result<i64, RowError> {
    let invalid = |value: String| RowError::TypeCoercion {
        field: Field::Include,
        value,
    };
    let value = match cell {
        None | Some(CellValue::Empty) => return Err(RowError::MissingField(Field::Include)),
        Some(CellValue::Int(i)) => *i,
        Some(CellValue::Bool(b)) => i64::from(*b),
        Some(CellValue::Float(f)) if *f == 0.0 || *f == 1.0 => *f as i64,
        Some(CellValue::Float(f)) => return Err(invalid(f.to_string())),
        Some(CellValue::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(RowError::MissingField(Field::Include));
            }
            trimmed.parse::<i64>().map_err(|_| invalid(s.clone()))?
        }
    };
    match value {
        INCLUDE_EXCLUDED | INCLUDE_ACTIVE => Ok(value),
        other => Err(invalid(other.to_string())),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/normalize.rs"]
mod tests;
