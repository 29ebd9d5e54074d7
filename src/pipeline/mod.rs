pub mod assay;
pub mod merge;
pub mod normalize;
pub mod replace;

use thiserror::Error;

use crate::input::{InputError, Table};
use crate::model::{ColumnSchema, DictionaryEntry, Field};
use crate::pipeline::normalize::{RawRow, RowError, RowMode, normalize_row};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("the column names of {source_name} should be {}; {detail}", .expected.join(", "))]
    SchemaMismatch {
        source_name: String,
        expected: Vec<String>,
        detail: String,
    },
    #[error(
        "row {row} of {source_name}: {} value '{value}' is not 0 or 1",
        .field.label()
    )]
    TypeCoercion {
        source_name: String,
        row: usize,
        field: Field,
        value: String,
    },
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Validates the header row, then normalizes every data row in order. The
/// first failing row aborts the whole table.
pub(crate) fn normalize_table(
    table: &Table,
    schema: &ColumnSchema,
    mode: RowMode,
) -> Result<Vec<(String, DictionaryEntry)>, PipelineError> {
    let source_name = table.source.display().to_string();
    let expected = schema.expected_headers();

    let index = schema
        .resolve(&table.headers)
        .map_err(|missing| PipelineError::SchemaMismatch {
            source_name: source_name.clone(),
            expected: expected.clone(),
            detail: format!("missing: {}", missing.join(", ")),
        })?;

    let mut out = Vec::with_capacity(table.n_rows());
    for (idx, cells) in table.rows.iter().enumerate() {
        let raw = RawRow::from_cells(cells, &index);
        match normalize_row(&raw, mode) {
            Ok(pair) => out.push(pair),
            Err(RowError::MissingField(field)) => {
                return Err(PipelineError::SchemaMismatch {
                    source_name,
                    expected,
                    detail: format!(
                        "row {} has no {} value",
                        table.row_number(idx),
                        field.label()
                    ),
                });
            }
            Err(RowError::TypeCoercion { field, value }) => {
                return Err(PipelineError::TypeCoercion {
                    source_name,
                    row: table.row_number(idx),
                    field,
                    value,
                });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/tests.rs"]
mod tests;
