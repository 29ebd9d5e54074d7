use crate::input::Table;
use crate::model::{BaseDictionary, ColumnSchema};
use crate::pipeline::normalize::RowMode;
use crate::pipeline::{PipelineError, normalize_table};

#[derive(Debug, Clone)]
pub struct ReplaceOutcome {
    pub dictionary: BaseDictionary,
    pub rows_read: usize,
    pub duplicates: usize,
}

/// Builds a fresh dictionary from a whole-dictionary sheet. Repeated test
/// names keep the last row.
pub fn run_replace(table: &Table, schema: &ColumnSchema) -> Result<ReplaceOutcome, PipelineError> {
    let rows_read = table.n_rows();
    if rows_read == 0 {
        tracing::warn!(
            "{} has no data rows; resulting dictionary is empty",
            table.source.display()
        );
    }

    let mut dictionary = BaseDictionary::new();
    let mut duplicates = 0usize;
    for (key, entry) in normalize_table(table, schema, RowMode::Full)? {
        if dictionary.insert(key, entry).is_some() {
            duplicates += 1;
        }
    }

    tracing::info!(
        "built dictionary from {} rows: {} entries, {} duplicate test names overwritten",
        rows_read,
        dictionary.len(),
        duplicates
    );

    Ok(ReplaceOutcome {
        dictionary,
        rows_read,
        duplicates,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/replace.rs"]
mod tests;
