use crate::input::Table;
use crate::model::{BaseDictionary, ColumnSchema, DictionaryEntry};
use crate::pipeline::normalize::RowMode;
use crate::pipeline::{PipelineError, normalize_table};

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub dictionary: BaseDictionary,
    pub rows_read: usize,
    pub added: usize,
    pub replaced: usize,
    pub batch_duplicates: usize,
}

/// Normalizes the new-test rows and lays them over a copy of `base`. On any
/// row failure nothing is returned and `base` is untouched either way.
pub fn run_merge(
    base: &BaseDictionary,
    table: &Table,
    schema: &ColumnSchema,
) -> Result<MergeOutcome, PipelineError> {
    let rows_read = table.n_rows();
    if rows_read == 0 {
        tracing::warn!(
            "{} has no data rows; base dictionary left unchanged",
            table.source.display()
        );
    }

    let pairs = normalize_table(table, schema, RowMode::Incremental)?;
    let n_pairs = pairs.len();
    let batch: BaseDictionary = pairs.into_iter().collect();
    let batch_duplicates = n_pairs - batch.len();
    if batch_duplicates > 0 {
        tracing::debug!("{batch_duplicates} repeated test names in batch; last row kept");
    }

    let (dictionary, added, replaced) = merge_entries(base, batch);
    tracing::info!(
        "merged {} new tests: {} added, {} replaced, {} total entries",
        rows_read,
        added,
        replaced,
        dictionary.len()
    );

    Ok(MergeOutcome {
        dictionary,
        rows_read,
        added,
        replaced,
        batch_duplicates,
    })
}

/// Whole-entry union: an incoming entry replaces the existing one outright.
pub fn merge_entries(
    base: &BaseDictionary,
    batch: BaseDictionary,
) -> (BaseDictionary, usize, usize) {
    let mut merged = base.clone();
    let mut added = 0usize;
    let mut replaced = 0usize;
    for (key, entry) in batch {
        match merged.insert(key, entry) {
            Some(_) => replaced += 1,
            None => added += 1,
        }
    }
    (merged, added, replaced)
}

pub fn changed_entries<'a>(
    before: &'a BaseDictionary,
    after: &'a BaseDictionary,
) -> Vec<(&'a str, Option<&'a DictionaryEntry>, &'a DictionaryEntry)> {
    after
        .iter()
        .filter_map(|(key, entry)| {
            let old = before.get(key);
            if old == Some(entry) {
                None
            } else {
                Some((key.as_str(), old, entry))
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/merge.rs"]
mod tests;
