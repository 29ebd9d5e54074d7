pub mod json;
pub mod text;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::BaseDictionary;
use crate::pipeline::merge::{MergeOutcome, changed_entries};
use crate::pipeline::replace::ReplaceOutcome;

pub const DEFAULT_OUTPUT_NAME: &str = "base_dict.json";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize dictionary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(raw))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            OutputTarget::File(path) => path.display().to_string(),
            OutputTarget::Stdout => "<stdout>".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Merge,
    Replace,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub kind: RunKind,
    pub source: String,
    pub rows_read: usize,
    pub added: usize,
    pub replaced: usize,
    pub duplicates: usize,
    pub total_entries: usize,
    pub changed_keys: Vec<String>,
}

impl RunSummary {
    pub fn from_merge(source: &str, base: &BaseDictionary, outcome: &MergeOutcome) -> Self {
        let changed_keys = changed_entries(base, &outcome.dictionary)
            .into_iter()
            .map(|(key, _, _)| key.to_string())
            .collect();
        Self {
            kind: RunKind::Merge,
            source: source.to_string(),
            rows_read: outcome.rows_read,
            added: outcome.added,
            replaced: outcome.replaced,
            duplicates: outcome.batch_duplicates,
            total_entries: outcome.dictionary.len(),
            changed_keys,
        }
    }

    pub fn from_replace(source: &str, outcome: &ReplaceOutcome) -> Self {
        Self {
            kind: RunKind::Replace,
            source: source.to_string(),
            rows_read: outcome.rows_read,
            added: outcome.dictionary.len(),
            replaced: 0,
            duplicates: outcome.duplicates,
            total_entries: outcome.dictionary.len(),
            changed_keys: Vec::new(),
        }
    }
}

pub(crate) fn write_text(path: &Path, content: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    w.write_all(content.as_bytes()).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
