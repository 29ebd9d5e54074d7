use crate::model::BaseDictionary;
use crate::report::{RunKind, RunSummary};

const MAX_LISTED_KEYS: usize = 20;

pub fn render_summary_text(summary: &RunSummary) -> String {
    let mut out = String::new();

    match summary.kind {
        RunKind::Merge => {
            out.push_str("Base dictionary update (incremental)\n");
            out.push_str(&format!("Input: {}\n", summary.source));
            out.push_str(&format!(
                "There are {} new tests in this file.\n",
                summary.rows_read
            ));
            out.push_str(&format!("Added: {}\n", summary.added));
            out.push_str(&format!("Replaced: {}\n", summary.replaced));
            if summary.duplicates > 0 {
                out.push_str(&format!(
                    "Repeated test names in upload: {}\n",
                    summary.duplicates
                ));
            }
        }
        RunKind::Replace => {
            out.push_str("Base dictionary update (full replacement)\n");
            out.push_str(&format!("Input: {}\n", summary.source));
            out.push_str(&format!("Number of observations: {}\n", summary.rows_read));
            if summary.duplicates > 0 {
                out.push_str(&format!(
                    "Duplicate test names overwritten: {}\n",
                    summary.duplicates
                ));
            }
        }
    }
    out.push_str(&format!("Total entries: {}\n", summary.total_entries));

    if !summary.changed_keys.is_empty() {
        let shown: Vec<&str> = summary
            .changed_keys
            .iter()
            .take(MAX_LISTED_KEYS)
            .map(String::as_str)
            .collect();
        out.push_str(&format!("Changed: {}", shown.join(", ")));
        if summary.changed_keys.len() > MAX_LISTED_KEYS {
            out.push_str(&format!(
                " (+{} more)",
                summary.changed_keys.len() - MAX_LISTED_KEYS
            ));
        }
        out.push('\n');
    }

    out
}

pub fn render_dictionary_overview(dictionary: &BaseDictionary) -> String {
    let included = dictionary.iter().filter(|(_, e)| e.is_included()).count();
    let no_assay = dictionary
        .iter()
        .filter(|(_, e)| crate::pipeline::assay::is_sentinel(&e.assay_name))
        .count();
    format!(
        "Entries: {}\nIncluded: {}\nExcluded: {}\nWithout assay: {}\n",
        dictionary.len(),
        included,
        dictionary.len() - included,
        no_assay
    )
}
