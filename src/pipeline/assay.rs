/// Token stored when a row names no assay, so the list is never empty.
pub const SENTINEL_TOKEN: &str = " ";

/// "Not applicable" assay marker. Spreadsheet readers commonly turn a bare
/// `NA` into a missing value, so it is padded before splitting.
pub const NA_TOKEN: &str = "NA";

pub fn parse_assay_list(raw: Option<&str>) -> Vec<String> {
    let value = match raw {
        Some(v) if !v.trim().is_empty() => v,
        _ => return vec![SENTINEL_TOKEN.to_string()],
    };

    if value == NA_TOKEN {
        return vec![format!("{NA_TOKEN} ")];
    }

    value
        .replace("NA,", "NA ,")
        .split(',')
        .map(str::to_string)
        .collect()
}

pub fn is_sentinel(tokens: &[String]) -> bool {
    tokens.len() == 1 && tokens[0] == SENTINEL_TOKEN
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/assay.rs"]
mod tests;
