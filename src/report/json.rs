use std::io::Write;

use crate::model::{BaseDictionary, DictionaryEntry};
use crate::report::{OutputTarget, ReportError, write_text};

pub fn render_dictionary_json(
    dictionary: &BaseDictionary,
    pretty: bool,
) -> Result<String, ReportError> {
    let json = if pretty {
        serde_json::to_string_pretty(dictionary)?
    } else {
        serde_json::to_string(dictionary)?
    };
    Ok(json)
}

pub fn render_entry_json(key: &str, entry: &DictionaryEntry) -> Result<String, ReportError> {
    let mut map = serde_json::Map::new();
    map.insert(key.to_string(), serde_json::to_value(entry)?);
    Ok(serde_json::to_string_pretty(&map)?)
}

pub fn write_dictionary(
    dictionary: &BaseDictionary,
    target: &OutputTarget,
    pretty: bool,
) -> Result<(), ReportError> {
    let json = render_dictionary_json(dictionary, pretty)?;
    match target {
        OutputTarget::File(path) => write_text(path, &json)?,
        OutputTarget::Stdout => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            let io_err = |source| ReportError::Io {
                path: target.describe(),
                source,
            };
            lock.write_all(json.as_bytes()).map_err(io_err)?;
            lock.write_all(b"\n").map_err(io_err)?;
        }
    }
    tracing::info!(
        "wrote {} entries to {}",
        dictionary.len(),
        target.describe()
    );
    Ok(())
}
