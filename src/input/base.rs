use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::input::InputError;
use crate::model::BaseDictionary;

pub fn parse_base_dictionary(path: &Path, bytes: &[u8]) -> Result<BaseDictionary, InputError> {
    let dictionary: BaseDictionary =
        serde_json::from_slice(bytes).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let odd = dictionary.non_canonical_keys();
    if !odd.is_empty() {
        tracing::warn!(
            "{} keys in {} are not uppercase and never match a normalized test name (first: {})",
            odd.len(),
            path.display(),
            odd[0]
        );
    }
    Ok(dictionary)
}

pub fn load_base_dictionary(path: &Path) -> Result<BaseDictionary, InputError> {
    let bytes = std::fs::read(path).map_err(|e| InputError::io(path, e))?;
    parse_base_dictionary(path, &bytes)
}

#[derive(Debug, Clone)]
struct CachedDictionary {
    modified: Option<SystemTime>,
    hash: u64,
    dictionary: BaseDictionary,
}

/// Parsed base dictionaries keyed by path. An entry is reused only while both
/// the file's modification time and its content hash are unchanged.
#[derive(Debug, Default)]
pub struct DictionaryCache {
    entries: HashMap<PathBuf, CachedDictionary>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<BaseDictionary, InputError> {
        let modified = std::fs::metadata(path)
            .map_err(|e| InputError::io(path, e))?
            .modified()
            .ok();
        let bytes = std::fs::read(path).map_err(|e| InputError::io(path, e))?;
        let hash = hash_bytes(&bytes);

        if let Some(cached) = self.entries.get(path) {
            if cached.modified == modified && cached.hash == hash {
                tracing::debug!("base dictionary cache hit for {}", path.display());
                return Ok(cached.dictionary.clone());
            }
        }

        let dictionary = parse_base_dictionary(path, &bytes)?;
        tracing::info!(
            "loaded base dictionary {} ({} entries)",
            path.display(),
            dictionary.len()
        );
        self.entries.insert(
            path.to_path_buf(),
            CachedDictionary {
                modified,
                hash,
                dictionary: dictionary.clone(),
            },
        );
        Ok(dictionary)
    }

    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }
}

pub fn hash_bytes(data: &[u8]) -> u64 {
    let mut hasher = Fnv64::new();
    hasher.update(data);
    hasher.finish()
}

struct Fnv64 {
    hash: u64,
}

impl Fnv64 {
    fn new() -> Self {
        Self {
            hash: 0xcbf29ce484222325,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let mut h = self.hash;
        for &b in data {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.hash = h;
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}
