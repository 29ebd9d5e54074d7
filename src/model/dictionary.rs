use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::entry::DictionaryEntry;

/// Key under which a test name is stored. Case is folded, whitespace is kept.
pub fn dictionary_key(test_name: &str) -> String {
    test_name.to_uppercase()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseDictionary {
    entries: BTreeMap<String, DictionaryEntry>,
}

impl BaseDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&DictionaryEntry> {
        self.entries.get(key)
    }

    pub fn lookup(&self, test_name: &str) -> Option<&DictionaryEntry> {
        self.entries.get(&dictionary_key(test_name))
    }

    pub fn insert(&mut self, key: String, entry: DictionaryEntry) -> Option<DictionaryEntry> {
        self.entries.insert(key, entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DictionaryEntry)> {
        self.entries.iter()
    }

    pub fn non_canonical_keys(&self) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|k| dictionary_key(k) != **k)
            .map(|k| k.as_str())
            .collect()
    }
}

impl FromIterator<(String, DictionaryEntry)> for BaseDictionary {
    fn from_iter<I: IntoIterator<Item = (String, DictionaryEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for BaseDictionary {
    type Item = (String, DictionaryEntry);
    type IntoIter = std::collections::btree_map::IntoIter<String, DictionaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
