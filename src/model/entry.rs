use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

pub const INCLUDE_EXCLUDED: i64 = 0;
pub const INCLUDE_ACTIVE: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(rename = "Include", default = "default_include")]
    pub include: i64,
    #[serde(rename = "Material", default, deserialize_with = "null_as_empty")]
    pub material: String,
    #[serde(rename = "Assay Name")]
    pub assay_name: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl DictionaryEntry {
    pub fn new(include: i64, material: impl Into<String>, assay_name: Vec<String>) -> Self {
        Self {
            include,
            material: material.into(),
            assay_name,
            extra: BTreeMap::new(),
        }
    }

    pub fn is_included(&self) -> bool {
        self.include != 0
    }
}

fn default_include() -> i64 {
    INCLUDE_ACTIVE
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
