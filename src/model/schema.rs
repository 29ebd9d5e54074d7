use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    TestName,
    Include,
    Material,
    Assay,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::TestName => "test name",
            Field::Include => "include",
            Field::Material => "material",
            Field::Assay => "assay",
        }
    }
}

/// Maps each canonical field to the header texts accepted for it. The first
/// header of every field is the one reported back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    columns: BTreeMap<Field, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: BTreeMap<Field, usize>,
}

impl ColumnIndex {
    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions.get(&field).copied()
    }
}

impl ColumnSchema {
    pub fn incremental_v1() -> Self {
        Self::from_pairs(&[
            (Field::TestName, &["Customer's LIS test name", "LISName"]),
            (Field::Material, &["Material for the LIS test", "Material"]),
            (
                Field::Assay,
                &["Corresponding Roche assay names", "AssayName"],
            ),
        ])
    }

    pub fn full_v1() -> Self {
        Self::from_pairs(&[
            (Field::TestName, &["LIS Test Name"]),
            (Field::Include, &["Include"]),
            (Field::Material, &["Material"]),
            (Field::Assay, &["Assay Name"]),
        ])
    }

    fn from_pairs(pairs: &[(Field, &[&str])]) -> Self {
        let columns = pairs
            .iter()
            .map(|(field, headers)| (*field, headers.iter().map(|h| h.to_string()).collect()))
            .collect();
        Self { columns }
    }

    /// Replaces the accepted headers of the fields present in `overrides`.
    /// A field this schema does not read is rejected and returned.
    pub fn with_overrides(
        mut self,
        overrides: BTreeMap<Field, Vec<String>>,
    ) -> Result<Self, Field> {
        if let Some(field) = overrides.keys().find(|f| !self.columns.contains_key(*f)) {
            return Err(*field);
        }
        for (field, headers) in overrides {
            if !headers.is_empty() {
                self.columns.insert(field, headers);
            }
        }
        Ok(self)
    }

    pub fn expected_headers(&self) -> Vec<String> {
        self.columns
            .values()
            .filter_map(|headers| headers.first().cloned())
            .collect()
    }

    /// Matches header text literally. Returns the expected header of every
    /// field that could not be located.
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnIndex, Vec<String>> {
        let mut positions = BTreeMap::new();
        let mut missing = Vec::new();
        for (field, accepted) in &self.columns {
            let found = accepted
                .iter()
                .find_map(|name| headers.iter().position(|h| h == name));
            match found {
                Some(idx) => {
                    positions.insert(*field, idx);
                }
                None => missing.push(accepted.first().cloned().unwrap_or_default()),
            }
        }
        if missing.is_empty() {
            Ok(ColumnIndex { positions })
        } else {
            Err(missing)
        }
    }
}
