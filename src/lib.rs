//! Normalization and merge logic for the LIS test-name base dictionary.
//!
//! Tabular input (a CSV of new-test requests, or one sheet of a dictionary
//! workbook) is turned into a map from uppercased LIS test name to
//! [`model::DictionaryEntry`], either merged onto an existing dictionary or
//! built from scratch.

pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
