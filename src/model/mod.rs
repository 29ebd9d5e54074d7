pub mod dictionary;
pub mod entry;
pub mod schema;

pub use dictionary::{BaseDictionary, dictionary_key};
pub use entry::DictionaryEntry;
pub use schema::{ColumnIndex, ColumnSchema, Field};

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
