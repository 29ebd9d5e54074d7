use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;
use rust_xlsxwriter::Workbook;

use super::base::{DictionaryCache, hash_bytes, load_base_dictionary};
use super::delimited::read_csv_table;
use super::workbook::{list_sheets, read_sheet_table};
use super::{CellValue, InputError, load_schema_overrides};
use crate::model::Field;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("lis_basedict_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

const FORM_CSV: &str = "\
Timestamp,Customer's LIS test name,Material for the LIS test,Corresponding Roche assay names
2024-01-02,glucose,Serum,\"GLU,NA,HBA1C\"
,,,
2024-01-03,Hep B,,NA
2024-01-04,short
";

#[test]
fn test_csv_table_reads_quoted_and_ragged_rows() {
    let dir = make_temp_dir();
    let path = dir.join("new_tests.csv");
    write_file(&path, FORM_CSV);

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers.len(), 4);
    assert_eq!(table.headers[1], "Customer's LIS test name");
    assert_eq!(table.n_rows(), 3);

    assert_eq!(table.rows[0][3], CellValue::text("GLU,NA,HBA1C"));
    assert_eq!(table.rows[1][2], CellValue::Empty);
    assert_eq!(table.rows[1][3].as_text(), Some("NA"));
    assert_eq!(table.rows[2].len(), 4);
    assert!(table.rows[2][3].is_empty());
    assert_eq!(table.row_number(0), 2);
    assert_eq!(table.row_number(1), 4);
}

#[test]
fn test_csv_gz_and_bom_header() {
    let dir = make_temp_dir();
    let path = dir.join("new_tests.csv.gz");
    write_gz(&path, "\u{feff}LISName,Material,AssayName\nCBC,Blood,CBC\n");

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.headers, vec!["LISName", "Material", "AssayName"]);
    assert_eq!(table.rows[0][0].as_text(), Some("CBC"));
}

#[test]
fn test_csv_without_header_fails() {
    let dir = make_temp_dir();
    let path = dir.join("empty.csv");
    write_file(&path, "");
    assert!(matches!(
        read_csv_table(&path),
        Err(InputError::MissingHeader { .. })
    ));
    assert!(matches!(
        read_csv_table(&dir.join("absent.csv")),
        Err(InputError::Io { .. })
    ));
}

fn write_dictionary_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    {
        let notes = workbook.add_worksheet();
        notes.set_name("Notes").unwrap();
        notes.write_string(0, 0, "read me").unwrap();
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Dictionary").unwrap();
        for (col, header) in ["LIS Test Name", "Include", "Material", "Assay Name"]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_string(1, 0, "Glucose").unwrap();
        sheet.write_number(1, 1, 1.0).unwrap();
        sheet.write_string(1, 2, "Serum").unwrap();
        sheet.write_string(1, 3, "GLU").unwrap();
        sheet.write_string(3, 0, "Hep B").unwrap();
        sheet.write_number(3, 1, 0.0).unwrap();
        sheet.write_string(3, 3, "NA").unwrap();
    }
    workbook.save(path).unwrap();
}

#[test]
fn test_workbook_sheets_listed_in_order() {
    let dir = make_temp_dir();
    let path = dir.join("dictionary.xlsx");
    write_dictionary_workbook(&path);

    assert_eq!(list_sheets(&path).unwrap(), vec!["Notes", "Dictionary"]);
}

#[test]
fn test_workbook_sheet_table_cells() {
    let dir = make_temp_dir();
    let path = dir.join("dictionary.xlsx");
    write_dictionary_workbook(&path);

    let table = read_sheet_table(&path, "Dictionary").unwrap();
    assert_eq!(
        table.headers,
        vec!["LIS Test Name", "Include", "Material", "Assay Name"]
    );
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.rows[0][0].as_text(), Some("Glucose"));
    assert_eq!(table.rows[0][1].render().as_deref(), Some("1"));
    assert!(table.rows[1][2].is_empty());
    assert_eq!(table.rows[1][3].as_text(), Some("NA"));
    assert_eq!(table.row_number(1), 4);
}

#[test]
fn test_workbook_unknown_sheet_lists_available() {
    let dir = make_temp_dir();
    let path = dir.join("dictionary.xlsx");
    write_dictionary_workbook(&path);

    let err = read_sheet_table(&path, "Sheet1").unwrap_err();
    assert!(matches!(err, InputError::UnknownSheet { .. }));
    assert!(err.to_string().contains("Notes, Dictionary"));
}

#[test]
fn test_cell_render() {
    assert_eq!(CellValue::Float(3.0).render().as_deref(), Some("3"));
    assert_eq!(CellValue::Float(2.5).render().as_deref(), Some("2.5"));
    assert_eq!(CellValue::Int(-4).render().as_deref(), Some("-4"));
    assert_eq!(CellValue::Empty.render(), None);
    assert_eq!(CellValue::text(""), CellValue::Empty);
}

const BASE_JSON: &str = concat!(
    r#"{"CBC":{"Include":1,"Material":"Blood","Assay Name":["CBC"]},"#,
    r#""K":{"Include":0,"Material":"Serum","Assay Name":[" "]}}"#
);

#[test]
fn test_base_dictionary_load() {
    let dir = make_temp_dir();
    let path = dir.join("base_dict.json");
    write_file(&path, BASE_JSON);

    let dict = load_base_dictionary(&path).unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get("K").unwrap().include, 0);

    write_file(&path, "[1, 2]");
    assert!(matches!(
        load_base_dictionary(&path),
        Err(InputError::Json { .. })
    ));
}

#[test]
fn test_dictionary_cache_reuses_until_content_changes() {
    let dir = make_temp_dir();
    let path = dir.join("base_dict.json");
    write_file(&path, BASE_JSON);

    let mut cache = DictionaryCache::new();
    let first = cache.load(&path).unwrap();
    let second = cache.load(&path).unwrap();
    assert_eq!(first, second);

    write_file(&path, r#"{"NEW":{"Include":1,"Material":"","Assay Name":["X"]}}"#);
    let third = cache.load(&path).unwrap();
    assert!(third.get("NEW").is_some());
    assert!(third.get("CBC").is_none());

    assert!(cache.invalidate(&path));
    assert!(!cache.invalidate(&path));
    assert_eq!(cache.load(&path).unwrap(), third);
}

#[test]
fn test_hash_bytes_fnv() {
    assert_eq!(hash_bytes(b""), 0xcbf29ce484222325);
    assert_ne!(hash_bytes(b"CBC"), hash_bytes(b"CBD"));
}

#[test]
fn test_schema_overrides_file() {
    let dir = make_temp_dir();
    let path = dir.join("schema.json");
    write_file(&path, r#"{"test_name": ["Test", "LIS Test Name"], "assay": ["Assays"]}"#);

    let overrides = load_schema_overrides(&path).unwrap();
    assert_eq!(overrides.len(), 2);
    assert_eq!(overrides[&Field::Assay], vec!["Assays"]);

    write_file(&path, r#"{"specimen": ["Tube"]}"#);
    assert!(matches!(
        load_schema_overrides(&path),
        Err(InputError::Json { .. })
    ));
}
