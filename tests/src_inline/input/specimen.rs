use super::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::UNIQUE_ID_COLUMN;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("amr_reconcile_specimen_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &std::path::Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

#[test]
fn test_load_specimens_basic() {
    let dir = make_temp_dir();
    let path = dir.join("master.csv");
    write_file(
        &path,
        "Accession #,Include,Animal Species\n19-001,yes,Cattle\n19-002,,Swine\n",
    );

    let table = load_specimens(&path).unwrap();
    assert_eq!(table.columns.len(), 3);
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.get(0, "Accession #"), "19-001");
    assert_eq!(table.get(1, "Animal Species"), "Swine");
    assert_eq!(table.get(0, "No Such Column"), "");
}

#[test]
fn test_load_specimens_ragged_row_is_parse_error() {
    let dir = make_temp_dir();
    let path = dir.join("master.csv");
    write_file(&path, "A,B,C\n1,2,3\n1,2\n");

    let err = load_specimens(&path).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let err = load_specimens(&dir.join("nope.csv")).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_max_id_suffix() {
    let table = SpecimenTable {
        columns: vec![UNIQUE_ID_COLUMN.to_string()],
        rows: vec![
            vec!["NY14853PPY20012".to_string()],
            vec!["NY14853PPY20007".to_string()],
            vec!["".to_string()],
            vec!["FREEFORM".to_string()],
        ],
    };
    assert_eq!(table.max_id_suffix(UNIQUE_ID_COLUMN), Some(12));
}

#[test]
fn test_max_id_suffix_absent_everywhere() {
    let table = SpecimenTable {
        columns: vec![UNIQUE_ID_COLUMN.to_string()],
        rows: vec![vec!["".to_string()], vec!["ABCD".to_string()]],
    };
    assert_eq!(table.max_id_suffix(UNIQUE_ID_COLUMN), None);
}

#[test]
fn test_max_id_suffix_short_value() {
    let table = SpecimenTable {
        columns: vec![UNIQUE_ID_COLUMN.to_string()],
        rows: vec![vec!["7".to_string()]],
    };
    assert_eq!(table.max_id_suffix(UNIQUE_ID_COLUMN), Some(7));
}

#[test]
fn test_set_materializes_missing_column() {
    let mut table = SpecimenTable {
        columns: vec!["Accession #".to_string()],
        rows: vec![vec!["19-001".to_string()], vec!["19-002".to_string()]],
    };
    table.set(1, "Date Tested", "3/15/2019".to_string());
    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.get(0, "Date Tested"), "");
    assert_eq!(table.get(1, "Date Tested"), "3/15/2019");
}
