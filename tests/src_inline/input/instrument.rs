use super::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!(
        "amr_reconcile_instrument_{}_{}",
        std::process::id(),
        id
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// The export is UTF-16LE with a BOM, the way the instrument writes it.
fn write_utf16le(path: &Path, contents: &str) {
    let mut bytes: Vec<u8> = vec![0xFF, 0xFE];
    for unit in contents.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(&bytes).unwrap();
}

// A compliant 340-field row, doubled delimiters and space-filled blanks,
// exactly as the instrument emits it.
fn make_export_line(accession: &str, timestamp: &str, wells: &[(&str, &str, &str)]) -> String {
    let mut fields = vec![" ".to_string(); INSTRUMENT_FIELD_COUNT];
    fields[ACCESSION_FIELD] = accession.to_string();
    fields[TIMESTAMP_FIELD] = timestamp.to_string();
    for (slot, (code, r1, r2)) in wells.iter().enumerate() {
        let base = WELL_BASE + slot * WELL_WIDTH;
        fields[base] = code.to_string();
        fields[base + 1] = r1.to_string();
        fields[base + 2] = r2.to_string();
    }
    fields.join("\t\t")
}

#[test]
fn test_clean_export_collapses_tab_runs() {
    assert_eq!(clean_export("a\t\t\tb\t\tc"), "a\tb\tc");
    assert_eq!(clean_export("a\tb"), "a\tb");
}

#[test]
fn test_clean_export_strips_nuls_after_collapsing() {
    assert_eq!(clean_export("a\u{0}b"), "ab");
    // NUL interrupts a tab run before collapsing, so both tabs survive.
    assert_eq!(clean_export("\t\u{0}\t"), "\t\t");
}

#[test]
fn test_load_instrument_utf16_roundtrip() {
    let dir = make_temp_dir();
    let path = dir.join("export.txt");
    let line = make_export_line(
        "19-001",
        "2019-03-15 10:30:00",
        &[("AMPICI", "0.25", "S")],
    );
    write_utf16le(&path, &line);

    let records = load_instrument(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields.len(), INSTRUMENT_FIELD_COUNT);
    assert_eq!(records[0].accession(), "19-001");
    assert_eq!(records[0].timestamp(), "2019-03-15 10:30:00");
    assert_eq!(records[0].field(WELL_BASE), "AMPICI");
}

#[test]
fn test_load_instrument_multiple_rows() {
    let dir = make_temp_dir();
    let path = dir.join("export.txt");
    let lines = format!(
        "{}\n{}\n",
        make_export_line("19-001", "2019-03-15 10:30:00", &[]),
        make_export_line("19-002", "2019-03-16 09:00:00", &[]),
    );
    write_utf16le(&path, &lines);

    let records = load_instrument(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].accession(), "19-002");
}

#[test]
fn test_short_row_accessors_stay_in_bounds() {
    let record = InstrumentRecord {
        fields: vec!["a".to_string(), "b".to_string()],
    };
    assert_eq!(record.accession(), "");
    assert_eq!(record.timestamp(), "");
}

#[test]
fn test_missing_export_is_io_error() {
    let dir = make_temp_dir();
    let err = load_instrument(&dir.join("nope.txt")).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}
