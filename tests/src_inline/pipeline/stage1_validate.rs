use super::*;

use crate::input::instrument::TIMESTAMP_FIELD;

fn make_record(accession: &str, timestamp: &str, wells: &[(&str, &str, &str)]) -> InstrumentRecord {
    let mut fields = vec![" ".to_string(); INSTRUMENT_FIELD_COUNT];
    fields[6] = accession.to_string();
    fields[TIMESTAMP_FIELD] = timestamp.to_string();
    for (slot, (code, r1, r2)) in wells.iter().enumerate() {
        let base = WELL_BASE + slot * WELL_WIDTH;
        fields[base] = code.to_string();
        fields[base + 1] = r1.to_string();
        fields[base + 2] = r2.to_string();
    }
    InstrumentRecord { fields }
}

#[test]
fn test_all_violating_rows_counted() {
    let good = make_record("19-001", "2019-03-15 10:30:00", &[]);
    let short = InstrumentRecord {
        fields: vec!["x".to_string(); 10],
    };
    let long = InstrumentRecord {
        fields: vec!["x".to_string(); INSTRUMENT_FIELD_COUNT + 1],
    };

    let err = run_stage1(&[good, short, long]).unwrap_err();
    match err {
        PipelineError::Structure(count) => assert_eq!(count, 2),
        other => panic!("expected Structure, got {other:?}"),
    }
    assert_eq!(PipelineError::Structure(2).exit_code(), 2);
}

#[test]
fn test_consolidation_skips_blank_wells() {
    let record = make_record(
        "19-001",
        "2019-03-15 10:30:00",
        &[
            ("AMPICI", "0.25", "S"),
            (" ", " ", " "),
            ("TETRA", "2", "R"),
        ],
    );
    let streams = run_stage1(&[record]).unwrap();
    assert_eq!(streams.len(), 1);
    let stream = &streams[0];
    assert_eq!(stream.date_tested, "3/15/2019");
    assert_eq!(stream.triplets.len(), 2);
    assert_eq!(stream.triplets[0].code, "AMPICI");
    assert_eq!(stream.triplets[1].code, "TETRA");
}

#[test]
fn test_partially_blank_well_is_retained() {
    let record = make_record("19-001", "2019-03-15 10:30:00", &[(" ", " ", "R")]);
    let streams = run_stage1(&[record]).unwrap();
    assert_eq!(streams[0].triplets.len(), 1);
    assert_eq!(streams[0].triplets[0].code, " ");
    assert_eq!(streams[0].triplets[0].reading2, "R");
}

#[test]
fn test_well_order_is_preserved() {
    let record = make_record(
        "19-001",
        "2019-03-15 10:30:00",
        &[("TYLO", "4", ""), ("AMPICI", "0.25", "S")],
    );
    let streams = run_stage1(&[record]).unwrap();
    let codes: Vec<&str> = streams[0]
        .triplets
        .iter()
        .map(|t| t.code.as_str())
        .collect();
    assert_eq!(codes, vec!["TYLO", "AMPICI"]);
}

#[test]
fn test_date_formatting_drops_leading_zeros() {
    assert_eq!(format_test_date("2019-03-05 08:01:02"), "3/5/2019");
    assert_eq!(format_test_date("2019-11-25 23:59:59"), "11/25/2019");
}

#[test]
fn test_unparseable_timestamp_passes_through() {
    assert_eq!(format_test_date("not a date"), "not a date");
    assert_eq!(format_test_date("  2019-03-05 08:01:02  "), "3/5/2019");
}
