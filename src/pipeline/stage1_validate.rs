use chrono::NaiveDateTime;
use tracing::{error, warn};

use crate::error::PipelineError;
use crate::input::instrument::{
    INSTRUMENT_FIELD_COUNT, InstrumentRecord, WELL_BASE, WELL_COUNT, WELL_WIDTH,
};
use crate::pipeline::{DrugStream, Triplet};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Validates the structural contract of the instrument export and derives
/// a consolidated drug stream per row. Every violating row is reported
/// before the run terminates.
pub fn run_stage1(records: &[InstrumentRecord]) -> Result<Vec<DrugStream>, PipelineError> {
    let mut violations = 0usize;
    for (idx, record) in records.iter().enumerate() {
        if record.fields.len() != INSTRUMENT_FIELD_COUNT {
            error!(
                "instrument row {} has {} fields, expected {}",
                idx,
                record.fields.len(),
                INSTRUMENT_FIELD_COUNT
            );
            violations += 1;
        }
    }
    if violations > 0 {
        return Err(PipelineError::Structure(violations));
    }

    Ok(records.iter().map(consolidate).collect())
}

/// Scans the 100 fixed-offset wells and keeps a triplet only when at least
/// one of its three values is non-blank after trimming. Blank wells are
/// skipped, not zero-filled; panel expansion later restores fixed widths.
pub fn consolidate(record: &InstrumentRecord) -> DrugStream {
    let mut triplets = Vec::new();
    for slot in 0..WELL_COUNT {
        let base = WELL_BASE + slot * WELL_WIDTH;
        let code = record.field(base);
        let reading1 = record.field(base + 1);
        let reading2 = record.field(base + 2);
        if code.trim().is_empty() && reading1.trim().is_empty() && reading2.trim().is_empty() {
            continue;
        }
        triplets.push(Triplet {
            code: code.to_string(),
            reading1: reading1.to_string(),
            reading2: reading2.to_string(),
        });
    }

    DrugStream {
        date_tested: format_test_date(record.timestamp()),
        triplets,
    }
}

/// `2019-03-15 10:30:00` becomes `3/15/2019`. An unparseable timestamp is
/// carried through raw with a warning; it must not sink the whole run.
pub fn format_test_date(raw: &str) -> String {
    let trimmed = raw.trim();
    match NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT) {
        Ok(dt) => dt.format(DATE_FORMAT).to_string(),
        Err(_) => {
            warn!("unparseable test timestamp '{}'; keeping raw value", trimmed);
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
