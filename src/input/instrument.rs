use std::path::Path;

use crate::error::PipelineError;

/// Compliant Sensititre export rows carry exactly this many tab-delimited
/// fields: 40 leading sample/run fields plus 100 wells of 3 values each.
pub const INSTRUMENT_FIELD_COUNT: usize = 340;

/// Join key: the accession/name field of the export.
pub const ACCESSION_FIELD: usize = 6;

/// Timestamp of the test run, `YYYY-MM-DD HH:MM:SS`.
pub const TIMESTAMP_FIELD: usize = 39;

pub const WELL_BASE: usize = 40;
pub const WELL_COUNT: usize = 100;
pub const WELL_WIDTH: usize = 3;

/// One raw row of the instrument export. Field count is validated later;
/// accessors tolerate short rows so violators can still be reported.
#[derive(Debug, Clone)]
pub struct InstrumentRecord {
    pub fields: Vec<String>,
}

impl InstrumentRecord {
    pub fn accession(&self) -> &str {
        self.field(ACCESSION_FIELD)
    }

    pub fn timestamp(&self) -> &str {
        self.field(TIMESTAMP_FIELD)
    }

    pub fn field(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|s| s.as_str()).unwrap_or("")
    }
}

/// Reads the instrument export. The file is UTF-16 encoded and needs two
/// cleanups before it parses as tab-delimited text: runs of consecutive
/// tabs collapse to one, and embedded NUL characters are dropped. Blank
/// well positions in a compliant export hold a single space, which is what
/// keeps the field count at 340 through the collapse.
pub fn load_instrument(path: &Path) -> Result<Vec<InstrumentRecord>, PipelineError> {
    let bytes = std::fs::read(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (text, _, _) = encoding_rs::UTF_16LE.decode(&bytes);
    let cleaned = clean_export(&text);
    parse_export(&cleaned).map_err(|e| PipelineError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Collapses consecutive tabs, then strips NULs, in that order.
pub fn clean_export(raw: &str) -> String {
    let mut collapsed = String::with_capacity(raw.len());
    let mut prev_tab = false;
    for ch in raw.chars() {
        if ch == '\t' {
            if prev_tab {
                continue;
            }
            prev_tab = true;
        } else {
            prev_tab = false;
        }
        collapsed.push(ch);
    }
    collapsed.chars().filter(|&c| c != '\u{0}').collect()
}

fn parse_export(text: &str) -> Result<Vec<InstrumentRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(InstrumentRecord {
            fields: record.iter().map(|f| f.to_string()).collect(),
        });
    }
    Ok(records)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/instrument.rs"]
mod tests;
