use std::fs::File;
use std::path::Path;

use crate::error::PipelineError;

/// The curated specimen spreadsheet: a header row plus one record per
/// specimen. Column order matters, so rows stay positional and lookups go
/// through the header.
#[derive(Debug, Clone)]
pub struct SpecimenTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SpecimenTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value of `name` for row `row`; empty when the column is absent.
    pub fn get(&self, row: usize, name: &str) -> &str {
        match self.column_index(name) {
            Some(idx) => self.rows[row].get(idx).map(|s| s.as_str()).unwrap_or(""),
            None => "",
        }
    }

    /// Sets `name` for row `row`, materializing the column when the source
    /// spreadsheet did not carry it.
    pub fn set(&mut self, row: usize, name: &str, value: String) {
        let idx = self.ensure_column(name);
        self.rows[row][idx] = value;
    }

    fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for r in &mut self.rows {
            r.push(String::new());
        }
        self.columns.len() - 1
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Highest numeric value among the trailing four characters of the given
    /// column, across all rows. Non-numeric and blank suffixes are ignored.
    /// This is what seeds the unique-ID counter.
    pub fn max_id_suffix(&self, column: &str) -> Option<u32> {
        let idx = self.column_index(column)?;
        let mut max: Option<u32> = None;
        for row in &self.rows {
            let value = row.get(idx).map(|s| s.as_str()).unwrap_or("");
            let chars: Vec<char> = value.chars().collect();
            let start = chars.len().saturating_sub(4);
            let tail: String = chars[start..].iter().collect();
            if let Ok(n) = tail.trim().parse::<u32>() {
                max = Some(max.map_or(n, |m| m.max(n)));
            }
        }
        max
    }
}

pub fn load_specimens(path: &Path) -> Result<SpecimenTable, PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| parse_err(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| parse_err(path, e))?;
        let mut row: Vec<String> = record.iter().map(|f| f.to_string()).collect();
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    Ok(SpecimenTable { columns, rows })
}

fn parse_err(path: &Path, e: csv::Error) -> PipelineError {
    PipelineError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/specimen.rs"]
mod tests;
