use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::{
    ACCESSION_COLUMN, DATE_TESTED_COLUMN, ORGANISM_COLUMN, REACCESSION_COLUMN, RunConfig,
    SPECIES_COLUMN, UNIQUE_ID_COLUMN,
};
use crate::error::PipelineError;
use crate::input::specimen::SpecimenTable;

/// Cumulative tallies over rows that carry a unique specimen ID after
/// back-annotation.
#[derive(Debug, Serialize)]
pub struct Stage5Output {
    pub counts: BTreeMap<String, usize>,
    pub total: usize,
}

/// Rewrites the master table in place: included rows sort first (then by
/// accession), freshly assigned IDs and test dates land in their columns,
/// and the include flag is cleared everywhere. Overwriting a value already
/// present in the source data is a conflict, not an update; rerunning
/// against annotated data must fail here instead of re-assigning IDs.
pub fn run_stage5(
    table: &mut SpecimenTable,
    ids: &BTreeMap<String, String>,
    dates: &BTreeMap<String, String>,
    config: &RunConfig,
) -> Result<Stage5Output, PipelineError> {
    sort_rows(table, &config.include_header);

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total = 0usize;

    for row in 0..table.n_rows() {
        let key = join_key(table, row);

        if let Some(new_id) = ids.get(&key) {
            if !table.get(row, UNIQUE_ID_COLUMN).is_empty() {
                return Err(PipelineError::Overwrite {
                    field: UNIQUE_ID_COLUMN,
                    accession: key,
                });
            }
            table.set(row, UNIQUE_ID_COLUMN, new_id.clone());
        }

        if let Some(new_date) = dates.get(&key) {
            if !table.get(row, DATE_TESTED_COLUMN).is_empty() {
                return Err(PipelineError::Overwrite {
                    field: DATE_TESTED_COLUMN,
                    accession: key,
                });
            }
            table.set(row, DATE_TESTED_COLUMN, new_date.clone());
        }

        table.set(row, &config.include_header, String::new());

        if !table.get(row, UNIQUE_ID_COLUMN).is_empty() {
            total += 1;
            let label = count_label(
                table.get(row, SPECIES_COLUMN),
                table.get(row, ORGANISM_COLUMN),
            );
            *counts.entry(label).or_insert(0) += 1;
        }
    }

    Ok(Stage5Output { counts, total })
}

/// Included rows (any non-blank flag value) first, then accession
/// ascending; the sort is stable so ties keep source order.
fn sort_rows(table: &mut SpecimenTable, include_header: &str) {
    fn cell<'a>(row: &'a [String], idx: Option<usize>) -> &'a str {
        idx.and_then(|i| row.get(i)).map(|s| s.as_str()).unwrap_or("")
    }
    let include_idx = table.column_index(include_header);
    let accession_idx = table.column_index(ACCESSION_COLUMN);
    table.rows.sort_by(|a, b| {
        let a_key = (cell(a, include_idx).is_empty(), cell(a, accession_idx));
        let b_key = (cell(b, include_idx).is_empty(), cell(b, accession_idx));
        a_key.cmp(&b_key)
    });
}

fn join_key(table: &SpecimenTable, row: usize) -> String {
    let primary = table.get(row, ACCESSION_COLUMN);
    if !primary.is_empty() {
        return primary.to_string();
    }
    table.get(row, REACCESSION_COLUMN).to_string()
}

/// Organism grouping for the cumulative counts: serotyped Salmonella and
/// Staphylococcus strains collapse into one bucket each.
fn count_label(species: &str, organism: &str) -> String {
    let group = if organism.contains("Salmonella species") {
        "Salmonella species"
    } else if organism.contains("Staphylococcus") {
        "Staphylococcus"
    } else {
        organism
    };
    format!("{} - {}", species, group)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_annotate.rs"]
mod tests;
