use std::collections::{BTreeMap, HashMap};

use tracing::{info, warn};

use crate::config::{
    ACCESSION_COLUMN, ID_SUFFIX_WIDTH, LAB_NAME_COLUMN, ORGANISM_COLUMN, PROGRAM_NAME_COLUMN,
    REACCESSION_COLUMN, RunConfig, SEROTYPE_COLUMN, SPECIES_COLUMN, UNIQUE_ID_COLUMN,
};
use crate::error::PipelineError;
use crate::input::instrument::InstrumentRecord;
use crate::input::specimen::SpecimenTable;
use crate::pipeline::{DrugStream, JoinedRow};

#[derive(Debug)]
pub struct Stage2Output {
    pub rows: Vec<JoinedRow>,
    /// Accession -> freshly generated unique specimen ID.
    pub ids: BTreeMap<String, String>,
    /// Accession -> formatted test date from the matched instrument row.
    pub dates: BTreeMap<String, String>,
}

/// Joins included specimens to instrument records by accession and assigns
/// unique specimen IDs in specimen-file row order.
pub fn run_stage2(
    specimens: &SpecimenTable,
    instruments: &[InstrumentRecord],
    streams: &[DrugStream],
    config: &RunConfig,
) -> Result<Stage2Output, PipelineError> {
    let mut next_number = specimens
        .max_id_suffix(UNIQUE_ID_COLUMN)
        .map_or(1, |max| max + 1);
    let padded = format!("{:0width$}", next_number, width = ID_SUFFIX_WIDTH);
    info!("starting number will be {}", padded);

    let index = accession_index(instruments);
    let prefix = config.unique_name_prefix();

    let included: Vec<usize> = (0..specimens.n_rows())
        .filter(|&row| {
            specimens
                .get(row, &config.include_header)
                .eq_ignore_ascii_case("yes")
        })
        .collect();
    info!("{} accessions will be included", included.len());

    let mut rows = Vec::with_capacity(included.len());
    let mut ids = BTreeMap::new();
    let mut dates = BTreeMap::new();

    for row in included {
        let accession = resolve_join_key(specimens, row)?;
        let organism = specimens.get(row, ORGANISM_COLUMN).to_string();

        // Salmonella submissions are unusable without a serotype; drop them
        // rather than fail the run. Dropped rows consume no ID.
        if organism.contains("Salmonella")
            && specimens.get(row, SEROTYPE_COLUMN).trim().is_empty()
        {
            warn!(
                "Accession #{} is Salmonella but is missing Serotype",
                accession
            );
            continue;
        }

        let Some(&instrument_row) = index.get(accession.as_str()) else {
            return Err(PipelineError::UnresolvedJoin(accession));
        };

        let unique_id = format!("{}{:0width$}", prefix, next_number, width = ID_SUFFIX_WIDTH);
        next_number += 1;

        let stream = &streams[instrument_row];
        let mut lead: Vec<String> = config
            .output_headers
            .iter()
            .map(|header| match header.as_str() {
                LAB_NAME_COLUMN => non_blank_or(specimens.get(row, header), &config.lab_name),
                PROGRAM_NAME_COLUMN => {
                    non_blank_or(specimens.get(row, header), &config.program_name)
                }
                UNIQUE_ID_COLUMN => unique_id.clone(),
                _ => specimens.get(row, header).to_string(),
            })
            .collect();
        lead.push(stream.date_tested.clone());

        ids.insert(accession.clone(), unique_id);
        dates.insert(accession.clone(), stream.date_tested.clone());

        rows.push(JoinedRow {
            accession,
            species: specimens.get(row, SPECIES_COLUMN).to_string(),
            organism,
            lead,
            triplets: stream.triplets.clone(),
        });
    }

    Ok(Stage2Output { rows, ids, dates })
}

/// Accession -> instrument row index, built once. First occurrence wins,
/// matching the join contract of "first matching record".
pub fn accession_index(instruments: &[InstrumentRecord]) -> HashMap<&str, usize> {
    let mut index = HashMap::new();
    for (row, record) in instruments.iter().enumerate() {
        index.entry(record.accession()).or_insert(row);
    }
    index
}

/// The identifier column, falling back to the reaccession column when
/// blank. A specimen with neither cannot be joined at all.
pub fn resolve_join_key(specimens: &SpecimenTable, row: usize) -> Result<String, PipelineError> {
    let primary = specimens.get(row, ACCESSION_COLUMN);
    if !primary.is_empty() {
        return Ok(primary.to_string());
    }
    let secondary = specimens.get(row, REACCESSION_COLUMN);
    if !secondary.is_empty() {
        return Ok(secondary.to_string());
    }
    Err(PipelineError::BlankAccession(row))
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_reconcile.rs"]
mod tests;
