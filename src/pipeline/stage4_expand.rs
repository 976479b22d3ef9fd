use tracing::{error, warn};

use crate::error::PipelineError;
use crate::panels::DrugPanel;
use crate::pipeline::JoinedRow;

/// Reindexes each row's sparse, instrument-order triplets onto the panel's
/// fixed order: a 3N block, empty-initialized, with triplet values written
/// at the slot of their code's panel position. A code the panel does not
/// know is unrecoverable. Panel entries the row never filled produce
/// missing-ATB/MIC warnings and stay blank.
pub fn expand_rows(
    label: &str,
    rows: &[JoinedRow],
    panel: &DrugPanel,
) -> Result<Vec<Vec<String>>, PipelineError> {
    rows.iter().map(|row| expand_row(label, row, panel)).collect()
}

fn expand_row(
    label: &str,
    row: &JoinedRow,
    panel: &DrugPanel,
) -> Result<Vec<String>, PipelineError> {
    let mut block = vec![String::new(); panel.len() * 3];

    for (offset, triplet) in row.triplets.iter().enumerate() {
        let Some(slot) = panel.index_of(&triplet.code) else {
            error!(
                "encountered unknown drug '{}' in partition '{}' data for Accession # {}",
                triplet.code, label, row.accession
            );
            return Err(PipelineError::UnknownDrug {
                code: triplet.code.clone(),
                partition: label.to_string(),
                accession: row.accession.clone(),
                offset,
            });
        };
        let base = slot * 3;
        block[base] = triplet.code.clone();
        block[base + 1] = triplet.reading1.clone();
        block[base + 2] = triplet.reading2.clone();
    }

    for (i, code) in panel.codes.iter().enumerate() {
        let atb = block[i * 3].trim();
        let mic = block[i * 3 + 1].trim();
        if atb.is_empty() {
            warn!("Accession # {} is missing ATB '{}'", row.accession, code);
        } else if mic.is_empty() {
            warn!(
                "Accession # {} is missing MIC for ATB '{}'",
                row.accession, code
            );
        }
    }

    Ok(row.lead.iter().cloned().chain(block).collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_expand.rs"]
mod tests;
