use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::panels::{DrugPanel, PanelDictionary, PanelRouting};
use crate::pipeline::stage4_expand::expand_rows;
use crate::pipeline::{JoinedRow, Partition};

/// Groups joined rows by species and directs each group to the expander
/// with its panel. Sub-partitioned species split by organism match and
/// merge under the sub-partition labels; the parent key emits no file of
/// its own. Group and label ordering follow first appearance in the data.
pub fn run_stage3(
    rows: Vec<JoinedRow>,
    dictionary: &PanelDictionary,
) -> Result<Vec<Partition>, PipelineError> {
    let (species_order, mut groups) = group_by_species(rows);

    for species in &species_order {
        info!("species '{}': {} rows", species, groups[species].len());
    }

    let mut label_order: Vec<String> = Vec::new();
    let mut merged: HashMap<String, Vec<Vec<String>>> = HashMap::new();
    let mut emit = |label: &str, expanded: Vec<Vec<String>>, order: &mut Vec<String>| {
        if !merged.contains_key(label) {
            order.push(label.to_string());
        }
        merged.entry(label.to_string()).or_default().extend(expanded);
    };

    for species in &species_order {
        let group = groups.remove(species).unwrap_or_default();
        match dictionary.lookup(species) {
            None => {
                warn!(
                    "no drug dictionary entry for species '{}'; dropping {} rows",
                    species,
                    group.len()
                );
            }
            Some(PanelRouting::Flat(panel)) => {
                if skip_empty_panel(species, panel) {
                    continue;
                }
                let expanded = expand_rows(species, &group, panel)?;
                emit(species.as_str(), expanded, &mut label_order);
            }
            Some(PanelRouting::ByOrganism(partitions)) => {
                let mut routed = 0usize;
                for part in partitions {
                    if skip_empty_panel(part.label, &part.panel) {
                        continue;
                    }
                    let selected: Vec<JoinedRow> = group
                        .iter()
                        .filter(|row| part.organism.is_match(&row.organism))
                        .cloned()
                        .collect();
                    routed += selected.len();
                    let expanded = expand_rows(part.label, &selected, &part.panel)?;
                    emit(part.label, expanded, &mut label_order);
                }
                // Rows matching no sub-partition fall out of the output.
                let unrouted = group.len().saturating_sub(routed);
                if unrouted > 0 {
                    debug!(
                        "species '{}': {} rows matched no organism partition",
                        species, unrouted
                    );
                }
            }
        }
    }

    Ok(label_order
        .into_iter()
        .map(|label| {
            let rows = merged.remove(&label).unwrap_or_default();
            Partition { label, rows }
        })
        .collect())
}

fn group_by_species(rows: Vec<JoinedRow>) -> (Vec<String>, HashMap<String, Vec<JoinedRow>>) {
    let mut order = Vec::new();
    let mut groups: HashMap<String, Vec<JoinedRow>> = HashMap::new();
    for row in rows {
        if !groups.contains_key(&row.species) {
            order.push(row.species.clone());
        }
        groups.entry(row.species.clone()).or_default().push(row);
    }
    (order, groups)
}

fn skip_empty_panel(label: &str, panel: &DrugPanel) -> bool {
    if panel.is_empty() {
        warn!("Species '{}' has no drug map", label);
        return true;
    }
    false
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_route.rs"]
mod tests;
