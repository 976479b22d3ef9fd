pub mod defs;

use regex::Regex;

use crate::error::PipelineError;
use defs::{RoutingDef, builtin_dictionary};

/// Ordered list of expected drug codes for one partition. Order is the
/// canonical output column order.
#[derive(Debug, Clone)]
pub struct DrugPanel {
    pub codes: Vec<&'static str>,
}

impl DrugPanel {
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|&c| c == code)
    }
}

#[derive(Debug, Clone)]
pub struct OrganismPartition {
    pub label: &'static str,
    pub organism: Regex,
    pub panel: DrugPanel,
}

/// A species key resolves to either one flat panel or a set of
/// organism-qualified sub-partitions.
#[derive(Debug, Clone)]
pub enum PanelRouting {
    Flat(DrugPanel),
    ByOrganism(Vec<OrganismPartition>),
}

#[derive(Debug, Clone)]
pub struct PanelDictionary {
    entries: Vec<(&'static str, PanelRouting)>,
}

impl PanelDictionary {
    pub fn lookup(&self, species: &str) -> Option<&PanelRouting> {
        self.entries
            .iter()
            .find(|(key, _)| *key == species)
            .map(|(_, routing)| routing)
    }

    pub fn species_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }
}

/// Compiles the built-in dictionary. Organism patterns are compiled once
/// here rather than per row.
pub fn load_dictionary() -> Result<PanelDictionary, PipelineError> {
    let mut entries = Vec::new();
    for def in builtin_dictionary() {
        let routing = match def.routing {
            RoutingDef::Flat(drugs) => PanelRouting::Flat(DrugPanel {
                codes: drugs.to_vec(),
            }),
            RoutingDef::ByOrganism(partitions) => {
                let mut compiled = Vec::with_capacity(partitions.len());
                for part in partitions {
                    let organism = Regex::new(part.organism_pattern).map_err(|source| {
                        PipelineError::Pattern {
                            pattern: part.organism_pattern.to_string(),
                            source,
                        }
                    })?;
                    compiled.push(OrganismPartition {
                        label: part.label,
                        organism,
                        panel: DrugPanel {
                            codes: part.drugs.to_vec(),
                        },
                    });
                }
                PanelRouting::ByOrganism(compiled)
            }
        };
        entries.push((def.species, routing));
    }
    Ok(PanelDictionary { entries })
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/tests.rs"]
mod tests;
