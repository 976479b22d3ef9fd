//! Built-in drug panel dictionary for the pilot's species and plate types.

#[derive(Debug, Clone, Copy)]
pub struct SpeciesDef {
    pub species: &'static str,
    pub routing: RoutingDef,
}

#[derive(Debug, Clone, Copy)]
pub enum RoutingDef {
    /// Every row of the species expands against one panel.
    Flat(&'static [&'static str]),
    /// Rows split by organism match, each partition with its own panel.
    ByOrganism(&'static [PartitionDef]),
}

#[derive(Debug, Clone, Copy)]
pub struct PartitionDef {
    pub label: &'static str,
    pub organism_pattern: &'static str,
    pub drugs: &'static [&'static str],
}

const BOVINE_PORCINE: &[&str] = &[
    "AMPICI", "CEFTIF", "CLINDA", "DANOFL", "ENROFL", "FLORFE", "GAMITH", "GENTAM", "NEOMYC",
    "PENICI", "SDIMET", "SPECT", "TETRA", "TIAMUL", "TILMIC", "TILDIP", "TRISUL", "TULATH", "TYLO",
];

const AVIAN: &[&str] = &[
    "AMOXIC", "CEFTIF", "CLINDA", "ENROFL", "ERYTH", "FLORFE", "GENTAM", "NEOMYC", "NOVOBI",
    "OXYTET", "PENICI", "SDIMET", "SPECT", "STREPT", "SULTHI", "TETRA", "TRISUL", "TYLO",
];

const EQUINE: &[&str] = &[
    "AMIKAC", "AMPICI", "AZITHR", "CEFAZO", "CEFTAZ", "CEFTIF", "CHLORA", "CLARYT", "DOXYCY",
    "ENROFL", "ERYTH", "GENTAM", "IMIPEN", "OXACIL", "PENICI", "RIFAMP", "TETRA", "TICARC",
    "TICCLA", "TRISUL",
];

const COMPANION_GRAM_NEGATIVE: &[&str] = &[
    "AMIKAC", "AMOCLA", "AMPICI", "CEFAZO", "CEFOVE", "CEFPOD", "CEFTAZ", "CEPALE", "CHLORA",
    "DOXYCY", "ENROFL", "GENTAM", "IMIPEN", "MARBOF", "ORBIFL", "PIPTAZ", "PRADOF", "TETRA",
    "TRISUL",
];

const COMPANION_GRAM_POSITIVE: &[&str] = &[
    "AMIKAC", "AMOCLA", "AMPICI", "CEFAZO", "CEFOVE", "CEFPOD", "CEPHAL", "CHLORA", "CLINDA",
    "DOXYCY", "ENROFL", "ERYTH", "GENTAM", "IMIPEN", "MARBOF", "MINOCY", "NITRO", "OXACIL",
    "PENICI", "PRADOF", "RIFAMP", "TETRA", "TRISUL", "VANCOM",
];

// Dog and Cat isolates run on the same companion-animal plates, so both
// species route into the shared dog-cat partitions and their output merges
// under the partition labels.
const DOG_CAT_PARTITIONS: &[PartitionDef] = &[
    PartitionDef {
        label: "dog-cat GN",
        organism_pattern: "Escherichia coli",
        drugs: COMPANION_GRAM_NEGATIVE,
    },
    PartitionDef {
        label: "dog-cat GP",
        organism_pattern: "Staphylococcus",
        drugs: COMPANION_GRAM_POSITIVE,
    },
];

const BUILTIN_DICTIONARY: &[SpeciesDef] = &[
    SpeciesDef {
        species: "Cattle",
        routing: RoutingDef::Flat(BOVINE_PORCINE),
    },
    SpeciesDef {
        species: "Swine",
        routing: RoutingDef::Flat(BOVINE_PORCINE),
    },
    SpeciesDef {
        species: "Poultry-domestic chicken",
        routing: RoutingDef::Flat(AVIAN),
    },
    SpeciesDef {
        species: "Poultry-domestic turkey",
        routing: RoutingDef::Flat(AVIAN),
    },
    SpeciesDef {
        species: "Poultry-domestic duck",
        routing: RoutingDef::Flat(AVIAN),
    },
    SpeciesDef {
        species: "Equine",
        routing: RoutingDef::Flat(EQUINE),
    },
    SpeciesDef {
        species: "Dog",
        routing: RoutingDef::ByOrganism(DOG_CAT_PARTITIONS),
    },
    SpeciesDef {
        species: "Cat",
        routing: RoutingDef::ByOrganism(DOG_CAT_PARTITIONS),
    },
];

pub fn builtin_dictionary() -> &'static [SpeciesDef] {
    BUILTIN_DICTIONARY
}
