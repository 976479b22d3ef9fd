pub mod stage1_validate;
pub mod stage2_reconcile;
pub mod stage3_route;
pub mod stage4_expand;
pub mod stage5_annotate;

/// One well result: drug code plus its two readings. Reading 1 is the MIC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triplet {
    pub code: String,
    pub reading1: String,
    pub reading2: String,
}

/// Per instrument row: the formatted test date plus only the non-blank
/// well triplets, in original well order.
#[derive(Debug, Clone)]
pub struct DrugStream {
    pub date_tested: String,
    pub triplets: Vec<Triplet>,
}

/// A specimen joined to its instrument record: the projected submission
/// columns (with the test date appended) plus the sparse drug triplets
/// still awaiting panel expansion.
#[derive(Debug, Clone)]
pub struct JoinedRow {
    pub accession: String,
    pub species: String,
    pub organism: String,
    pub lead: Vec<String>,
    pub triplets: Vec<Triplet>,
}

/// One output file's worth of fully expanded rows.
#[derive(Debug, Clone)]
pub struct Partition {
    pub label: String,
    pub rows: Vec<Vec<String>>,
}
