use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for the whole pipeline. Every fatal condition maps to
/// one variant, and each failure class carries its own process exit code so
/// callers can distinguish a malformed export from an unresolved join.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid organism pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("instrument export has {0} rows with non-compliant column length")]
    Structure(usize),

    #[error("specimen row {0} has no accession identifier")]
    BlankAccession(usize),

    #[error("can't find instrument record for accession '{0}'")]
    UnresolvedJoin(String),

    #[error(
        "encountered unknown drug '{code}' in partition '{partition}' for accession {accession} (triplet {offset})"
    )]
    UnknownDrug {
        code: String,
        partition: String,
        accession: String,
        offset: usize,
    },

    #[error("new {field} would overwrite existing {field} for accession {accession}")]
    Overwrite {
        field: &'static str,
        accession: String,
    },
}

impl PipelineError {
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Io { .. } | PipelineError::Parse { .. } | PipelineError::Pattern { .. } => 1,
            PipelineError::Structure(_) => 2,
            PipelineError::BlankAccession(_) | PipelineError::UnresolvedJoin(_) => 3,
            PipelineError::UnknownDrug { .. } => 4,
            PipelineError::Overwrite { .. } => 5,
        }
    }
}
