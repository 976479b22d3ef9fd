use std::path::PathBuf;

pub const DEFAULT_LAB_NAME: &str = "NY - Cornell University Animal Health Diagnostic Center";
pub const DEFAULT_PROGRAM_NAME: &str = "NAHLN AMR Pilot Project";
pub const DEFAULT_INCLUDE_HEADER: &str = "Include";
pub const DEFAULT_COMBINED_FILENAME: &str = "master_spreadsheet.csv";
pub const DEFAULT_SENSITITRE_FILENAME: &str = "SWINExportFile.TXT";
pub const DEFAULT_OUTPUT_FILENAME: &str = "output.csv";
pub const DEFAULT_STATE: &str = "NY";
pub const DEFAULT_ZIPCODE: &str = "14853";

// The submission column list. Two headers carry a trailing space because the
// curated master spreadsheet does.
pub const DEFAULT_OUTPUT_HEADERS: &str = "Laboratory Name,Unique Specimen ID,State of Animal Origin,Animal Species,Reason for submission ,Program Name,Specimen/ source tissue,Bacterial Organism Isolated,Salmonella Serotype,Final Diagnosis ,Date of Isolation";

pub const ACCESSION_COLUMN: &str = "Accession #";
pub const REACCESSION_COLUMN: &str = "Reaccession #";
pub const UNIQUE_ID_COLUMN: &str = "Unique Specimen ID";
pub const DATE_TESTED_COLUMN: &str = "Date Tested";
pub const SPECIES_COLUMN: &str = "Animal Species";
pub const ORGANISM_COLUMN: &str = "Bacterial Organism Isolated";
pub const SEROTYPE_COLUMN: &str = "Salmonella Serotype";
pub const LAB_NAME_COLUMN: &str = "Laboratory Name";
pub const PROGRAM_NAME_COLUMN: &str = "Program Name";

/// Program-year tag baked into every generated unique specimen ID.
pub const PROGRAM_YEAR_TAG: &str = "PPY2";

/// Width of the zero-padded numeric suffix of a unique specimen ID.
pub const ID_SUFFIX_WIDTH: usize = 4;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub lab_name: String,
    pub program_name: String,
    pub output_headers: Vec<String>,
    pub include_header: String,
    pub folder: PathBuf,
    pub combined_filename: String,
    pub sensititre_filename: String,
    pub output_filename: String,
    pub state: String,
    pub zipcode: String,
}

impl RunConfig {
    /// Prefix for generated unique specimen IDs, e.g. `NY14853PPY2`.
    pub fn unique_name_prefix(&self) -> String {
        format!("{}{}{}", self.state, self.zipcode, PROGRAM_YEAR_TAG)
    }

    pub fn specimen_path(&self) -> PathBuf {
        self.folder.join(&self.combined_filename)
    }

    pub fn instrument_path(&self) -> PathBuf {
        self.folder.join(&self.sensititre_filename)
    }

    pub fn output_path(&self) -> PathBuf {
        self.folder.join(&self.output_filename)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            lab_name: DEFAULT_LAB_NAME.to_string(),
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
            output_headers: split_headers(DEFAULT_OUTPUT_HEADERS),
            include_header: DEFAULT_INCLUDE_HEADER.to_string(),
            folder: PathBuf::from("."),
            combined_filename: DEFAULT_COMBINED_FILENAME.to_string(),
            sensititre_filename: DEFAULT_SENSITITRE_FILENAME.to_string(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            state: DEFAULT_STATE.to_string(),
            zipcode: DEFAULT_ZIPCODE.to_string(),
        }
    }
}

/// Splits a comma-separated output column list. Header names keep their
/// spacing verbatim; the master spreadsheet's quirks are load-bearing.
pub fn split_headers(list: &str) -> Vec<String> {
    list.split(',').map(|s| s.to_string()).collect()
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
