mod config;
mod error;
mod input;
mod logging;
mod panels;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use crate::config::{
    DEFAULT_COMBINED_FILENAME, DEFAULT_INCLUDE_HEADER, DEFAULT_LAB_NAME, DEFAULT_OUTPUT_FILENAME,
    DEFAULT_OUTPUT_HEADERS, DEFAULT_PROGRAM_NAME, DEFAULT_SENSITITRE_FILENAME, DEFAULT_STATE,
    DEFAULT_ZIPCODE, RunConfig, split_headers,
};
use crate::error::PipelineError;
use crate::input::{load_instrument, load_specimens};
use crate::pipeline::stage1_validate::run_stage1;
use crate::pipeline::stage2_reconcile::run_stage2;
use crate::pipeline::stage3_route::run_stage3;
use crate::pipeline::stage5_annotate::run_stage5;

#[derive(Parser, Debug)]
#[command(
    name = "amr-reconcile",
    version,
    about = "Reconciles Sensititre exports with the curated specimen spreadsheet into per-species submission files."
)]
struct Cli {
    /// Laboratory name substituted when the spreadsheet leaves it blank.
    #[arg(long = "lab", default_value = DEFAULT_LAB_NAME)]
    lab_name: String,

    /// Program name substituted when the spreadsheet leaves it blank.
    #[arg(long = "program", default_value = DEFAULT_PROGRAM_NAME)]
    program_name: String,

    /// Comma-separated submission column list.
    #[arg(long = "output-headers", default_value = DEFAULT_OUTPUT_HEADERS)]
    output_headers: String,

    /// Name of the include-flag column in the spreadsheet.
    #[arg(long = "include-header", default_value = DEFAULT_INCLUDE_HEADER)]
    include_header: String,

    /// Folder holding both input files; outputs land here too.
    #[arg(long = "folder", default_value = ".")]
    folder: PathBuf,

    /// Specimen spreadsheet filename.
    #[arg(long = "combined", default_value = DEFAULT_COMBINED_FILENAME)]
    combined: String,

    /// Instrument export filename.
    #[arg(long = "sensititre", default_value = DEFAULT_SENSITITRE_FILENAME)]
    sensititre: String,

    /// Back-annotated spreadsheet filename.
    #[arg(long = "output", default_value = DEFAULT_OUTPUT_FILENAME)]
    output: String,

    /// Jurisdiction code for generated unique specimen IDs.
    #[arg(long = "state", default_value = DEFAULT_STATE)]
    state: String,

    /// Postal code for generated unique specimen IDs.
    #[arg(long = "zip", default_value = DEFAULT_ZIPCODE)]
    zipcode: String,
}

fn main() {
    logging::init();
    let config = build_config(Cli::parse());
    if let Err(err) = run(&config) {
        error!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn build_config(cli: Cli) -> RunConfig {
    RunConfig {
        lab_name: cli.lab_name,
        program_name: cli.program_name,
        output_headers: split_headers(&cli.output_headers),
        include_header: cli.include_header,
        folder: cli.folder,
        combined_filename: cli.combined,
        sensititre_filename: cli.sensititre,
        output_filename: cli.output,
        state: cli.state,
        zipcode: cli.zipcode,
    }
}

/// The whole batch pipeline. Every stage runs to completion before any
/// output file is written, so a fatal error leaves the folder untouched.
fn run(config: &RunConfig) -> Result<(), PipelineError> {
    let mut specimens = load_specimens(&config.specimen_path())?;
    let instruments = load_instrument(&config.instrument_path())?;

    let streams = run_stage1(&instruments)?;
    let dictionary = panels::load_dictionary()?;
    let joined = run_stage2(&specimens, &instruments, &streams, config)?;
    let partitions = run_stage3(joined.rows, &dictionary)?;
    let summary = run_stage5(&mut specimens, &joined.ids, &joined.dates, config)?;

    report::write_partition_files(&config.folder, &partitions)?;
    info!(
        "back annotating Unique Specimen Id and Date Tested into '{}'",
        config.output_filename
    );
    report::write_annotated(&config.output_path(), &specimens)?;
    report::log_summary(&summary);
    info!("done");

    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
