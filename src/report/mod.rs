use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::PipelineError;
use crate::input::specimen::SpecimenTable;
use crate::pipeline::Partition;
use crate::pipeline::stage5_annotate::Stage5Output;

/// Wraps a cell in the Excel text-literal guard, `"=""value"""` on disk.
/// Excel reads it back as the exact string, keeping leading zeros in MIC
/// readings and accession numbers intact.
pub fn excel_literal(value: &str) -> String {
    format!("\"=\"\"{}\"\"\"", value)
}

/// One tab-delimited, unquoted file per partition label.
pub fn write_partition_files(
    folder: &Path,
    partitions: &[Partition],
) -> Result<(), PipelineError> {
    let names: Vec<String> = partitions
        .iter()
        .map(|p| format!("{}.txt", p.label))
        .collect();
    info!("these files will be generated: {:?}", names);

    for partition in partitions {
        let path = folder.join(format!("{}.txt", partition.label));
        let file = File::create(&path).map_err(|source| PipelineError::Io {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        for row in &partition.rows {
            let line: Vec<String> = row.iter().map(|cell| excel_literal(cell)).collect();
            writeln!(writer, "{}", line.join("\t")).map_err(|source| PipelineError::Io {
                path: path.clone(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Rewrites the master spreadsheet with its back-annotated columns.
pub fn write_annotated(path: &Path, table: &SpecimenTable) -> Result<(), PipelineError> {
    let io_err = |source: std::io::Error| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer
        .write_record(&table.columns)
        .map_err(|e| io_err(std::io::Error::other(e)))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| io_err(std::io::Error::other(e)))?;
    }
    writer.flush().map_err(io_err)?;
    Ok(())
}

pub fn log_summary(summary: &Stage5Output) {
    match serde_json::to_string_pretty(&summary.counts) {
        Ok(json) => info!("Cumulative Counts by Species / Organism: {}", json),
        Err(e) => info!("Cumulative Counts by Species / Organism unavailable: {}", e),
    }
    info!("{} Total Samples", summary.total);
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/tests.rs"]
mod tests;
