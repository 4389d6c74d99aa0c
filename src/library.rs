use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::error::{LibraryError, Result};
use crate::mutagenesis::LibraryEntry;

pub const SEQUENCE_COLUMN: &str = "sequence";


#[derive(Debug, Deserialize)]
struct RawRow {
    sequence: String,
    #[serde(default)]
    count: Option<u64>,
}

// one row of a library csv as the analyser sees it, the key column is not needed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRow {
    pub sequence: String,
    pub count: u64,
}

// provenance written next to generated libraries
#[derive(Debug, Serialize)]
pub struct JobArgs {
    #[serde(rename = "FASTA")]
    pub fasta: PathBuf,
    #[serde(rename = "Mutation frequencies")]
    pub mut_freqs: Vec<u32>,
    #[serde(rename = "Library size")]
    pub lib_size: usize,
    #[serde(rename = "Enable pooling")]
    pub pool: bool,
    #[serde(rename = "Output path")]
    pub output: PathBuf,
    #[serde(rename = "Seed", skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}


pub fn write_library (path: &Path, entries: &[LibraryEntry]) -> Result<()> {

    // header is name,sequence with the key column first

    let mut writer = WriterBuilder::new().from_path(path)?;
    if entries.is_empty() {
        // serialize only emits the header alongside the first row
        writer.write_record(["name", SEQUENCE_COLUMN])?;
    }
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    info!("wrote {} sequences to {}", entries.len(), path.display());
    Ok(())
}


pub fn read_library (path: &Path) -> Result<Vec<LibraryRow>> {

    // parse a library csv, a missing count column means every row counts once

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    if !reader.headers()?.iter().any(|h| h == SEQUENCE_COLUMN) {
        return Err(LibraryError::MissingColumn {
            column: SEQUENCE_COLUMN.to_string(),
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let raw: RawRow = result?;
        rows.push(LibraryRow {
            sequence: raw.sequence,
            count: raw.count.unwrap_or(1),
        });
    }

    Ok(rows)
}


pub fn dump_args (output_dir: &Path, args: &JobArgs) -> Result<PathBuf> {

    let path = output_dir.join("job_args.yaml");
    let file = File::create(&path)?;
    serde_yaml::to_writer(file, args)?;
    Ok(path)
}
