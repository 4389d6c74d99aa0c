use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;


// every failure is fatal to the subcommand that hit it, main logs it and exits 1

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("table error: {0}")]
    Polars(#[from] PolarsError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("plot error: {0}")]
    Plot(String),

    #[error("malformed FASTA {path}: {reason}")]
    Fasta { path: PathBuf, reason: String },

    #[error("invalid sequence {id}: {reason}")]
    InvalidSequence { id: String, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing column `{column}` in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("library is empty")]
    EmptyLibrary,

    #[error("no .csv libraries found in {0}")]
    NoLibraries(PathBuf),

    #[error("sequence {sequence} has length {found}, expected {expected}")]
    LengthMismatch {
        expected: usize,
        found: usize,
        sequence: String,
    },

    #[error(
        "cannot collect {requested} unique sequences at {mut_freq} mutations \
         (stopped at {collected}, mutation space exhausted)"
    )]
    Capacity {
        requested: usize,
        collected: usize,
        mut_freq: u32,
    },
}

pub type Result<T> = std::result::Result<T, LibraryError>;
