use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;
use crate::error::{LibraryError, Result};


pub fn read_table (path: &Path) -> Result<DataFrame> {

    // every column is read as a string so keys and sequences pass through untouched

    let df = CsvReader::from_path(path)?
        .has_header(true)
        .infer_schema(Some(0))
        .finish()?;

    debug!("read {:?} table from {}", df.shape(), path.display());
    Ok(df)
}


pub fn require_column (df: &DataFrame, column: &str, path: &Path) -> Result<()> {

    if df.get_column_names().iter().any(|&name| name == column) {
        Ok(())
    } else {
        Err(LibraryError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })
    }
}


pub fn write_table (path: &Path, df: &mut DataFrame) -> Result<()> {

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}
