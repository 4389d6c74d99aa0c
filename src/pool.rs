use polars::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use crate::error::{LibraryError, Result};
use crate::table::{read_table, write_table};


#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub lib_dir: PathBuf,
    pub output: PathBuf,
}


pub fn list_libraries (lib_dir: &Path) -> Result<Vec<PathBuf>> {

    // regular files ending in .csv, sorted so the pooled order is stable

    let mut paths = Vec::new();
    for entry in fs::read_dir(lib_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}


pub fn concat_libraries (frames: Vec<DataFrame>) -> Result<DataFrame> {

    // stack rows, a column missing from one library is filled with nulls

    let frames: Vec<LazyFrame> = frames.into_iter().map(|df| df.lazy()).collect();
    let pooled = concat_lf_diagonal(frames, UnionArgs::default())?.collect()?;
    Ok(pooled)
}


fn duplicate_keys (df: &DataFrame) -> Result<Vec<(String, usize)>> {

    // keys live in the first column

    let mut counts: HashMap<String, usize> = HashMap::new();
    if let Some(keys) = df.get_columns().first() {
        for key in keys.str()?.into_iter().flatten() {
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
    }

    let mut duplicates: Vec<(String, usize)> = counts.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();
    Ok(duplicates)
}


pub fn pool_libs (config: &PoolConfig) -> Result<DataFrame> {

    let paths = list_libraries(&config.lib_dir)?;
    if paths.is_empty() {
        return Err(LibraryError::NoLibraries(config.lib_dir.clone()));
    }

    let mut frames = Vec::with_capacity(paths.len());
    for path in &paths {
        let lib = read_table(path)?;
        info!("pooling {} rows from {}", lib.height(), path.display());
        frames.push(lib);
    }

    let mut pooled = concat_libraries(frames)?;

    // duplicates are kept, just reported
    for (key, n) in duplicate_keys(&pooled)? {
        warn!("key {} appears {} times in the pooled library", key, n);
    }

    write_table(&config.output, &mut pooled)?;
    info!(
        "wrote {} rows from {} libraries to {}",
        pooled.height(),
        paths.len(),
        config.output.display()
    );
    Ok(pooled)
}
