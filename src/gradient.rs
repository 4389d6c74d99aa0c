use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::error::Result;
use crate::fasta::read_parents;
use crate::library::{dump_args, write_library, JobArgs};
use crate::mutagenesis::{make_library, name_library, LibraryConfig, LibraryEntry};


#[derive(Debug, Clone)]
pub struct GradientConfig {
    pub fasta: PathBuf,
    pub mut_freqs: Vec<u32>,
    pub lib_size: usize,
    pub pool: bool,
    pub output: PathBuf,
    pub seed: Option<u64>,
    pub max_attempts: usize,
}


pub fn make_rand_gradient_lib (config: &GradientConfig) -> Result<Vec<PathBuf>> {

    // one library per parent per mutation frequency
    // each goes to its own csv unless pooling, then everything lands in pooled_lib.csv
    // returns the csv paths written

    let parents = read_parents(&config.fasta)?;
    fs::create_dir_all(&config.output)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut written = Vec::new();
    let mut pooled_lib: Vec<LibraryEntry> = Vec::new();

    for parent in &parents {
        for &freq in &config.mut_freqs {
            info!("building {} library at {} mutations", parent.id, freq);

            let library_config = LibraryConfig {
                lib_size: config.lib_size,
                mut_freq: freq,
                max_attempts: config.max_attempts,
            };
            let library = make_library(&parent.sequence, &library_config, &mut rng)?;
            let entries = name_library(&parent.id, freq, library);

            if config.pool {
                pooled_lib.extend(entries);
            } else {
                let csv_path = library_path(&config.output, &parent.id, freq);
                write_library(&csv_path, &entries)?;
                written.push(csv_path);
            }
        }
    }

    if !pooled_lib.is_empty() {
        let csv_path = config.output.join("pooled_lib.csv");
        write_library(&csv_path, &pooled_lib)?;
        written.push(csv_path);
    }

    let args = JobArgs {
        fasta: config.fasta.clone(),
        mut_freqs: config.mut_freqs.clone(),
        lib_size: config.lib_size,
        pool: config.pool,
        output: config.output.clone(),
        seed: config.seed,
    };
    dump_args(&config.output, &args)?;

    Ok(written)
}


fn library_path (output: &Path, parent_id: &str, freq: u32) -> PathBuf {

    output.join(format!("{}_m{}_lib.csv", parent_id, freq))
}
