use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use crate::adapters::{add_adapters, AdapterConfig};
use crate::error::Result;
use crate::frequency::{
    position_probabilities, shannon_entropy, Alphabet, FrequencyConfig, LibraryType,
    ProbabilityMatrix,
};
use crate::gradient::{make_rand_gradient_lib, GradientConfig};
use crate::heatmap::{plot_heatmap_svg, render_heatmap, HeatmapStyle};
use crate::library::read_library;
use crate::mutagenesis::DEFAULT_MAX_ATTEMPTS;
use crate::pool::{pool_libs, PoolConfig};
use crate::table::write_table;


#[derive(Debug, Parser)]
#[command(name = "gradlib")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Gradient mutagenesis library generation and analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate random mutant libraries from the parents in a FASTA file
    Generate {
        /// Path to fasta file
        fasta: PathBuf,

        /// Mutation frequencies
        #[arg(short = 'm', long = "mut_freqs", num_args = 1.., required = true)]
        mut_freqs: Vec<u32>,

        /// Library size, per mutation frequency
        #[arg(short = 'l', long = "lib_size", value_parser = clap::value_parser!(u64).range(1..))]
        lib_size: u64,

        /// Pool libraries into a single file
        #[arg(short, long)]
        pool: bool,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Consecutive duplicate draws tolerated before giving up on a library
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: usize,
    },

    /// Flank every library sequence with the adapters of a FASTA file
    Adapters {
        /// Path to library csv
        lib: PathBuf,

        /// Path to adapter fasta (5' record first, 3' record second)
        adapters: PathBuf,

        /// Path to output csv
        #[arg(short, long, default_value = "output.csv")]
        output: PathBuf,
    },

    /// Pool the csv libraries of a directory into a single csv
    Pool {
        /// Path to the directory containing the csv files
        lib_dir: PathBuf,

        /// Path to the output csv file
        #[arg(short, long, default_value = "output.csv")]
        output: PathBuf,
    },

    /// Print the Shannon entropy of a library
    Entropy {
        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Show a per-position frequency heatmap of a library
    Heatmap {
        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Plain shading instead of coloured cells
        #[arg(long)]
        no_color: bool,

        /// Also draw the heatmap to this svg file
        #[arg(long)]
        plot_out: Option<PathBuf>,
    },
}

#[derive(Debug, clap::Args)]
pub struct AnalysisArgs {
    /// Path to library csv file
    pub lib_path: PathBuf,

    /// Type of library
    #[arg(value_enum, default_value = "DNA")]
    pub lib_type: LibraryType,

    /// Count nucleotides instead of translated amino acids (DNA libraries)
    #[arg(long)]
    pub per_nucleotide: bool,

    /// Also write the probability matrix to this csv
    #[arg(long)]
    pub matrix_out: Option<PathBuf>,
}

impl AnalysisArgs {
    fn config(&self) -> FrequencyConfig {
        FrequencyConfig {
            lib_type: self.lib_type,
            alphabet: if self.per_nucleotide { Alphabet::Nucleotide } else { Alphabet::AminoAcid },
        }
    }
}


fn probability_matrix (analysis: &AnalysisArgs) -> Result<ProbabilityMatrix> {

    let rows = read_library(&analysis.lib_path)?;
    let matrix = position_probabilities(&rows, &analysis.config())?;

    if let Some(path) = &analysis.matrix_out {
        write_table(path, &mut matrix.to_dataframe()?)?;
        info!("wrote probability matrix to {}", path.display());
    }

    Ok(matrix)
}


pub fn run (command: Commands) -> Result<()> {

    match command {
        Commands::Generate { fasta, mut_freqs, lib_size, pool, output, seed, max_attempts } => {
            let config = GradientConfig {
                fasta,
                mut_freqs,
                lib_size: lib_size as usize,
                pool,
                output,
                seed,
                max_attempts,
            };
            let written = make_rand_gradient_lib(&config)?;
            info!("generated {} library file(s) in {}", written.len(), config.output.display());
        }

        Commands::Adapters { lib, adapters, output } => {
            add_adapters(&AdapterConfig { library: lib, adapters, output })?;
        }

        Commands::Pool { lib_dir, output } => {
            pool_libs(&PoolConfig { lib_dir, output })?;
        }

        Commands::Entropy { analysis } => {
            let matrix = probability_matrix(&analysis)?;
            println!("Library Entropy (bits): {}", shannon_entropy(&matrix));
        }

        Commands::Heatmap { analysis, no_color, plot_out } => {
            let matrix = probability_matrix(&analysis)?;
            if let Some(path) = &plot_out {
                plot_heatmap_svg(&matrix, path)?;
            }
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render_heatmap(&matrix, HeatmapStyle { color: !no_color }, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}
