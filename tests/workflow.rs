use gradlib::adapters::{add_adapters, AdapterConfig};
use gradlib::frequency::{position_probabilities, shannon_entropy, Alphabet, FrequencyConfig, LibraryType};
use gradlib::gradient::{make_rand_gradient_lib, GradientConfig};
use gradlib::library::read_library;
use gradlib::mutagenesis::DEFAULT_MAX_ATTEMPTS;
use gradlib::pool::{pool_libs, PoolConfig};
use std::fs;
use tempfile::tempdir;

const PARENT: &str = "ATGGCCAAGTGGCTGGGCTACTGCTTTCAGGAT";


#[test]
fn generate_pool_wrap_and_measure() {
    let dir = tempdir().unwrap();
    let fasta = dir.path().join("parent.fa");
    fs::write(&fasta, format!(">wt\n{}\n", PARENT)).unwrap();

    let libs = dir.path().join("libs");
    let config = GradientConfig {
        fasta,
        mut_freqs: vec![1, 2, 4],
        lib_size: 20,
        pool: false,
        output: libs.clone(),
        seed: Some(2024),
        max_attempts: DEFAULT_MAX_ATTEMPTS,
    };
    let written = make_rand_gradient_lib(&config).unwrap();
    assert_eq!(written.len(), 3);

    let job_args = fs::read_to_string(libs.join("job_args.yaml")).unwrap();
    assert!(job_args.contains("Seed: 2024"));

    // pooling leaves the yaml behind and keeps every row
    let pooled_path = dir.path().join("pooled.csv");
    let pooled = pool_libs(&PoolConfig { lib_dir: libs.clone(), output: pooled_path.clone() }).unwrap();
    assert_eq!(pooled.height(), 60);
    assert_eq!(pooled.get_column_names(), vec!["name", "sequence"]);

    let entropies: Vec<f64> = written
        .iter()
        .map(|path| {
            let rows = read_library(path).unwrap();
            let config = FrequencyConfig { lib_type: LibraryType::Dna, alphabet: Alphabet::Nucleotide };
            let matrix = position_probabilities(&rows, &config).unwrap();
            for position in 0..matrix.len() {
                assert!((matrix.column_sum(position) - 1.0).abs() < 1e-9);
            }
            shannon_entropy(&matrix)
        })
        .collect();
    // more mutations per sequence spread the library further from the parent
    assert!(entropies[0] > 0.0);
    assert!(entropies[2] > entropies[0]);

    let adapters = dir.path().join("adapters.fa");
    fs::write(&adapters, ">five\ngatc\n>three\nctag\n").unwrap();
    let wrapped = dir.path().join("wrapped.csv");
    add_adapters(&AdapterConfig { library: pooled_path, adapters, output: wrapped.clone() }).unwrap();

    let rows = read_library(&wrapped).unwrap();
    assert_eq!(rows.len(), 60);
    for row in rows {
        assert!(row.sequence.starts_with("GATC"));
        assert!(row.sequence.ends_with("CTAG"));
        assert_eq!(row.sequence.len(), PARENT.len() + 8);
    }
}
