use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::error::{LibraryError, Result};
use crate::fasta::read_records;
use crate::library::SEQUENCE_COLUMN;
use crate::table::{read_table, require_column, write_table};


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapters {
    pub five_prime: String,
    pub three_prime: String,
}

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub library: PathBuf,
    pub adapters: PathBuf,
    pub output: PathBuf,
}


pub fn read_adapters (path: &Path) -> Result<Adapters> {

    // the first record is the 5' adapter, the second the 3' adapter
    // records come back uppercased

    let mut records = read_records(path)?.into_iter();
    match (records.next(), records.next()) {
        (Some(five), Some(three)) => Ok(Adapters {
            five_prime: five.sequence,
            three_prime: three.sequence,
        }),
        _ => Err(LibraryError::InvalidInput(format!(
            "{} must hold a 5' and a 3' adapter record",
            path.display()
        ))),
    }
}


pub fn append_adapters (mut df: DataFrame, adapters: &Adapters) -> Result<DataFrame> {

    // wrap every sequence as 5' + sequence + 3', empty cells stay empty

    let appended: Vec<Option<String>> = df
        .column(SEQUENCE_COLUMN)?
        .str()?
        .into_iter()
        .map(|seq| seq.map(|s| format!("{}{}{}", adapters.five_prime, s, adapters.three_prime)))
        .collect();

    df.with_column(Series::new(SEQUENCE_COLUMN, appended))?;
    Ok(df)
}


pub fn add_adapters (config: &AdapterConfig) -> Result<()> {

    let adapters = read_adapters(&config.adapters)?;
    let lib = read_table(&config.library)?;
    require_column(&lib, SEQUENCE_COLUMN, &config.library)?;

    let mut lib = append_adapters(lib, &adapters)?;
    write_table(&config.output, &mut lib)?;

    info!(
        "added {}/{} adapters to {} sequences, wrote {}",
        adapters.five_prime.len(),
        adapters.three_prime.len(),
        lib.height(),
        config.output.display()
    );
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::tempdir;

    fn adapters(five: &str, three: &str) -> Adapters {
        Adapters { five_prime: five.to_string(), three_prime: three.to_string() }
    }

    fn library(sequences: &[&str]) -> DataFrame {
        let names: Vec<String> = (0..sequences.len()).map(|i| format!("p_s1.{}", i)).collect();
        df!("name" => names, "sequence" => sequences).unwrap()
    }

    fn sequences(df: &DataFrame) -> Vec<String> {
        df.column("sequence")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|s| s.unwrap().to_string())
            .collect()
    }

    #[test]
    fn adapters_flank_each_sequence() {
        let df = append_adapters(library(&["ATGCGA"]), &adapters("AAA", "TTT")).unwrap();
        assert_eq!(sequences(&df), vec!["AAAATGCGATTT"]);
        assert_eq!(df.get_column_names(), vec!["name", "sequence"]);
    }

    #[test]
    fn adapter_fasta_is_uppercased() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adapters.fa");
        fs::write(&path, ">five\nacgt\n>three\nggcc\n").unwrap();
        assert_eq!(read_adapters(&path).unwrap(), adapters("ACGT", "GGCC"));
    }

    #[test]
    fn a_single_adapter_is_not_enough() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adapters.fa");
        fs::write(&path, ">five\nACGT\n").unwrap();
        assert!(matches!(read_adapters(&path), Err(LibraryError::InvalidInput(_))));
    }

    #[test]
    fn library_files_are_rewritten() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib.csv");
        let fasta = dir.path().join("adapters.fa");
        let output = dir.path().join("output.csv");
        fs::write(&lib, "name,sequence\np_s1.0,ATGCGA\np_s1.1,ATGCGC\n").unwrap();
        fs::write(&fasta, ">five\naaa\n>three\nttt\n").unwrap();

        add_adapters(&AdapterConfig { library: lib, adapters: fasta, output: output.clone() }).unwrap();
        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "name,sequence\np_s1.0,AAAATGCGATTT\np_s1.1,AAAATGCGCTTT\n"
        );
    }

    #[test]
    fn libraries_without_sequences_are_rejected() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib.csv");
        let fasta = dir.path().join("adapters.fa");
        fs::write(&lib, "name,seq\np_s1.0,ATGCGA\n").unwrap();
        fs::write(&fasta, ">five\nAAA\n>three\nTTT\n").unwrap();

        let config = AdapterConfig { library: lib, adapters: fasta, output: dir.path().join("o.csv") };
        assert!(matches!(add_adapters(&config), Err(LibraryError::MissingColumn { .. })));
    }

    proptest! {
        #[test]
        fn stripping_adapters_recovers_the_sequence(
            seqs in proptest::collection::vec("[ACGTacgt]{0,30}", 1..10),
            five in "[ACGT]{0,12}",
            three in "[ACGT]{0,12}"
        ) {
            let refs: Vec<&str> = seqs.iter().map(String::as_str).collect();
            let df = append_adapters(library(&refs), &adapters(&five, &three)).unwrap();
            for (wrapped, original) in sequences(&df).iter().zip(&seqs) {
                prop_assert!(wrapped.starts_with(&five));
                prop_assert!(wrapped.ends_with(&three));
                prop_assert_eq!(&wrapped[five.len()..wrapped.len() - three.len()], original.as_str());
            }
        }
    }
}
