use bio::io::fasta;
use std::fs::File;
use std::path::Path;
use tracing::debug;
use crate::codon::NUCLEOTIDES;
use crate::error::{LibraryError, Result};


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub sequence: String,
}


pub fn read_records (path: &Path) -> Result<Vec<FastaRecord>> {

    // read every record of a FASTA file, uppercasing the sequence

    let reader = fasta::Reader::new(File::open(path)?);
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| LibraryError::Fasta {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        record.check().map_err(|reason| LibraryError::Fasta {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })?;

        let sequence = record
            .seq()
            .iter()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| b.to_ascii_uppercase() as char)
            .collect();

        records.push(FastaRecord {
            id: record.id().to_string(),
            sequence,
        });
    }

    debug!("read {} record(s) from {}", records.len(), path.display());
    Ok(records)
}


pub fn read_parents (path: &Path) -> Result<Vec<FastaRecord>> {

    // parents must be non-empty, codon aligned, and plain ACGT

    let parents = read_records(path)?;
    if parents.is_empty() {
        return Err(LibraryError::Fasta {
            path: path.to_path_buf(),
            reason: "no records".to_string(),
        });
    }

    for parent in &parents {
        validate_parent(parent)?;
    }

    Ok(parents)
}


pub fn validate_parent (parent: &FastaRecord) -> Result<()> {

    let invalid = |reason: String| LibraryError::InvalidSequence {
        id: parent.id.clone(),
        reason,
    };

    if parent.sequence.is_empty() {
        return Err(invalid("sequence is empty".to_string()));
    }
    if parent.sequence.len() % 3 != 0 {
        return Err(invalid(format!(
            "length {} is not a multiple of 3",
            parent.sequence.len()
        )));
    }
    if let Some((i, c)) = parent
        .sequence
        .bytes()
        .enumerate()
        .find(|(_, b)| !NUCLEOTIDES.contains(b))
    {
        return Err(invalid(format!(
            "unexpected character {} at position {}",
            c as char, i
        )));
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fasta_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_multiline_records_uppercased() {
        let file = fasta_file(">p1 first parent\natgGCC\nTGG\n>p2\nAAATTT\n");
        let records = read_records(file.path()).unwrap();
        assert_eq!(
            records,
            vec![
                FastaRecord { id: "p1".into(), sequence: "ATGGCCTGG".into() },
                FastaRecord { id: "p2".into(), sequence: "AAATTT".into() },
            ]
        );
    }

    #[test]
    fn parents_must_be_codon_aligned() {
        let file = fasta_file(">p1\nATGGC\n");
        match read_parents(file.path()) {
            Err(LibraryError::InvalidSequence { id, .. }) => assert_eq!(id, "p1"),
            other => panic!("expected InvalidSequence, got {:?}", other),
        }
    }

    #[test]
    fn parents_must_be_acgt() {
        let file = fasta_file(">p1\nATGNCC\n");
        assert!(matches!(
            read_parents(file.path()),
            Err(LibraryError::InvalidSequence { .. })
        ));
    }

    #[test]
    fn empty_fasta_is_rejected() {
        let file = fasta_file("");
        assert!(matches!(read_parents(file.path()), Err(LibraryError::Fasta { .. })));
    }
}
