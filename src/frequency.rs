use clap::ValueEnum;
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;
use crate::codon::{translate, NUCLEOTIDES};
use crate::error::{LibraryError, Result};
use crate::library::LibraryRow;

pub const AMINO_ACIDS: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";


#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LibraryType {
    #[value(name = "DNA")]
    Dna,
    #[value(name = "PROTEIN")]
    Protein,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    AminoAcid,
    Nucleotide,
}

impl Alphabet {
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            Alphabet::AminoAcid => &AMINO_ACIDS[..],
            Alphabet::Nucleotide => &NUCLEOTIDES[..],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Alphabet::AminoAcid => "Amino Acid",
            Alphabet::Nucleotide => "Nucleotide",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FrequencyConfig {
    pub lib_type: LibraryType,
    pub alphabet: Alphabet,
}


/// Fraction of the library carrying each symbol at each position.
///
/// Stored row major, one row per alphabet symbol. Symbols outside the
/// alphabet (`*` for a translated stop, `X`) are only counted in the
/// denominator, so a column holding them sums to less than one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMatrix {
    alphabet: Alphabet,
    length: usize,
    values: Vec<f64>,
}

impl ProbabilityMatrix {
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn symbols(&self) -> &'static [u8] {
        self.alphabet.symbols()
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn get(&self, symbol: u8, position: usize) -> Option<f64> {
        let row = self.symbols().iter().position(|&s| s == symbol)?;
        (position < self.length).then(|| self.values[row * self.length + position])
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.length..(row + 1) * self.length]
    }

    pub fn column_sum(&self, position: usize) -> f64 {
        (0..self.symbols().len())
            .map(|row| self.values[row * self.length + position])
            .sum()
    }

    pub fn cells(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn to_dataframe(&self) -> Result<DataFrame> {

        // one row per position, one column per symbol

        let positions: Vec<u32> = (0..self.length as u32).collect();
        let mut columns = vec![Series::new("position", positions)];
        for (row, &symbol) in self.symbols().iter().enumerate() {
            let name = (symbol as char).to_string();
            columns.push(Series::new(&name, self.row(row).to_vec()));
        }

        Ok(DataFrame::new(columns)?)
    }
}


pub fn position_probabilities (rows: &[LibraryRow], config: &FrequencyConfig) -> Result<ProbabilityMatrix> {

    // every raw sequence has to have the same length, whole codons when translating
    // translate DNA when counting amino acids
    // group identical sequences, summing their counts
    // divide per-position symbol counts by the total count of the input

    if config.lib_type == LibraryType::Protein && config.alphabet == Alphabet::Nucleotide {
        return Err(LibraryError::InvalidInput(
            "a protein library cannot be counted per nucleotide".to_string(),
        ));
    }

    let translating = config.lib_type == LibraryType::Dna && config.alphabet == Alphabet::AminoAcid;
    let raw_length = rows.first().map_or(0, |row| row.sequence.len());

    let mut grouped: BTreeMap<String, u64> = BTreeMap::new();
    for row in rows {
        // raw lengths are compared before translation drops a partial codon
        if row.sequence.len() != raw_length {
            return Err(LibraryError::LengthMismatch {
                expected: raw_length,
                found: row.sequence.len(),
                sequence: row.sequence.clone(),
            });
        }
        if translating && row.sequence.len() % 3 != 0 {
            return Err(LibraryError::InvalidSequence {
                id: row.sequence.clone(),
                reason: format!("length {} is not a multiple of 3", row.sequence.len()),
            });
        }

        let sequence = if translating {
            translate(&row.sequence)
        } else {
            row.sequence.to_ascii_uppercase()
        };
        *grouped.entry(sequence).or_insert(0) += row.count;
    }

    let total: u64 = grouped.values().sum();
    let length = match grouped.keys().next() {
        Some(first) if total > 0 => first.len(),
        _ => return Err(LibraryError::EmptyLibrary),
    };

    let symbols = config.alphabet.symbols();
    let mut counts = vec![0u64; symbols.len() * length];

    for (sequence, &count) in &grouped {
        for (position, symbol) in sequence.bytes().enumerate() {
            if let Some(row) = symbols.iter().position(|&s| s == symbol) {
                counts[row * length + position] += count;
            }
        }
    }

    debug!(
        "{} unique sequences of length {} from {} reads",
        grouped.len(),
        length,
        total
    );

    Ok(ProbabilityMatrix {
        alphabet: config.alphabet,
        length,
        values: counts.into_iter().map(|c| c as f64 / total as f64).collect(),
    })
}


pub fn shannon_entropy (matrix: &ProbabilityMatrix) -> f64 {

    // p = 0 and p = 1 contribute nothing, and log2(0) is undefined, so both are skipped

    matrix
        .cells()
        .filter(|&p| p > 0.0 && p < 1.0)
        .map(|p| -p * p.log2())
        .sum()
}
