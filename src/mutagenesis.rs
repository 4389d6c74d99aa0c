use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;
use crate::codon::{is_stop_codon, NUCLEOTIDES};
use crate::error::{LibraryError, Result};

pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;


#[derive(Debug, Clone, Copy)]
pub struct LibraryConfig {
    pub lib_size: usize,
    pub mut_freq: u32,
    // consecutive duplicate draws tolerated before giving up
    pub max_attempts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LibraryEntry {
    pub name: String,
    pub sequence: String,
}


pub fn mutate<R: Rng + ?Sized> (parent: &str, mut_freq: u32, rng: &mut R) -> String {

    // make mut_freq random single-nucleotide substitutions, one codon at a time
    // codons are drawn with replacement, so a later substitution may land on an earlier one
    // a substitution that would create a stop codon is redrawn until it doesn't

    let mut codons: Vec<[u8; 3]> = parent
        .as_bytes()
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    if codons.is_empty() {
        return parent.to_string();
    }

    for _ in 0..mut_freq {
        let codon_idx = rng.gen_range(0..codons.len());
        let codon = codons[codon_idx];
        let nt_idx = rng.gen_range(0..3);
        let alternatives: Vec<u8> = NUCLEOTIDES
            .iter()
            .copied()
            .filter(|&nt| nt != codon[nt_idx])
            .collect();

        let mut mut_codon = codon;
        loop {
            // alternatives always holds 3 bases, choose can't come back empty
            if let Some(&nt) = alternatives.choose(rng) {
                mut_codon[nt_idx] = nt;
            }
            if !is_stop_codon(&mut_codon) {
                break;
            }
        }

        codons[codon_idx] = mut_codon;
    }

    codons.iter().flatten().map(|&b| b as char).collect()
}


pub fn make_library<R: Rng + ?Sized> (parent: &str, config: &LibraryConfig, rng: &mut R) -> Result<Vec<String>> {

    // draw mutants until lib_size distinct ones are collected
    // the order they were first drawn in is kept

    let capacity_error = |collected: usize| LibraryError::Capacity {
        requested: config.lib_size,
        collected,
        mut_freq: config.mut_freq,
    };

    if config.mut_freq == 0 && config.lib_size > 1 {
        return Err(capacity_error(1));
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(config.lib_size);
    let mut library: Vec<String> = Vec::with_capacity(config.lib_size);
    let mut rejected: usize = 0;

    while library.len() < config.lib_size {
        let mut_seq = mutate(parent, config.mut_freq, rng);

        if seen.insert(mut_seq.clone()) {
            library.push(mut_seq);
            rejected = 0;
        } else {
            rejected += 1;
            if rejected >= config.max_attempts {
                return Err(capacity_error(library.len()));
            }
        }
    }

    debug!(
        "collected {} sequences at {} mutations",
        library.len(),
        config.mut_freq
    );
    Ok(library)
}


pub fn name_library (parent_id: &str, mut_freq: u32, library: Vec<String>) -> Vec<LibraryEntry> {

    library
        .into_iter()
        .enumerate()
        .map(|(i, sequence)| LibraryEntry {
            name: format!("{}_s{}.{}", parent_id, mut_freq, i),
            sequence,
        })
        .collect()
}
