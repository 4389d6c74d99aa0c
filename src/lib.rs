pub mod adapters;
pub mod cli;
pub mod codon;
pub mod error;
pub mod fasta;
pub mod frequency;
pub mod gradient;
pub mod heatmap;
pub mod library;
pub mod mutagenesis;
pub mod pool;
pub mod table;
