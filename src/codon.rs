pub const STOP_CODONS: [&[u8; 3]; 3] = [b"TAA", b"TAG", b"TGA"];
pub const NUCLEOTIDES: &[u8; 4] = b"ACGT";


pub fn is_stop_codon (codon: &[u8]) -> bool {

    STOP_CODONS.iter().any(|stop| &stop[..] == codon)
}


pub fn translate_codon (codon: &[u8]) -> u8 {

    // standard genetic code (NCBI table 1)
    // stops come back as '*', anything with a non-ACGT base or the wrong length as 'X'

    let [first, second, third] = match codon {
        [first, second, third] => [*first, *second, *third],
        _ => return b'X',
    };

    match [first.to_ascii_uppercase(), second.to_ascii_uppercase(), third.to_ascii_uppercase()] {
        [b'T', b'T', b'T' | b'C'] => b'F',
        [b'T', b'T', b'A' | b'G'] => b'L',
        [b'C', b'T', b'A' | b'C' | b'G' | b'T'] => b'L',
        [b'A', b'T', b'T' | b'C' | b'A'] => b'I',
        [b'A', b'T', b'G'] => b'M',
        [b'G', b'T', b'A' | b'C' | b'G' | b'T'] => b'V',

        [b'T', b'C', b'A' | b'C' | b'G' | b'T'] => b'S',
        [b'C', b'C', b'A' | b'C' | b'G' | b'T'] => b'P',
        [b'A', b'C', b'A' | b'C' | b'G' | b'T'] => b'T',
        [b'G', b'C', b'A' | b'C' | b'G' | b'T'] => b'A',

        [b'T', b'A', b'T' | b'C'] => b'Y',
        [b'T', b'A', b'A' | b'G'] => b'*',
        [b'C', b'A', b'T' | b'C'] => b'H',
        [b'C', b'A', b'A' | b'G'] => b'Q',
        [b'A', b'A', b'T' | b'C'] => b'N',
        [b'A', b'A', b'A' | b'G'] => b'K',
        [b'G', b'A', b'T' | b'C'] => b'D',
        [b'G', b'A', b'A' | b'G'] => b'E',

        [b'T', b'G', b'T' | b'C'] => b'C',
        [b'T', b'G', b'A'] => b'*',
        [b'T', b'G', b'G'] => b'W',
        [b'C', b'G', b'A' | b'C' | b'G' | b'T'] => b'R',
        [b'A', b'G', b'T' | b'C'] => b'S',
        [b'A', b'G', b'A' | b'G'] => b'R',
        [b'G', b'G', b'A' | b'C' | b'G' | b'T'] => b'G',

        _ => b'X',
    }
}


pub fn translate (sequence: &str) -> String {

    // a trailing partial codon is dropped

    sequence
        .as_bytes()
        .chunks_exact(3)
        .map(|codon| translate_codon(codon) as char)
        .collect()
}
