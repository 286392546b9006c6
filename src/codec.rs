use crate::error::SeqBankError;

/// One byte of storage per base. The four definite bases and N keep the
/// dense codes 0-4; IUPAC ambiguity codes, U and the gap fill the rest.
const ALPHABET: &[u8; 17] = b"NACGTURYSWKMBDHV-";

pub const MAX_CODE: u8 = (ALPHABET.len() - 1) as u8;

const INVALID: u8 = 0xFF;

const ENCODE_TABLE: [u8; 256] = build_encode_table();

const fn build_encode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut code = 0;
    while code < ALPHABET.len() {
        let symbol = ALPHABET[code];
        table[symbol as usize] = code as u8;
        table[symbol.to_ascii_lowercase() as usize] = code as u8;
        code += 1;
    }
    table
}

/// Encodes a symbolic nucleotide sequence into its per-base numeric form.
///
/// Case-insensitive on input. Any byte outside the recognized alphabet is an
/// `InvalidSymbol` error carrying the 0-indexed position of the offender.
pub fn encode(sequence: &[u8]) -> Result<Vec<u8>, SeqBankError> {
    let mut encoded = Vec::with_capacity(sequence.len());
    for (position, &symbol) in sequence.iter().enumerate() {
        let code = ENCODE_TABLE[symbol as usize];
        if code == INVALID {
            return Err(SeqBankError::InvalidSymbol {
                position,
                symbol: symbol as char,
            });
        }
        encoded.push(code);
    }
    Ok(encoded)
}

/// Decodes a stored numeric sequence back to uppercase symbols.
///
/// Exact inverse of [`encode`] up to case folding. A code above [`MAX_CODE`]
/// indicates corrupt persisted data and is surfaced, never repaired.
pub fn decode(encoded: &[u8]) -> Result<String, SeqBankError> {
    let mut sequence = String::with_capacity(encoded.len());
    for (position, &code) in encoded.iter().enumerate() {
        if code > MAX_CODE {
            return Err(SeqBankError::CorruptEncoding { position, code });
        }
        sequence.push(ALPHABET[code as usize] as char);
    }
    Ok(sequence)
}
