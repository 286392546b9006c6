use crate::codec;
use crate::error::SeqBankError;
use crate::store::SeqBank;
use anyhow::{Context, Result};
use bio::io::fasta;
use std::io::Write;

/// Streams records out of the bank as FASTA, decoding each one.
///
/// Read-only and safe to run while ingestion is underway; it sees whatever
/// point-in-time view the bank's live scan offers. With `accessions` given,
/// only that subset is exported and a missing accession is an error.
pub fn export_fasta<W: Write>(
    bank: &SeqBank,
    output: W,
    accessions: Option<&[String]>,
) -> Result<usize> {
    let list: Vec<String> = match accessions {
        Some(subset) => subset.to_vec(),
        None => bank
            .accessions()
            .collect::<std::result::Result<_, _>>()
            .context("scanning accessions")?,
    };

    let mut writer = fasta::Writer::new(output);
    let mut exported = 0;
    for accession in &list {
        let encoded = bank
            .get(accession)?
            .ok_or_else(|| SeqBankError::NotFound(accession.clone()))?;
        let sequence = codec::decode(&encoded)
            .with_context(|| format!("decoding {accession}"))?;
        writer
            .write(accession, None, sequence.as_bytes())
            .with_context(|| format!("writing {accession}"))?;
        exported += 1;
    }

    Ok(exported)
}

/// Reads an accession subset file, one accession per line.
pub fn read_accession_list(path: &std::path::Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading accession list {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
