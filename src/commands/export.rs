use crate::export::{export_fasta, read_accession_list};
use crate::store::SeqBank;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

pub fn run(bank: PathBuf, output: PathBuf, accessions: Option<PathBuf>) -> Result<()> {
    let bank = SeqBank::open(&bank)?;

    let subset = match accessions {
        Some(path) => Some(read_accession_list(&path)?),
        None => None,
    };

    let file = File::create(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    let exported = export_fasta(&bank, BufWriter::new(file), subset.as_deref())?;

    println!("Exported {} records to {}", exported, output.display());
    Ok(())
}
