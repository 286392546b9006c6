use crate::store::SeqBank;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(bank: PathBuf) -> Result<()> {
    let bank = SeqBank::open(&bank)?;
    for accession in bank.accessions() {
        println!("{}", accession?);
    }
    Ok(())
}
