use crate::error::SeqBankError;
use crate::store::SeqBank;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(bank: PathBuf, accession: String) -> Result<()> {
    let bank = SeqBank::open(&bank)?;
    if !bank.delete(&accession)? {
        return Err(SeqBankError::NotFound(accession).into());
    }
    bank.flush()?;
    println!("Deleted {}", accession);
    Ok(())
}
