use crate::store::SeqBank;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(bank: PathBuf) -> Result<()> {
    let bank = SeqBank::open(&bank)?;
    println!("{}", bank.count()?);
    Ok(())
}
