use crate::store::SeqBank;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(src: PathBuf, dst: PathBuf) -> Result<()> {
    let src = SeqBank::open(&src)?;
    let dst = SeqBank::create(&dst)?;
    let copied = src.copy_to(&dst)?;
    println!("Copied {} entries", copied);
    Ok(())
}
