use crate::histogram::length_histogram;
use crate::store::SeqBank;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn run(bank: PathBuf, nbins: usize, output: Option<PathBuf>, show: bool) -> Result<()> {
    let bank = SeqBank::open(&bank)?;
    let histogram = length_histogram(&bank, nbins)?;

    if let Some(path) = &output {
        std::fs::write(path, histogram.to_svg())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote histogram to {}", path.display());
    }
    if show || output.is_none() {
        print!("{}", histogram.render_text());
    }
    Ok(())
}
