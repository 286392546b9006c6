use crate::catalog::{CatalogProvider, DfamCatalog};
use crate::pipeline::{IngestConfig, Pipeline, SequenceFilter};
use crate::store::SeqBank;
use crate::utils::ProgressBuilder;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

pub fn run(
    bank: PathBuf,
    curated: bool,
    release: String,
    force: bool,
    max: Option<usize>,
    workers: usize,
) -> Result<()> {
    let bank = SeqBank::create(&bank)?;
    let catalog = DfamCatalog::new(curated, release);

    if !force && bank.seen_url(&catalog.seen_key())? {
        println!("Already ingested: {}", catalog.seen_key());
        return Ok(());
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(600))
        .build()?;

    let listing = ProgressBuilder::new(catalog.progress_message())
        .with_template("{spinner:.green} {msg}")
        .build()?;
    let sources = catalog.sources(&client)?;
    listing.finish_and_clear();

    let config = IngestConfig {
        workers,
        max_additions: max,
        ..Default::default()
    };
    let progress = ProgressBuilder::new("Adding Dfam families").build()?;
    let cancel = AtomicBool::new(false);
    let filter = SequenceFilter::default();
    let report = Pipeline::new(config).run(&bank, &sources, &filter, &cancel, &progress)?;

    // The release is remembered only when every batch went in whole; a
    // capped or partly failed run stays retryable.
    if report.failed.is_empty() && report.completed_sources.len() == sources.len() {
        bank.record_url(&catalog.seen_key())?;
    }

    super::print_report(&report);
    Ok(())
}
