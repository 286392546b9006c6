use crate::catalog::{CatalogProvider, RefSeqCatalog};
use crate::pipeline::{IngestConfig, Pipeline, SequenceFilter};
use crate::source::Source;
use crate::store::SeqBank;
use crate::utils::ProgressBuilder;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

pub fn run(
    bank: PathBuf,
    max: Option<usize>,
    workers: usize,
    tmp_dir: Option<PathBuf>,
) -> Result<()> {
    let bank = SeqBank::create(&bank)?;
    let catalog = RefSeqCatalog;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(600))
        .build()?;

    let listing = ProgressBuilder::new(catalog.progress_message())
        .with_template("{spinner:.green} {msg}")
        .build()?;
    let sources = catalog.sources(&client)?;
    listing.finish_and_clear();

    // Release files already ingested in a previous run are not fetched again.
    let mut pending = Vec::with_capacity(sources.len());
    for source in sources {
        if let Source::RemoteUrl(url) = &source {
            if bank.seen_url(url)? {
                continue;
            }
        }
        pending.push(source);
    }
    println!("{} release files to ingest", pending.len());

    let config = IngestConfig {
        workers,
        max_additions: max,
        tmp_dir,
        ..Default::default()
    };
    let progress = ProgressBuilder::new("Adding RefSeq").build()?;
    let cancel = AtomicBool::new(false);
    let filter = SequenceFilter::default();
    let report = Pipeline::new(config).run(&bank, &pending, &filter, &cancel, &progress)?;

    // Only release files whose records all made it in are remembered; a cap
    // or mid-file failure leaves that file retryable next run.
    for url in &report.completed_sources {
        bank.record_url(url)?;
    }

    super::print_report(&report);
    Ok(())
}
