use crate::pipeline::{IngestConfig, Pipeline, SequenceFilter};
use crate::source::Source;
use crate::store::{SeqBank, WriteMode};
use crate::utils::ProgressBuilder;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

pub fn run(
    bank: PathBuf,
    urls: Vec<String>,
    workers: usize,
    max: Option<usize>,
    force: bool,
    tmp_dir: Option<PathBuf>,
) -> Result<()> {
    let bank = SeqBank::create(&bank)?;

    let mut pending = Vec::new();
    for url in urls {
        if !force && bank.seen_url(&url)? {
            eprintln!("Already ingested, skipping: {}", url);
            continue;
        }
        pending.push(url);
    }
    if pending.is_empty() {
        println!("Nothing to do");
        return Ok(());
    }

    let sources: Vec<Source> = pending.iter().cloned().map(Source::RemoteUrl).collect();
    let config = IngestConfig {
        workers,
        max_additions: max,
        tmp_dir,
        // A forced re-ingest replaces whatever is already stored.
        mode: if force {
            WriteMode::Overwrite
        } else {
            WriteMode::InsertIfAbsent
        },
    };

    let progress = ProgressBuilder::new("Adding URLs").build()?;
    let cancel = AtomicBool::new(false);
    let filter = SequenceFilter::default();
    let report = Pipeline::new(config).run(&bank, &sources, &filter, &cancel, &progress)?;

    // A URL is remembered only once every one of its records reached the
    // bank; a run stopped early by the cap must leave the rest retryable.
    for url in &report.completed_sources {
        bank.record_url(url)?;
    }

    super::print_report(&report);
    Ok(())
}
