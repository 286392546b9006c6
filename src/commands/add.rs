use crate::pipeline::{IngestConfig, Pipeline, SequenceFilter};
use crate::source::Source;
use crate::store::SeqBank;
use crate::utils::ProgressBuilder;
use anyhow::{bail, Result};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

#[allow(clippy::too_many_arguments)]
pub fn run(
    bank: PathBuf,
    files: Vec<PathBuf>,
    filter_file: Option<PathBuf>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    workers: usize,
    max: Option<usize>,
) -> Result<()> {
    if files.is_empty() {
        bail!("no input files given");
    }
    let bank = SeqBank::create(&bank)?;

    let mut filter = SequenceFilter {
        min_length,
        max_length,
        allow: None,
    };
    if let Some(path) = filter_file {
        filter.allow = Some(SequenceFilter::allow_list_from_file(&path)?);
    }

    let sources: Vec<Source> = files.into_iter().map(Source::LocalFile).collect();
    let config = IngestConfig {
        workers,
        max_additions: max,
        ..Default::default()
    };

    let progress = ProgressBuilder::new("Adding files").build()?;
    let cancel = AtomicBool::new(false);
    let report = Pipeline::new(config).run(&bank, &sources, &filter, &cancel, &progress)?;

    super::print_report(&report);
    Ok(())
}
