use crate::codec;
use crate::error::{Result, SeqBankError};
use crate::source::{Source, SourceRecord};
use crate::store::{SeqBank, WriteMode};
use crossbeam_channel::{bounded, Receiver};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

mod filter;

pub use filter::SequenceFilter;

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub workers: usize,
    /// Global cap on records written in one run; `None` means unbounded.
    pub max_additions: Option<usize>,
    pub mode: WriteMode,
    /// Root for download scratch directories.
    pub tmp_dir: Option<PathBuf>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            workers: 4,
            max_additions: None,
            mode: WriteMode::InsertIfAbsent,
            tmp_dir: None,
        }
    }
}

#[derive(Debug)]
pub struct FailedItem {
    pub label: String,
    pub error: String,
}

/// Per-terminal-state counts for one ingestion run, plus the failures.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub written: usize,
    pub skipped_duplicate: usize,
    pub skipped_filter: usize,
    pub skipped_cap: usize,
    pub failed: Vec<FailedItem>,
    /// Labels of sources whose records all reached a real terminal state:
    /// fully dispatched, none lost to the additions cap or a cancellation,
    /// no fetch or parse failure. Only these may be remembered as ingested.
    pub completed_sources: Vec<String>,
}

impl IngestReport {
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    fn merge(&mut self, other: IngestReport) {
        self.written += other.written;
        self.skipped_duplicate += other.skipped_duplicate;
        self.skipped_filter += other.skipped_filter;
        self.skipped_cap += other.skipped_cap;
        self.failed.extend(other.failed);
    }

    pub fn summary(&self) -> String {
        format!(
            "written {} | duplicate {} | filtered {} | capped {} | failed {}",
            self.written,
            self.skipped_duplicate,
            self.skipped_filter,
            self.skipped_cap,
            self.failed.len()
        )
    }
}

enum TaskOutcome {
    Written,
    SkippedDuplicate,
    SkippedFilter,
    SkippedCap,
    Failed(String),
}

/// One record in flight, tagged with the index of the source it came from so
/// cap losses can be charged back to that source.
struct Task {
    source: usize,
    record: SourceRecord,
}

/// Orchestrates sources through filter, encode, dedup-check and write
/// across a fixed pool of worker threads.
///
/// The caller's thread walks the sources in order and feeds records into a
/// bounded channel; workers race on the bank, which arbitrates per-accession.
/// Item-scoped failures land in the report; a store failure aborts the run.
pub struct Pipeline {
    config: IngestConfig,
}

impl Pipeline {
    pub fn new(config: IngestConfig) -> Self {
        Pipeline { config }
    }

    pub fn run(
        &self,
        bank: &SeqBank,
        sources: &[Source],
        filter: &SequenceFilter,
        cancel: &AtomicBool,
        progress: &ProgressBar,
    ) -> Result<IngestReport> {
        let workers = self.config.workers.max(1);
        let max_additions = self.config.max_additions;
        let mode = self.config.mode;
        let tmp_dir = self.config.tmp_dir.as_deref();

        let (tx, rx) = bounded::<Task>(workers * 2);
        let written = AtomicUsize::new(0);
        let fatal = Mutex::new(None::<SeqBankError>);
        // Set per source when a worker drops one of its records at the cap.
        let capped: Vec<AtomicBool> = sources.iter().map(|_| AtomicBool::new(false)).collect();
        let mut drained = vec![false; sources.len()];
        let mut report = IngestReport::default();

        thread::scope(|scope| {
            let written = &written;
            let fatal = &fatal;
            let capped = &capped;

            let mut handles = Vec::with_capacity(workers);
            for _ in 0..workers {
                let rx = rx.clone();
                handles.push(scope.spawn(move || {
                    worker_loop(
                        rx, bank, filter, mode, max_additions, written, fatal, cancel, capped,
                        progress,
                    )
                }));
            }
            drop(rx);

            for (source_idx, source) in sources.iter().enumerate() {
                if self.dispatch_stopped(written, fatal, cancel) {
                    break;
                }
                match source.open(tmp_dir) {
                    Ok(records) => {
                        let mut exhausted = true;
                        for item in records {
                            if self.dispatch_stopped(written, fatal, cancel) {
                                exhausted = false;
                                break;
                            }
                            match item {
                                Ok(record) => {
                                    let task = Task {
                                        source: source_idx,
                                        record,
                                    };
                                    if tx.send(task).is_err() {
                                        exhausted = false;
                                        break;
                                    }
                                }
                                Err(err) => {
                                    // A parse failure leaves the source only
                                    // partially ingested.
                                    exhausted = false;
                                    report.failed.push(FailedItem {
                                        label: source.label(),
                                        error: err.to_string(),
                                    });
                                }
                            }
                        }
                        drained[source_idx] = exhausted;
                    }
                    Err(err) => report.failed.push(FailedItem {
                        label: source.label(),
                        error: err.to_string(),
                    }),
                }
            }
            drop(tx);

            for handle in handles {
                report.merge(handle.join().unwrap());
            }
        });

        progress.finish_and_clear();

        if let Some(err) = fatal.lock().unwrap().take() {
            return Err(err);
        }
        // A cancelled run abandons queued records, so nothing counts as
        // completed; otherwise a source completed iff the producer drained it
        // and none of its records fell to the cap.
        if !cancel.load(Ordering::Relaxed) {
            report.completed_sources = sources
                .iter()
                .enumerate()
                .filter(|(idx, _)| drained[*idx] && !capped[*idx].load(Ordering::Relaxed))
                .map(|(_, source)| source.label())
                .collect();
        }
        bank.flush()?;
        Ok(report)
    }

    fn dispatch_stopped(
        &self,
        written: &AtomicUsize,
        fatal: &Mutex<Option<SeqBankError>>,
        cancel: &AtomicBool,
    ) -> bool {
        if cancel.load(Ordering::Relaxed) {
            return true;
        }
        if fatal.lock().unwrap().is_some() {
            return true;
        }
        match self.config.max_additions {
            Some(max) => written.load(Ordering::SeqCst) >= max,
            None => false,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn worker_loop(
    rx: Receiver<Task>,
    bank: &SeqBank,
    filter: &SequenceFilter,
    mode: WriteMode,
    max_additions: Option<usize>,
    written: &AtomicUsize,
    fatal: &Mutex<Option<SeqBankError>>,
    cancel: &AtomicBool,
    capped: &[AtomicBool],
    progress: &ProgressBar,
) -> IngestReport {
    let mut local = IngestReport::default();

    while let Ok(Task { source, record }) = rx.recv() {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        let label = record.accession.clone();
        match process_record(bank, filter, mode, max_additions, written, record) {
            Ok(TaskOutcome::Written) => local.written += 1,
            Ok(TaskOutcome::SkippedDuplicate) => local.skipped_duplicate += 1,
            Ok(TaskOutcome::SkippedFilter) => local.skipped_filter += 1,
            Ok(TaskOutcome::SkippedCap) => {
                capped[source].store(true, Ordering::Relaxed);
                local.skipped_cap += 1;
            }
            Ok(TaskOutcome::Failed(error)) => local.failed.push(FailedItem { label, error }),
            Err(err) => {
                // Store failure: the destination is unusable, stop the run.
                *fatal.lock().unwrap() = Some(err);
                break;
            }
        }
        progress.inc(1);
    }

    local
}

fn process_record(
    bank: &SeqBank,
    filter: &SequenceFilter,
    mode: WriteMode,
    max_additions: Option<usize>,
    written: &AtomicUsize,
    record: SourceRecord,
) -> Result<TaskOutcome> {
    if mode == WriteMode::InsertIfAbsent && bank.contains(&record.accession)? {
        return Ok(TaskOutcome::SkippedDuplicate);
    }
    if !filter.accepts(&record.accession, &record.sequence) {
        return Ok(TaskOutcome::SkippedFilter);
    }
    let encoded = match codec::encode(&record.sequence) {
        Ok(encoded) => encoded,
        Err(err) => return Ok(TaskOutcome::Failed(err.to_string())),
    };

    if !reserve_slot(written, max_additions) {
        return Ok(TaskOutcome::SkippedCap);
    }
    match bank.put(&record.accession, &encoded, mode) {
        Ok(true) => Ok(TaskOutcome::Written),
        Ok(false) => {
            // Lost the insert race; hand the reserved slot back.
            written.fetch_sub(1, Ordering::SeqCst);
            Ok(TaskOutcome::SkippedDuplicate)
        }
        Err(err) => Err(err),
    }
}

/// Claims one write slot with compare-and-exchange so the cap is never
/// overshot, no matter how many workers race on the boundary.
fn reserve_slot(written: &AtomicUsize, max_additions: Option<usize>) -> bool {
    let Some(max) = max_additions else {
        written.fetch_add(1, Ordering::SeqCst);
        return true;
    };
    let mut current = written.load(Ordering::SeqCst);
    loop {
        if current >= max {
            return false;
        }
        match written.compare_exchange(current, current + 1, Ordering::SeqCst, Ordering::SeqCst) {
            Ok(_) => return true,
            Err(actual) => current = actual,
        }
    }
}
