use crate::error::{Result, SeqBankError};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

mod file;

pub use file::{detect_format, open_records, FileFormat};

/// One parsed item from a source: the accession and its raw symbols.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub accession: String,
    pub sequence: Vec<u8>,
}

pub type RecordIter = Box<dyn Iterator<Item = Result<SourceRecord>>>;

/// The closed set of places sequences come from.
#[derive(Debug, Clone)]
pub enum Source {
    LocalFile(PathBuf),
    RemoteUrl(String),
    /// Records already materialized by a catalog API response.
    Catalog {
        label: String,
        records: Vec<SourceRecord>,
    },
}

impl Source {
    pub fn label(&self) -> String {
        match self {
            Source::LocalFile(path) => path.display().to_string(),
            Source::RemoteUrl(url) => url.clone(),
            Source::Catalog { label, .. } => label.clone(),
        }
    }

    /// Opens the source as a lazy stream of records.
    ///
    /// Remote URLs are downloaded to a scratch directory first (rooted at
    /// `tmp_dir` when given). Failing to reach a source is an error for that
    /// source only; per-record parse failures surface as `Err` items.
    pub fn open(&self, tmp_dir: Option<&Path>) -> Result<RecordIter> {
        match self {
            Source::LocalFile(path) => open_records(path),
            Source::RemoteUrl(url) => {
                let (dir, local) = download(url, tmp_dir)?;
                let records = open_records(&local)?;
                Ok(Box::new(DownloadedRecords {
                    _dir: dir,
                    records,
                }))
            }
            Source::Catalog { records, .. } => {
                Ok(Box::new(records.clone().into_iter().map(Ok)))
            }
        }
    }
}

/// Keeps the scratch directory alive for as long as the stream is read.
struct DownloadedRecords {
    _dir: TempDir,
    records: RecordIter,
}

impl Iterator for DownloadedRecords {
    type Item = Result<SourceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next()
    }
}

fn download(url: &str, tmp_dir: Option<&Path>) -> Result<(TempDir, PathBuf)> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("seqbank");
    let dir = match tmp_dir {
        Some(root) => builder.tempdir_in(root),
        None => builder.tempdir(),
    }
    .map_err(|err| SeqBankError::SourceFetch(format!("scratch dir for {url}: {err}")))?;

    let name = url.rsplit('/').next().filter(|n| !n.is_empty()).unwrap_or("download");
    let local = dir.path().join(name);

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(600))
        .build()?;
    let mut response = client.get(url).send()?.error_for_status()?;

    let mut file = File::create(&local)
        .map_err(|err| SeqBankError::SourceFetch(format!("{}: {err}", local.display())))?;
    response
        .copy_to(&mut file)
        .map_err(|err| SeqBankError::SourceFetch(format!("{url}: {err}")))?;

    Ok((dir, local))
}
