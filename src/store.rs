use crate::error::{Result, SeqBankError};
use chrono::Local;
use std::path::Path;

/// Keys under this prefix are internal bookkeeping, not sequence records.
const INTERNAL_PREFIX: &str = "/seqbank/";
const URL_PREFIX: &str = "/seqbank/url/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Write only when the accession is absent; the decision is atomic.
    InsertIfAbsent,
    /// Unconditional write, last committed wins.
    Overwrite,
}

/// Persistent accession -> encoded sequence store over an embedded sled tree.
///
/// Per-key operations are atomic; writers on distinct accessions never
/// contend in this layer. `accessions()` is a live, best-effort view: a scan
/// running concurrently with ingestion may or may not observe records
/// committed after the scan started.
pub struct SeqBank {
    db: sled::Db,
}

impl SeqBank {
    /// Opens the bank at `path`, creating it when missing.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path.as_ref())?;
        Ok(SeqBank { db })
    }

    /// Opens an existing bank; fails when nothing exists at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let err = std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("cannot find seqbank at {}", path.display()),
            );
            return Err(SeqBankError::StoreIo(sled::Error::from(err)));
        }
        Self::create(path)
    }

    /// Writes an encoded record under `accession` per `mode`.
    ///
    /// Returns whether a write actually occurred. `InsertIfAbsent` uses a
    /// compare-and-swap against an empty slot, so two racing writers resolve
    /// to exactly one winner.
    pub fn put(&self, accession: &str, encoded: &[u8], mode: WriteMode) -> Result<bool> {
        match mode {
            WriteMode::Overwrite => {
                self.db.insert(accession.as_bytes(), encoded)?;
                Ok(true)
            }
            WriteMode::InsertIfAbsent => {
                let swap =
                    self.db
                        .compare_and_swap(accession.as_bytes(), None as Option<&[u8]>, Some(encoded))?;
                Ok(swap.is_ok())
            }
        }
    }

    pub fn get(&self, accession: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(accession.as_bytes())?.map(|value| value.to_vec()))
    }

    /// Removes a record; false when the accession was absent.
    pub fn delete(&self, accession: &str) -> Result<bool> {
        Ok(self.db.remove(accession.as_bytes())?.is_some())
    }

    pub fn contains(&self, accession: &str) -> Result<bool> {
        Ok(self.db.contains_key(accession.as_bytes())?)
    }

    /// All sequence accessions, skipping the internal bookkeeping namespace.
    pub fn accessions(&self) -> impl Iterator<Item = Result<String>> + '_ {
        self.db.iter().keys().filter_map(|key| match key {
            Ok(key) => {
                let accession = String::from_utf8_lossy(&key).into_owned();
                if accession.starts_with(INTERNAL_PREFIX) {
                    None
                } else {
                    Some(Ok(accession))
                }
            }
            Err(err) => Some(Err(err.into())),
        })
    }

    /// Accession and stored length of every record. The encoding is one byte
    /// per base, so the value length is the sequence length without decoding.
    pub fn lengths(&self) -> impl Iterator<Item = Result<(String, usize)>> + '_ {
        self.db.iter().filter_map(|entry| match entry {
            Ok((key, value)) => {
                let accession = String::from_utf8_lossy(&key).into_owned();
                if accession.starts_with(INTERNAL_PREFIX) {
                    None
                } else {
                    Some(Ok((accession, value.len())))
                }
            }
            Err(err) => Some(Err(err.into())),
        })
    }

    pub fn count(&self) -> Result<usize> {
        let mut count = 0;
        for accession in self.accessions() {
            accession?;
            count += 1;
        }
        Ok(count)
    }

    /// Streams every raw entry, internal namespace included, into `other`.
    pub fn copy_to(&self, other: &SeqBank) -> Result<usize> {
        let mut copied = 0;
        for entry in self.db.iter() {
            let (key, value) = entry?;
            other.db.insert(key, value)?;
            copied += 1;
        }
        other.flush()?;
        Ok(copied)
    }

    pub fn seen_url(&self, url: &str) -> Result<bool> {
        Ok(self.db.contains_key(Self::url_key(url))?)
    }

    /// Marks a URL as ingested, with a timestamp for later inspection.
    pub fn record_url(&self, url: &str) -> Result<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.db.insert(Self::url_key(url), stamp.as_bytes())?;
        Ok(())
    }

    fn url_key(url: &str) -> Vec<u8> {
        let mut key = URL_PREFIX.as_bytes().to_vec();
        key.extend_from_slice(url.as_bytes());
        key
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}
