use crate::error::{Result, SeqBankError};
use std::collections::HashSet;
use std::path::Path;

/// Inclusion criteria applied to each record before it is encoded.
///
/// Empty sequences are always rejected; everything else passes unless a
/// bound or the allow-list says otherwise.
#[derive(Debug, Clone, Default)]
pub struct SequenceFilter {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub allow: Option<HashSet<String>>,
}

impl SequenceFilter {
    pub fn accepts(&self, accession: &str, sequence: &[u8]) -> bool {
        if sequence.is_empty() {
            return false;
        }
        if let Some(min) = self.min_length {
            if sequence.len() < min {
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if sequence.len() > max {
                return false;
            }
        }
        if let Some(allow) = &self.allow {
            if !allow.contains(accession) {
                return false;
            }
        }
        true
    }

    /// Loads an accession allow-list, one accession per line.
    pub fn allow_list_from_file(path: &Path) -> Result<HashSet<String>> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| SeqBankError::SourceFetch(format!("{}: {err}", path.display())))?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
