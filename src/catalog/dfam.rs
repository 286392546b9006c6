use super::CatalogProvider;
use crate::error::{Result, SeqBankError};
use crate::source::{Source, SourceRecord};
use serde::Deserialize;

const PAGE_SIZE: u64 = 1000;

#[derive(Deserialize)]
struct FamiliesPage {
    total_count: u64,
    results: Vec<Family>,
}

#[derive(Deserialize)]
struct Family {
    accession: String,
    #[serde(default)]
    consensus_sequence: Option<String>,
}

/// The Dfam repeat-family catalog, fetched page by page from its JSON API.
/// Families without a consensus sequence are skipped.
pub struct DfamCatalog {
    pub curated: bool,
    pub release: String,
}

impl DfamCatalog {
    pub fn new(curated: bool, release: impl Into<String>) -> Self {
        DfamCatalog {
            curated,
            release: release.into(),
        }
    }

    fn page_url(&self, start: u64) -> String {
        let curated = if self.curated { "&curated=true" } else { "" };
        format!(
            "https://dfam.org/api/families?format=full&limit={PAGE_SIZE}&start={start}{curated}"
        )
    }
}

impl CatalogProvider for DfamCatalog {
    fn progress_message(&self) -> String {
        format!(
            "Downloading Dfam {} families{}...",
            self.release,
            if self.curated { " (curated only)" } else { "" }
        )
    }

    fn seen_key(&self) -> String {
        format!(
            "https://dfam.org/api/families#release={}&curated={}",
            self.release, self.curated
        )
    }

    fn sources(&self, client: &reqwest::blocking::Client) -> Result<Vec<Source>> {
        let mut sources = Vec::new();
        let mut start = 0u64;

        loop {
            let url = self.page_url(start);
            let page: FamiliesPage = client
                .get(&url)
                .send()?
                .error_for_status()?
                .json()
                .map_err(|err| SeqBankError::SourceFetch(format!("{url}: {err}")))?;

            let fetched = page.results.len() as u64;
            let records: Vec<SourceRecord> = page
                .results
                .into_iter()
                .filter_map(|family| {
                    family.consensus_sequence.map(|seq| SourceRecord {
                        accession: family.accession,
                        sequence: seq.into_bytes(),
                    })
                })
                .collect();

            if !records.is_empty() {
                sources.push(Source::Catalog {
                    label: format!("dfam families {}..{}", start, start + fetched),
                    records,
                });
            }

            start += fetched;
            if fetched == 0 || start >= page.total_count {
                break;
            }
        }

        Ok(sources)
    }
}
