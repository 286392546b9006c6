use super::CatalogProvider;
use crate::error::Result;
use crate::source::Source;
use regex::Regex;

const RELEASE_URL: &str = "https://ftp.ncbi.nlm.nih.gov/refseq/release/complete/";

/// The NCBI RefSeq release listing: every `*.genomic.fna.gz` file in the
/// current complete release, ordered numerically by the version field of the
/// file name.
pub struct RefSeqCatalog;

impl RefSeqCatalog {
    pub fn filenames(&self, client: &reqwest::blocking::Client) -> Result<Vec<String>> {
        let listing = client.get(RELEASE_URL).send()?.error_for_status()?.text()?;
        let pattern = Regex::new(r">([^<>]*?\.genomic\.fna\.gz)</a>").expect("static pattern");

        let mut filenames: Vec<String> = pattern
            .captures_iter(&listing)
            .map(|capture| capture[1].to_string())
            .collect();

        // complete.1234.1.genomic.fna.gz sorts by its second dot-field
        filenames.sort_by_key(|name| {
            name.split('.')
                .nth(1)
                .and_then(|field| field.parse::<u64>().ok())
                .unwrap_or(u64::MAX)
        });

        Ok(filenames)
    }
}

impl CatalogProvider for RefSeqCatalog {
    fn progress_message(&self) -> String {
        "Listing RefSeq release files...".to_string()
    }

    fn seen_key(&self) -> String {
        RELEASE_URL.to_string()
    }

    fn sources(&self, client: &reqwest::blocking::Client) -> Result<Vec<Source>> {
        let filenames = self.filenames(client)?;
        Ok(filenames
            .into_iter()
            .map(|name| Source::RemoteUrl(format!("{RELEASE_URL}{name}")))
            .collect())
    }
}
