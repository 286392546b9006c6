use crate::error::Result;
use crate::source::Source;

pub(crate) mod dfam;
pub(crate) mod refseq;

pub use dfam::DfamCatalog;
pub use refseq::RefSeqCatalog;

/// A remote sequence-database listing that can be turned into sources.
///
/// Providers either point at downloadable files (`Source::RemoteUrl`) or
/// return already-fetched records (`Source::Catalog`); the ingestion
/// pipeline treats both uniformly.
pub trait CatalogProvider {
    fn progress_message(&self) -> String;

    /// Identity under which the catalog fetch is remembered in the bank.
    fn seen_key(&self) -> String;

    fn sources(&self, client: &reqwest::blocking::Client) -> Result<Vec<Source>>;
}
