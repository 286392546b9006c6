use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeqBankError>;

/// Error taxonomy for the sequence bank.
///
/// `InvalidSymbol`, `CorruptEncoding` and `SourceFetch` are item-scoped and
/// collected into ingestion reports. `StoreIo` means the bank itself is
/// unusable and aborts the run that observes it.
#[derive(Debug, Error)]
pub enum SeqBankError {
    #[error("invalid symbol '{symbol}' at position {position}")]
    InvalidSymbol { position: usize, symbol: char },

    #[error("corrupt encoding: code {code} at position {position} is out of range")]
    CorruptEncoding { position: usize, code: u8 },

    #[error("fetch failed: {0}")]
    SourceFetch(String),

    #[error("store error: {0}")]
    StoreIo(#[from] sled::Error),

    #[error("accession not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for SeqBankError {
    fn from(err: reqwest::Error) -> Self {
        SeqBankError::SourceFetch(err.to_string())
    }
}
