pub mod catalog;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod error;
pub mod export;
pub mod histogram;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod utils;

pub use error::SeqBankError;
pub use pipeline::{IngestConfig, IngestReport, Pipeline, SequenceFilter};
pub use store::{SeqBank, WriteMode};
