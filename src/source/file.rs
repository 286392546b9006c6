use super::{RecordIter, SourceRecord};
use crate::error::{Result, SeqBankError};
use bio::io::{fasta, fastq};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    Fastq,
}

/// Determines the sequence format from the file name, looking through one
/// trailing compression extension (.gz or .bz2).
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let base = name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".bz2"))
        .unwrap_or(&name);

    if base.ends_with(".fa") || base.ends_with(".fna") || base.ends_with(".fasta") {
        Ok(FileFormat::Fasta)
    } else if base.ends_with(".fq") || base.ends_with(".fastq") {
        Ok(FileFormat::Fastq)
    } else {
        Err(SeqBankError::SourceFetch(format!(
            "cannot determine sequence format of {}",
            path.display()
        )))
    }
}

/// Opens a local FASTA/FASTQ file, decompressing transparently, as a lazy
/// record stream. Per-record parse errors come back as `Err` items so one
/// malformed record does not end the stream.
pub fn open_records(path: &Path) -> Result<RecordIter> {
    let format = detect_format(path)?;
    let file = File::open(path)
        .map_err(|err| SeqBankError::SourceFetch(format!("{}: {err}", path.display())))?;
    let (reader, _compression) = niffler::get_reader(Box::new(file))
        .map_err(|err| SeqBankError::SourceFetch(format!("{}: {err}", path.display())))?;
    let reader = BufReader::with_capacity(1 << 20, reader);
    let label = path.display().to_string();

    match format {
        FileFormat::Fasta => {
            let records = fasta::Reader::new(reader).records().map(move |record| {
                record
                    .map(|rec| SourceRecord {
                        accession: rec.id().to_string(),
                        sequence: rec.seq().to_vec(),
                    })
                    .map_err(|err| SeqBankError::SourceFetch(format!("{label}: {err}")))
            });
            Ok(Box::new(records))
        }
        FileFormat::Fastq => {
            let records = fastq::Reader::new(reader).records().map(move |record| {
                record
                    .map(|rec| SourceRecord {
                        accession: rec.id().to_string(),
                        sequence: rec.seq().to_vec(),
                    })
                    .map_err(|err| SeqBankError::SourceFetch(format!("{label}: {err}")))
            });
            Ok(Box::new(records))
        }
    }
}
